//! Packed modifier keys.
//!
//! A [`ModifierKey`] addresses one aggregated value uniformly across the
//! stat and battle snapshots:
//!
//! ```text
//!  31        24 23      16 15                 0
//! +------------+----------+--------------------+
//! | effectType |   slot   |     parameter      |
//! +------------+----------+--------------------+
//! ```
//!
//! `slot` separates sub-fields of one effect type (parry enabled vs parry
//! bonus). `parameter` discriminates instances (stat id, status id, spell id,
//! damage type). The raw integer is the summary's sort order, so the layout
//! is fixed.

use super::kind::EffectType;

/// Dense composite key `(effect type, slot, parameter)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModifierKey(u32);

impl ModifierKey {
    /// Parameter value meaning "applies to all variants".
    pub const ALL_VARIANTS: u16 = 0xFFFF;

    const TYPE_SHIFT: u32 = 24;
    const SLOT_SHIFT: u32 = 16;
    const SLOT_MASK: u32 = 0xFF;
    const PARAM_MASK: u32 = 0xFFFF;

    /// Packs an effect type, slot and parameter.
    pub const fn new(effect_type: EffectType, slot: u8, param: u16) -> Self {
        Self::encode(effect_type.code(), slot, param)
    }

    /// Key for an effect type that applies to every variant.
    pub const fn all(effect_type: EffectType, slot: u8) -> Self {
        Self::new(effect_type, slot, Self::ALL_VARIANTS)
    }

    /// Packs raw parts; the inverse of [`ModifierKey::decode`].
    pub const fn encode(type_code: u8, slot: u8, param: u16) -> Self {
        Self(
            ((type_code as u32) << Self::TYPE_SHIFT)
                | ((slot as u32) << Self::SLOT_SHIFT)
                | param as u32,
        )
    }

    /// Unpacks `(type code, slot, parameter)`.
    pub const fn decode(self) -> (u8, u8, u16) {
        (
            (self.0 >> Self::TYPE_SHIFT) as u8,
            ((self.0 >> Self::SLOT_SHIFT) & Self::SLOT_MASK) as u8,
            (self.0 & Self::PARAM_MASK) as u16,
        )
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Effect type stored in the top byte, if the code is known.
    pub fn effect_type(self) -> Option<EffectType> {
        EffectType::from_code(self.decode().0)
    }

    pub const fn slot(self) -> u8 {
        self.decode().1
    }

    pub const fn param(self) -> u16 {
        self.decode().2
    }

    /// Whether this key applies to every variant of its effect type.
    pub const fn is_all_variants(self) -> bool {
        self.param() == Self::ALL_VARIANTS
    }
}

impl core::fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (code, slot, param) = self.decode();
        match EffectType::from_code(code) {
            Some(kind) => write!(f, "{kind}[{slot}]")?,
            None => write!(f, "#{code}[{slot}]")?,
        }
        if param == Self::ALL_VARIANTS {
            f.write_str(":*")
        } else {
            write!(f, ":{param}")
        }
    }
}
