//! Route map: which output categories an effect type feeds.

use bitflags::bitflags;

use super::kind::{EffectFamily, EffectType};

bitflags! {
    /// Output categories one effect type feeds.
    ///
    /// An effect may feed several accumulators at once (martial bonuses feed
    /// both the stat calculator and the battle simulator).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Routes: u8 {
        const COMBAT_STATS     = 1 << 0;
        const BATTLE_EFFECTS   = 1 << 1;
        const REWARD           = 1 << 2;
        const EXPLORATION      = 1 << 3;
        const EQUIPMENT_SLOTS  = 1 << 4;
        const SPELLBOOK        = 1 << 5;
        const MODIFIER_SUMMARY = 1 << 6;
    }
}

impl Routes {
    /// Builds the route set for one effect type.
    ///
    /// Everything that lands in a stat or battle snapshot defaults into the
    /// modifier summary, except triggered abilities and resurrection rules
    /// (listed by the ability screen) and passthrough kinds. Reward,
    /// exploration, equipment and spellbook scalars are shown elsewhere.
    pub fn for_type(kind: EffectType) -> Self {
        use EffectType::*;

        let base = match kind.family() {
            EffectFamily::Stat => Self::COMBAT_STATS,
            EffectFamily::Damage
            | EffectFamily::Spell
            | EffectFamily::Combat
            | EffectFamily::Resurrection
            | EffectFamily::Status
            | EffectFamily::Misc
            | EffectFamily::Passthrough => Self::BATTLE_EFFECTS,
            EffectFamily::Reward => return Self::REWARD,
            EffectFamily::Exploration => return Self::EXPLORATION,
            EffectFamily::Equipment => return Self::EQUIPMENT_SLOTS,
            EffectFamily::Spellbook => return Self::SPELLBOOK,
        };

        let base = match kind {
            MartialBonusPercent | MartialBonusMultiplier => base | Self::BATTLE_EFFECTS,
            _ => base,
        };

        let excluded = matches!(kind, ExtraAction | Reaction | SpecialAttack)
            || matches!(
                kind.family(),
                EffectFamily::Resurrection | EffectFamily::Passthrough
            );

        if excluded {
            base
        } else {
            base | Self::MODIFIER_SUMMARY
        }
    }
}
