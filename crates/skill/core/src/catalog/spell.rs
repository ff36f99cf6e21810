use super::codes::SpellSchool;

/// Static definition of a spell, as far as castability is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpellDefinition {
    pub id: u16,
    pub name: String,
    pub school: SpellSchool,
    /// Tier the school must have unlocked.
    pub tier: u8,
    /// Character level required to cast.
    pub unlock_level: u32,
}

impl SpellDefinition {
    pub fn new(
        id: u16,
        name: impl Into<String>,
        school: SpellSchool,
        tier: u8,
        unlock_level: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            school,
            tier,
            unlock_level,
        }
    }
}
