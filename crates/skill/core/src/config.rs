/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Whether aggregation builds the UI-facing modifier summary.
    /// Services that only feed the battle simulator can turn this off.
    pub include_summary: bool,
}

impl EngineConfig {
    // ===== compile-time limits =====
    /// Highest spell tier a school can unlock.
    pub const MAX_SPELL_TIER: u8 = 8;
    /// Upper bound on effects per skill; the effect index is a u16.
    pub const MAX_EFFECTS_PER_SKILL: usize = u16::MAX as usize;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INCLUDE_SUMMARY: bool = true;

    pub fn new() -> Self {
        Self {
            include_summary: Self::DEFAULT_INCLUDE_SUMMARY,
        }
    }

    pub fn without_summary() -> Self {
        Self {
            include_summary: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
