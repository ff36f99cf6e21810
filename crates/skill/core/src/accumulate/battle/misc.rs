use crate::catalog::RowProfile;

/// Retreat from battle at a given turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Retreat {
    pub turn: u32,
    pub chance_percent: f64,
}

/// Formation, party behavior and end-of-turn modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiscEffects {
    pub row_profile: Option<RowProfile>,
    pub targeting_weight: f64,
    pub cover_rows_behind: bool,
    pub party_hostility: bool,
    pub party_protection: bool,
    pub anti_healing: bool,
    pub degradation_repair_percent: f64,
    pub flee_threshold_hp_percent: Option<f64>,
    pub retreat: Option<Retreat>,
    pub end_of_turn_healing_percent: f64,
    pub end_of_turn_self_damage_percent: f64,
}

impl MiscEffects {
    pub fn row_profile(&self) -> RowProfile {
        self.row_profile.unwrap_or_default()
    }
}

impl Default for MiscEffects {
    fn default() -> Self {
        Self {
            row_profile: None,
            targeting_weight: 1.0,
            cover_rows_behind: false,
            party_hostility: false,
            party_protection: false,
            anti_healing: false,
            degradation_repair_percent: 0.0,
            flee_threshold_hp_percent: None,
            retreat: None,
            end_of_turn_healing_percent: 0.0,
            end_of_turn_self_damage_percent: 0.0,
        }
    }
}
