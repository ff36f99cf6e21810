//! Configuration errors raised while aggregating skill effects.
//!
//! Every error in this crate describes a content or consistency defect: a
//! missing required field, an out-of-range discriminator code, or an effect
//! type routed somewhere no reducer handles it. None of them are transient.
//! The aggregation call that hits one is aborted and no partial result is
//! produced.

use crate::catalog::SkillId;
use crate::effect::EffectType;

/// What went wrong with a single effect record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigErrorKind {
    /// A required parameter or value is absent.
    MissingField,

    /// A discriminator field carries a code outside its table.
    InvalidCode(i64),

    /// The effect type is routed to a category that has no handler for it.
    UnregisteredHandler,

    /// The effect scales with an actor stat but no stat snapshot was supplied.
    ActorStatsRequired,
}

impl core::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidCode(code) => write!(f, "{} {code} in", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl ConfigErrorKind {
    /// Returns a short human-readable description of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing required field",
            Self::InvalidCode(_) => "invalid code",
            Self::UnregisteredHandler => "no registered handler",
            Self::ActorStatsRequired => "actor stats required",
        }
    }
}

/// Invalid configuration detected while aggregating one effect.
///
/// Carries enough context to find the offending record in the content
/// catalog: the skill id, the effect's index within that skill, the effect
/// type and the field that failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error(
    "invalid configuration in skill {skill_id} effect #{effect_index} ({effect_type}): {kind} `{field}`"
)]
pub struct ConfigError {
    pub skill_id: SkillId,
    pub effect_index: u16,
    pub effect_type: EffectType,
    /// Content-schema name of the offending field, or the category name for
    /// unregistered handlers.
    pub field: &'static str,
    pub kind: ConfigErrorKind,
}

impl ConfigError {
    /// Returns a static identifier for this error, for metrics and tests.
    pub const fn error_code(&self) -> &'static str {
        match self.kind {
            ConfigErrorKind::MissingField => "CONFIG_MISSING_FIELD",
            ConfigErrorKind::InvalidCode(_) => "CONFIG_INVALID_CODE",
            ConfigErrorKind::UnregisteredHandler => "CONFIG_UNREGISTERED_HANDLER",
            ConfigErrorKind::ActorStatsRequired => "CONFIG_ACTOR_STATS_REQUIRED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_location_and_field() {
        let err = ConfigError {
            skill_id: 42,
            effect_index: 3,
            effect_type: EffectType::StatusInflict,
            field: "chancePercent",
            kind: ConfigErrorKind::MissingField,
        };

        let text = err.to_string();
        assert!(text.contains("skill 42"));
        assert!(text.contains("effect #3"));
        assert!(text.contains("statusInflict"));
        assert!(text.contains("`chancePercent`"));
        assert_eq!(err.error_code(), "CONFIG_MISSING_FIELD");
    }

    #[test]
    fn invalid_code_is_reported() {
        let err = ConfigError {
            skill_id: 7,
            effect_index: 0,
            effect_type: EffectType::DamageDealtPercent,
            field: "damageType",
            kind: ConfigErrorKind::InvalidCode(9),
        };

        assert!(err.to_string().contains("invalid code 9 in `damageType`"));
    }
}
