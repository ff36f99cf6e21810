//! Battle-Effect accumulator.
//!
//! Unlike the other accumulators this one holds no per-type logic: every
//! effect is dispatched to the handler the [`crate::registry::EffectRegistry`]
//! has for its type. Handlers mutate the draft groups below and record into
//! the shared [`ModifierSnapshot`].

mod combat;
mod damage;
mod misc;
mod resurrection;
mod spell;
mod status;

pub use combat::{
    BuffSchedule, CombatEffects, ExtraActionGrant, GuardBonus, Reaction, SpecialAttackGrant,
    TimedBuff,
};
pub use damage::{DamageEffects, PerDamageType};
pub use misc::{MiscEffects, Retreat};
pub use resurrection::{ActiveResurrection, RescueRule, ResurrectionEffects, Vitalize};
pub use spell::{ChargeModifier, SpellEffects};
pub use status::{AutoCure, StatusEffects, StatusInfliction};

pub(crate) use damage::DamageDraft;
pub(crate) use spell::SpellDraft;
pub(crate) use status::StatusDraft;

use crate::effect::{Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::snapshot::ModifierSnapshot;
use super::{Accumulator, unhandled};

/// Everything the battle simulator needs from skills.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEffects {
    pub damage: DamageEffects,
    pub spell: SpellEffects,
    pub combat: CombatEffects,
    pub status: StatusEffects,
    pub resurrection: ResurrectionEffects,
    pub misc: MiscEffects,
}

/// Reducer for [`Routes::BATTLE_EFFECTS`].
#[derive(Clone, Debug)]
pub struct BattleEffectAccumulator {
    pub(crate) damage: DamageDraft,
    pub(crate) spell: SpellDraft,
    pub(crate) combat: CombatEffects,
    pub(crate) status: StatusDraft,
    pub(crate) resurrection: ResurrectionEffects,
    pub(crate) misc: MiscEffects,
    pub(crate) snapshot: ModifierSnapshot,
}

impl BattleEffectAccumulator {
    pub fn new() -> Self {
        Self {
            damage: DamageDraft::new(),
            spell: SpellDraft::new(),
            combat: CombatEffects::default(),
            status: StatusDraft::default(),
            resurrection: ResurrectionEffects::default(),
            misc: MiscEffects::default(),
            snapshot: ModifierSnapshot::new(),
        }
    }

    /// Hands the key-addressed snapshot to the summary builder.
    pub fn take_snapshot(&mut self) -> ModifierSnapshot {
        std::mem::take(&mut self.snapshot)
    }
}

impl Default for BattleEffectAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for BattleEffectAccumulator {
    type Output = BattleEffects;

    const ROUTE: Routes = Routes::BATTLE_EFFECTS;
    const CATEGORY: &'static str = "battleEffects";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        let handler = ctx
            .registry()
            .handler(payload.effect_type())
            .ok_or_else(|| unhandled(payload, Self::CATEGORY))?;
        handler(payload, self, ctx)
    }

    fn build(self) -> BattleEffects {
        BattleEffects {
            damage: self.damage.build(),
            spell: self.spell.build(),
            combat: self.combat,
            status: self.status.build(),
            resurrection: self.resurrection,
            misc: self.misc,
        }
    }
}
