//! Effect type registry: dense route and handler tables.
//!
//! The registry is built once, either explicitly with
//! [`EffectRegistry::build`] or lazily through [`EffectRegistry::shared`],
//! and then only read. Aggregators borrow it, so one instance serves any
//! number of concurrent aggregation calls.

use std::sync::OnceLock;

use strum::{EnumCount, IntoEnumIterator};

use crate::effect::{EffectType, Routes};
use crate::handlers::{self, BattleHandler};

/// Route set and battle handler for every [`EffectType`], indexed by code.
#[derive(Clone)]
pub struct EffectRegistry {
    routes: [Routes; EffectType::COUNT],
    handlers: [Option<BattleHandler>; EffectType::COUNT],
}

impl EffectRegistry {
    /// Builds the tables from the route map and the handler set.
    pub fn build() -> Self {
        let mut routes = [Routes::empty(); EffectType::COUNT];
        let mut handlers = [None; EffectType::COUNT];

        for kind in EffectType::iter() {
            let slot = usize::from(kind.code());
            routes[slot] = Routes::for_type(kind);
            if routes[slot].contains(Routes::BATTLE_EFFECTS) {
                handlers[slot] = handlers::handler_for(kind);
            }
        }

        Self { routes, handlers }
    }

    /// Process-wide instance, built on first access.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<EffectRegistry> = OnceLock::new();
        SHARED.get_or_init(Self::build)
    }

    pub fn routes(&self, kind: EffectType) -> Routes {
        self.routes[usize::from(kind.code())]
    }

    pub fn handler(&self, kind: EffectType) -> Option<BattleHandler> {
        self.handlers[usize::from(kind.code())]
    }

    /// Battle-routed types that have no handler. Empty for a correct build.
    pub fn missing_handlers(&self) -> Vec<EffectType> {
        EffectType::iter()
            .filter(|kind| self.routes(*kind).contains(Routes::BATTLE_EFFECTS))
            .filter(|kind| self.handler(*kind).is_none())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn without_handler(mut self, kind: EffectType) -> Self {
        self.handlers[usize::from(kind.code())] = None;
        self
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::build()
    }
}

impl core::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("types", &EffectType::COUNT)
            .field(
                "handlers",
                &self.handlers.iter().filter(|handler| handler.is_some()).count(),
            )
            .finish()
    }
}
