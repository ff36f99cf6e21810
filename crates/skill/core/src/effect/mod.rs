//! Effect type catalog, route map, modifier keys and payload decoding.

mod key;
mod kind;
mod payload;
mod route;
mod validate;

pub use key::ModifierKey;
pub use kind::{EffectFamily, EffectType};
pub use payload::{Payload, decode};
pub use route::Routes;
pub use validate::{Requirement, requirements, validate};
