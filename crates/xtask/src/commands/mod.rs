//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod aggregate;
mod check_catalog;

pub use aggregate::Aggregate;
pub use check_catalog::CheckCatalog;
