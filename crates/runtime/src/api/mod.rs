//! Public API surface for the combat runtime.
//!
//! Re-exports the error types and the decision provider seam so consumers
//! can depend on `combat_runtime::api` without reaching into internal
//! modules.
mod errors;
mod provider;

pub use errors::{DecisionFault, Result, RuntimeError};
pub use provider::{DecisionProvider, IdleDecisionProvider};
