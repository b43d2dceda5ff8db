//! Combat decision runtime.
//!
//! Turns a per-tick [`CombatContext`](combat_core::CombatContext) into an
//! ordered list of [`CombatAction`](combat_core::CombatAction)s for the bot's
//! executor.
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] hosts [`CombatAi`], the emergency/retreat/engage state
//!   machine
//! - [`tactics`] provides the per-role policies and their registry
//! - [`api`] exposes the error types and the [`DecisionProvider`] seam
//! - [`metrics`] tracks decision latency
pub mod api;
pub mod metrics;
pub mod orchestrator;
pub mod tactics;

mod positioning;

pub use api::{DecisionFault, DecisionProvider, IdleDecisionProvider, Result, RuntimeError};
pub use metrics::{CombatMetrics, MetricsSnapshot};
pub use orchestrator::{CombatAi, CombatState, RetreatReason};
pub use tactics::{
    Assist, HybridMode, HybridTactics, MagicDpsTactics, MeleeDpsTactics, RangedDpsTactics,
    SupportTactics, Tactics, TacticsRegistry, TankTactics, create_tactics,
};
