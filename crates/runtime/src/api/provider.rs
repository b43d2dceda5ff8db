//! Asynchronous abstraction for sourcing combat decisions.
//!
//! The bot's tick loop holds a [`DecisionProvider`] so it can run with the
//! full [`crate::CombatAi`], a scripted fixture, or the idle fallback.
use async_trait::async_trait;
use combat_core::{CombatAction, CombatContext};

/// Produces the ordered action list for one tick.
#[async_trait]
pub trait DecisionProvider: Send {
    /// Decide what to do given the snapshot of the current tick.
    ///
    /// Actions are ordered by descending priority. An empty list means
    /// there is nothing to do this tick.
    async fn provide_actions(&mut self, ctx: &CombatContext) -> Vec<CombatAction>;
}

/// A provider that never acts.
/// Useful for testing or while the character is out of combat.
pub struct IdleDecisionProvider;

#[async_trait]
impl DecisionProvider for IdleDecisionProvider {
    async fn provide_actions(&mut self, _ctx: &CombatContext) -> Vec<CombatAction> {
        Vec::new()
    }
}
