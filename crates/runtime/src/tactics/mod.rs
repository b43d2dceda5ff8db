//! Role-specific tactics.
//!
//! A [`Tactics`] implementation answers three questions for its role each
//! tick: whom to fight ([`Tactics::select_target`]), with what
//! ([`Tactics::select_skill`]), and where to stand
//! ([`Tactics::evaluate_positioning`]). The orchestrator calls them in that
//! order and assembles the answers into an action list.
//!
//! Instances are stateful only for bookkeeping across calls of one tick
//! (last target, pending heal, kiting flag). They never keep references into
//! a [`CombatContext`], so every decision is a function of the snapshot at
//! hand.
//!
//! # Skill choice
//!
//! Every role only proposes skills the character can pay for and that are
//! not cooling down. When nothing qualifies, the basic attack is returned.
mod hybrid;
mod magic;
mod melee;
mod ranged;
mod registry;
mod support;
mod tank;
pub(crate) mod targeting;

use core::fmt;

use combat_core::{ActorId, CombatContext, Position, Skill, SkillKind, TacticalRole, TargetPriority};

pub use hybrid::{HybridMode, HybridTactics};
pub use magic::MagicDpsTactics;
pub use melee::MeleeDpsTactics;
pub use ranged::RangedDpsTactics;
pub use registry::TacticsRegistry;
pub use support::SupportTactics;
pub use tank::TankTactics;

/// A heal cast on a party member or on the character itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Assist {
    pub target: ActorId,
    pub skill: Skill,
}

/// Per-role decision policy.
pub trait Tactics: Send + Sync + fmt::Debug {
    fn role(&self) -> TacticalRole;

    /// Picks the actor to fight, or `None` when the role should not attack
    /// this tick (no targets, kiting, healing).
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority>;

    /// Picks the skill to use on `target`.
    ///
    /// The returned skill is always affordable and off cooldown.
    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill>;

    /// Desired cell to move to, or `None` to hold position.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position>;

    /// Role-adjusted threat in `[0, 1]`.
    fn threat_assessment(&self, ctx: &CombatContext) -> f32;

    /// Heal to cast before anything else this tick.
    fn assist(&mut self, _ctx: &CombatContext) -> Option<Assist> {
        None
    }

    /// Self-buff missing from the character that can be cast while keeping
    /// `sp_reserve` (fraction of max SP) in the pool.
    fn prebattle_buff(&self, ctx: &CombatContext, sp_reserve: f32) -> Option<Skill> {
        missing_buff(ctx, sp_reserve)
    }
}

/// Builds a fresh tactics instance for `role`.
pub fn create_tactics(role: TacticalRole) -> Box<dyn Tactics> {
    match role {
        TacticalRole::Tank => Box::new(TankTactics::default()),
        TacticalRole::MeleeDps => Box::new(MeleeDpsTactics::default()),
        TacticalRole::RangedDps => Box::new(RangedDpsTactics::default()),
        TacticalRole::MagicDps => Box::new(MagicDpsTactics::default()),
        TacticalRole::Support => Box::new(SupportTactics::default()),
        TacticalRole::Hybrid => Box::new(HybridTactics::default()),
    }
}

/// First learned self-buff whose status is not active and whose cost keeps
/// the SP reserve intact.
///
/// Buffs without a `grants` status cannot be checked for activity and are
/// never proposed.
pub fn missing_buff(ctx: &CombatContext, sp_reserve: f32) -> Option<Skill> {
    let character = ctx.character();
    let reserve = (character.sp.maximum as f32 * sp_reserve.clamp(0.0, 1.0)).ceil() as u32;

    character
        .usable_skills(SkillKind::Buff)
        .find(|skill| {
            let inactive = skill
                .grants
                .as_deref()
                .is_some_and(|status| !character.has_buff(status));
            inactive && character.sp.current - skill.sp_cost >= reserve
        })
        .cloned()
}
