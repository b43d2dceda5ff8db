//! Hybrid: delegates to the melee, magic or support policy depending on
//! the situation of the tick.
use combat_core::{CombatContext, Position, Skill, SkillKind, TacticalRole, TargetPriority};
use tracing::debug;

use super::magic::MagicDpsTactics;
use super::melee::MeleeDpsTactics;
use super::support::SupportTactics;
use super::{Assist, Tactics, targeting};

/// Party HP fraction under which the hybrid turns healer.
const PARTY_DEFICIT_THRESHOLD: f32 = 0.6;
/// SP fraction needed to fight as a caster in a healthy party.
const CASTER_SP_THRESHOLD: f32 = 0.5;

/// Policy the hybrid is currently delegating to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HybridMode {
    #[default]
    Melee,
    Magic,
    Support,
}

impl HybridMode {
    /// Party member hurt with a heal available: support. Solo: melee.
    /// Healthy party: magic while SP lasts, melee otherwise.
    pub fn for_context(ctx: &CombatContext) -> Self {
        let character = ctx.character();
        if ctx.is_solo() {
            return HybridMode::Melee;
        }

        let party_hurt = ctx
            .party_members()
            .iter()
            .any(|m| m.is_alive() && m.hp.fraction() < PARTY_DEFICIT_THRESHOLD);
        let can_heal = character.usable_skills(SkillKind::Heal).next().is_some();
        if party_hurt && can_heal {
            return HybridMode::Support;
        }

        let can_cast = targeting::usable_offensive(ctx).next().is_some();
        if can_cast && character.sp_fraction() >= CASTER_SP_THRESHOLD {
            HybridMode::Magic
        } else {
            HybridMode::Melee
        }
    }
}

#[derive(Debug, Default)]
pub struct HybridTactics {
    mode: HybridMode,
    melee: MeleeDpsTactics,
    magic: MagicDpsTactics,
    support: SupportTactics,
}

impl HybridTactics {
    pub fn mode(&self) -> HybridMode {
        self.mode
    }

    fn delegate(&self, mode: HybridMode) -> &dyn Tactics {
        match mode {
            HybridMode::Melee => &self.melee,
            HybridMode::Magic => &self.magic,
            HybridMode::Support => &self.support,
        }
    }

    /// Re-derives the mode for `ctx` and returns the matching policy.
    fn active(&mut self, ctx: &CombatContext) -> &mut dyn Tactics {
        let mode = HybridMode::for_context(ctx);
        if mode != self.mode {
            debug!("hybrid switching {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        match mode {
            HybridMode::Melee => &mut self.melee,
            HybridMode::Magic => &mut self.magic,
            HybridMode::Support => &mut self.support,
        }
    }
}

impl Tactics for HybridTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::Hybrid
    }

    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        self.active(ctx).select_target(ctx)
    }

    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        self.active(ctx).select_skill(ctx, target)
    }

    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        self.active(ctx).evaluate_positioning(ctx)
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        self.delegate(HybridMode::for_context(ctx))
            .threat_assessment(ctx)
    }

    fn assist(&mut self, ctx: &CombatContext) -> Option<Assist> {
        self.active(ctx).assist(ctx)
    }
}
