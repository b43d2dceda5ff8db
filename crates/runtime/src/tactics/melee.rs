//! Melee DPS: finish the weakest enemy within reach.
use combat_core::{
    ActorId, CombatContext, Position, Skill, TacticalRole, TargetPriority, threat::clamp_unit,
};
use tracing::debug;

use super::Tactics;
use super::targeting;
use crate::positioning;

/// Radius within which targets are ranked by remaining HP.
pub(crate) const ENGAGE_RADIUS: f32 = 5.0;
/// Below this HP fraction the target gets the basic attack to save SP.
const FINISHER_HP: f32 = 0.25;

#[derive(Debug, Default)]
pub struct MeleeDpsTactics {
    last_target: Option<ActorId>,
}

impl Tactics for MeleeDpsTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::MeleeDps
    }

    /// Lowest HP fraction within the engage radius, nearest on ties; the
    /// nearest enemy overall when nothing is within reach.
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        let candidates = targeting::candidates(ctx);
        let reach = ENGAGE_RADIUS.max(ctx.character().attack_range as f32);

        let weakest = candidates
            .iter()
            .filter(|c| c.distance <= reach)
            .min_by(|a, b| {
                a.hp_fraction()
                    .total_cmp(&b.hp_fraction())
                    .then_with(|| targeting::by_distance(a, b))
            });

        let selection = match weakest {
            Some(c) => Some((c, "weakest in reach")),
            None => targeting::nearest(&candidates).map(|c| (c, "closing in")),
        };

        self.last_target = selection.map(|(c, _)| c.id);
        let (chosen, reason) = selection?;
        debug!(
            "melee picked {} at {:.0}% hp ({})",
            chosen.id,
            chosen.hp_fraction() * 100.0,
            reason
        );
        let priority = (1.0 - chosen.hp_fraction()) * 100.0 + (reach - chosen.distance).max(0.0);
        Some(chosen.priority(priority, reason))
    }

    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        let target = targeting::find(ctx, target.target_id)?;
        if target.hp_fraction() < FINISHER_HP {
            return Some(ctx.character().basic_attack());
        }
        Some(targeting::strongest_or_basic(ctx, target.distance))
    }

    /// Close in until the selected target is within weapon reach.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        let target = targeting::find(ctx, self.last_target?)?;
        let reach = ctx.character().attack_range.max(1) as f32;
        positioning::approach(ctx, target.position, reach)
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        clamp_unit(ctx.threat_level())
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{CharacterState, MonsterActor, ResourceMeter, SkillKind};

    use super::*;

    fn assassin() -> CharacterState {
        CharacterState::new(ResourceMeter::full(1000), ResourceMeter::full(100))
            .with_skill(Skill::new("AS_SONICBLOW", SkillKind::Offensive, 16).with_power(500))
    }

    fn monster(id: u32, hp: u32, x: i32) -> MonsterActor {
        MonsterActor::new(ActorId(id), "wolf", ResourceMeter::new(hp, 100), Position::new(x, 0))
    }

    #[test]
    fn picks_weakest_in_reach() {
        let ctx = CombatContext::builder(assassin())
            .monster(monster(1, 100, 1))
            .monster(monster(2, 50, 3))
            .build();
        let target = MeleeDpsTactics::default().select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(2));
        assert!(target.is_monster);
    }

    #[test]
    fn falls_back_to_nearest_out_of_reach() {
        let ctx = CombatContext::builder(assassin())
            .monster(monster(1, 10, 12))
            .monster(monster(2, 90, 8))
            .build();
        let mut melee = MeleeDpsTactics::default();
        let target = melee.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(2));
        assert_eq!(melee.evaluate_positioning(&ctx), Some(Position::new(7, 0)));
    }

    #[test]
    fn finishes_with_basic_attack() {
        let ctx = CombatContext::builder(assassin()).monster(monster(1, 20, 1)).build();
        let mut melee = MeleeDpsTactics::default();
        let target = melee.select_target(&ctx).unwrap();
        assert!(melee.select_skill(&ctx, &target).unwrap().is_basic_attack());

        let ctx = CombatContext::builder(assassin()).monster(monster(1, 80, 1)).build();
        let target = melee.select_target(&ctx).unwrap();
        assert_eq!(melee.select_skill(&ctx, &target).unwrap().id.as_str(), "AS_SONICBLOW");
    }

    #[test]
    fn no_candidates_no_target() {
        let ctx = CombatContext::builder(assassin()).build();
        let mut melee = MeleeDpsTactics::default();
        assert_eq!(melee.select_target(&ctx), None);
        assert_eq!(melee.evaluate_positioning(&ctx), None);
    }
}
