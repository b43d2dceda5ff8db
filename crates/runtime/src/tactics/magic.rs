//! Magic DPS: elemental caster gated by SP.
use core::cmp::Ordering;

use combat_core::{
    ActorId, CombatContext, Element, Position, Skill, TacticalRole, TargetPriority,
};
use tracing::debug;

use super::Tactics;
use super::ranged::{MELEE_PRESSURE_RADIUS, fragile_threat};
use super::targeting::{self, Candidate};
use crate::positioning;

/// Cells put between the caster and a monster in melee range.
const KITE_STEPS: f32 = 3.0;

#[derive(Debug, Default)]
pub struct MagicDpsTactics {
    /// Attack chosen together with the target in the last selection; the
    /// basic attack when no spell was affordable.
    planned: Option<(ActorId, Skill)>,
}

/// Spell and its elemental modifier against one candidate.
struct Plan<'a> {
    candidate: &'a Candidate,
    spell: &'a Skill,
    modifier: f32,
    in_range: bool,
}

/// Best affordable spell against `element`: highest elemental modifier,
/// then highest power, then first learned.
fn best_spell<'a>(spells: &[&'a Skill], element: Element) -> Option<(&'a Skill, f32)> {
    spells
        .iter()
        .map(|spell| (*spell, spell.element.modifier_against(element)))
        .min_by(|(a, ma), (b, mb)| mb.total_cmp(ma).then_with(|| b.power.cmp(&a.power)))
}

/// Best spell that reaches `candidate`, or the best overall to walk into
/// range for.
fn plan_for<'a>(spells: &[&'a Skill], candidate: &'a Candidate) -> Option<Plan<'a>> {
    let reaching: Vec<&Skill> = spells
        .iter()
        .copied()
        .filter(|spell| targeting::reaches(spell, candidate.distance))
        .collect();
    let in_range = !reaching.is_empty();
    let pool = if in_range { &reaching[..] } else { spells };
    best_spell(pool, candidate.element).map(|(spell, modifier)| Plan {
        candidate,
        spell,
        modifier,
        in_range,
    })
}

fn by_plan(a: &Plan<'_>, b: &Plan<'_>) -> Ordering {
    b.in_range
        .cmp(&a.in_range)
        .then_with(|| b.modifier.total_cmp(&a.modifier))
        .then_with(|| a.candidate.hp_fraction().total_cmp(&b.candidate.hp_fraction()))
        .then_with(|| targeting::by_distance(a.candidate, b.candidate))
}

impl Tactics for MagicDpsTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::MagicDps
    }

    /// Enemy with the best elemental matchup for an affordable spell, then
    /// lowest HP fraction, then nearest. Enemies already within a spell's
    /// range come first. With no affordable spell the nearest enemy is taken
    /// for a basic attack.
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        let candidates = targeting::candidates(ctx);
        let spells: Vec<&Skill> = targeting::usable_offensive(ctx).collect();

        if spells.is_empty() {
            self.planned = None;
            let nearest = targeting::nearest(&candidates)?;
            debug!("caster out of SP, falling back on {}", nearest.id);
            self.planned = Some((nearest.id, ctx.character().basic_attack()));
            return Some(nearest.priority(100.0 - nearest.distance, "sp exhausted"));
        }

        let plan = candidates
            .iter()
            .filter_map(|candidate| plan_for(&spells, candidate))
            .min_by(by_plan)?;

        debug!(
            "caster plans {} on {} (x{:.2}, in range: {})",
            plan.spell.id, plan.candidate.id, plan.modifier, plan.in_range
        );
        self.planned = Some((plan.candidate.id, plan.spell.clone()));
        let priority = plan.modifier * 100.0 + (1.0 - plan.candidate.hp_fraction()) * 10.0;
        Some(plan.candidate.priority(priority, "elemental advantage"))
    }

    /// Planned spell when it still reaches, else the best reaching spell,
    /// else the basic attack while walking into range.
    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        let character = ctx.character();
        let target = targeting::find(ctx, target.target_id)?;
        if let Some((planned_for, spell)) = &self.planned
            && *planned_for == target.id
            && character.can_use(spell)
            && targeting::reaches(spell, target.distance)
        {
            return Some(spell.clone());
        }

        let spells: Vec<&Skill> = targeting::usable_offensive(ctx)
            .filter(|spell| targeting::reaches(spell, target.distance))
            .collect();
        let spell = best_spell(&spells, target.element)
            .map(|(spell, _)| spell.clone())
            .unwrap_or_else(|| character.basic_attack());
        Some(spell)
    }

    /// Steps away from aggressive monsters in melee range, otherwise closes
    /// to the planned attack's range.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        if let Some(pressure) =
            Position::centroid(targeting::aggressive_within(ctx, MELEE_PRESSURE_RADIUS))
        {
            return Some(positioning::retreat_from(ctx, pressure, KITE_STEPS));
        }
        let (planned_for, spell) = self.planned.as_ref()?;
        let target = targeting::find(ctx, *planned_for)?;
        positioning::approach(ctx, target.position, spell.range.max(1) as f32)
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        fragile_threat(ctx)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActorFlags, CharacterState, MonsterActor, ResourceMeter, SkillKind};

    use super::*;

    fn wizard(sp: u32) -> CharacterState {
        CharacterState::new(ResourceMeter::full(600), ResourceMeter::new(sp, 300))
            .with_attack_range(1)
            .with_skill(
                Skill::new("MG_FIREBOLT", SkillKind::Offensive, 50)
                    .with_element(Element::Fire)
                    .with_range(9),
            )
            .with_skill(
                Skill::new("MG_COLDBOLT", SkillKind::Offensive, 50)
                    .with_element(Element::Water)
                    .with_range(9),
            )
    }

    fn monster(id: u32, element: Element, hp: u32, x: i32) -> MonsterActor {
        MonsterActor::new(ActorId(id), "mob", ResourceMeter::new(hp, 100), Position::new(x, 0))
            .with_element(element)
    }

    #[test]
    fn prefers_elemental_advantage_over_low_hp() {
        let ctx = CombatContext::builder(wizard(300))
            .monster(monster(1, Element::Neutral, 10, 4))
            .monster(monster(2, Element::Fire, 90, 6))
            .build();
        let mut magic = MagicDpsTactics::default();
        let target = magic.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(2));
        assert_eq!(magic.select_skill(&ctx, &target).unwrap().id.as_str(), "MG_COLDBOLT");
    }

    #[test]
    fn no_sp_means_basic_attack_on_nearest() {
        let ctx = CombatContext::builder(wizard(10))
            .monster(monster(1, Element::Fire, 90, 6))
            .monster(monster(2, Element::Neutral, 90, 2))
            .build();
        let mut magic = MagicDpsTactics::default();
        let target = magic.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(2));
        assert!(magic.select_skill(&ctx, &target).unwrap().is_basic_attack());
        assert_eq!(magic.evaluate_positioning(&ctx), Some(Position::new(1, 0)));
    }

    #[test]
    fn reachable_enemy_beats_better_matchup_out_of_range() {
        let ctx = CombatContext::builder(wizard(300))
            .monster(monster(1, Element::Fire, 90, 30))
            .monster(monster(2, Element::Neutral, 90, 5))
            .build();
        let mut magic = MagicDpsTactics::default();
        let target = magic.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(2));
        assert_eq!(magic.evaluate_positioning(&ctx), None);
    }

    #[test]
    fn distant_target_is_approached_not_cast_at() {
        let ctx = CombatContext::builder(wizard(300))
            .monster(monster(9, Element::Fire, 90, 30))
            .build();
        let mut magic = MagicDpsTactics::default();
        let target = magic.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(9));

        let skill = magic.select_skill(&ctx, &target).unwrap();
        assert!(skill.is_basic_attack(), "got {}", skill.id);
        assert_eq!(magic.evaluate_positioning(&ctx), Some(Position::new(21, 0)));
    }

    #[test]
    fn kites_from_melee_pressure() {
        let ctx = CombatContext::builder(wizard(300))
            .monster(monster(1, Element::Neutral, 90, 1).with_flags(ActorFlags::AGGRESSIVE))
            .build();
        let mut magic = MagicDpsTactics::default();
        assert_eq!(magic.evaluate_positioning(&ctx), Some(Position::new(-3, 0)));
    }
}
