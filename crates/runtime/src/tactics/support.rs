//! Support: keep the party alive, fight only when nobody needs healing.
use combat_core::{
    ActorId, CombatContext, Position, Skill, SkillKind, TacticalRole, TargetPriority,
    threat::clamp_unit,
};
use tracing::debug;

use super::targeting;
use super::{Assist, Tactics};
use crate::positioning;

/// HP fraction under which an ally (or the character) needs a heal.
pub(crate) const HEAL_THRESHOLD: f32 = 0.8;
const THREAT_SCALE: f32 = 1.1;

#[derive(Debug, Default)]
pub struct SupportTactics {
    pending_heal: Option<ActorId>,
}

/// Most depleted party member or the character itself under
/// [`HEAL_THRESHOLD`]; party members win ties in party order.
fn most_depleted(ctx: &CombatContext) -> Option<(ActorId, Position, f32)> {
    let character = ctx.character();
    ctx.party_members()
        .iter()
        .filter(|m| m.is_alive())
        .map(|m| (m.id, m.position, m.hp.fraction()))
        .chain(std::iter::once((
            character.id,
            character.position,
            character.hp_fraction(),
        )))
        .filter(|(_, _, fraction)| *fraction < HEAL_THRESHOLD)
        .min_by(|a, b| a.2.total_cmp(&b.2))
}

/// Strongest usable heal.
fn best_heal(ctx: &CombatContext) -> Option<&Skill> {
    targeting::strongest(ctx.character().usable_skills(SkillKind::Heal))
}

impl SupportTactics {
    /// Party member (or the character) a heal is queued for.
    pub fn pending_heal(&self) -> Option<ActorId> {
        self.pending_heal
    }

    fn refresh(&mut self, ctx: &CombatContext) -> Option<(ActorId, Position, Skill)> {
        let heal = best_heal(ctx).zip(most_depleted(ctx)).map(|(skill, (id, position, _))| {
            (id, position, skill.clone())
        });
        self.pending_heal = heal.as_ref().map(|(id, _, _)| *id);
        heal
    }
}

impl Tactics for SupportTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::Support
    }

    /// Yields no target while a heal is pending; otherwise the nearest
    /// threatening enemy, or the nearest enemy.
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        if let Some((id, _, _)) = self.refresh(ctx) {
            debug!("support holding fire, heal pending on {}", id);
            return None;
        }

        let candidates = targeting::candidates(ctx);
        let chosen = targeting::nearest(candidates.iter().filter(|c| c.is_threatening()))
            .or_else(|| targeting::nearest(&candidates))?;
        Some(chosen.priority(50.0 - chosen.distance, "support fallback"))
    }

    /// Debuffs are preferred over damage; the basic attack otherwise.
    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        let target = targeting::find(ctx, target.target_id)?;
        let debuff = targeting::strongest(
            ctx.character()
                .usable_skills(SkillKind::Debuff)
                .filter(|skill| targeting::reaches(skill, target.distance)),
        );
        match debuff {
            Some(skill) => Some(skill.clone()),
            None => Some(targeting::strongest_or_basic(ctx, target.distance)),
        }
    }

    /// Walks into heal range of the pending target, otherwise steps away
    /// from aggressive monsters in melee range.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        if let Some((_, position, skill)) = self.refresh(ctx) {
            return positioning::approach(ctx, position, skill.range.max(1) as f32);
        }
        let pressure = Position::centroid(targeting::aggressive_within(
            ctx,
            super::ranged::MELEE_PRESSURE_RADIUS,
        ))?;
        Some(positioning::retreat_from(ctx, pressure, 2.0))
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        clamp_unit(ctx.threat_level() * THREAT_SCALE)
    }

    fn assist(&mut self, ctx: &CombatContext) -> Option<Assist> {
        let (target, _, skill) = self.refresh(ctx)?;
        debug!("support healing {} with {}", target, skill.id);
        Some(Assist { target, skill })
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{CharacterState, MonsterActor, PartyMember, ResourceMeter};

    use super::*;

    fn priest(hp: u32) -> CharacterState {
        let mut priest = CharacterState::new(ResourceMeter::new(hp, 100), ResourceMeter::full(200))
            .with_skill(Skill::new("AL_HEAL", SkillKind::Heal, 13).with_range(9))
            .with_skill(Skill::new("AL_DECAGI", SkillKind::Debuff, 15).with_range(9));
        priest.id = ActorId(1);
        priest
    }

    fn member(id: u32, hp: u32, x: i32) -> PartyMember {
        PartyMember::new(ActorId(id), "ally", ResourceMeter::new(hp, 100), Position::new(x, 0))
    }

    fn monster() -> MonsterActor {
        MonsterActor::new(ActorId(50), "orc", ResourceMeter::full(100), Position::new(4, 0))
    }

    #[test]
    fn heals_most_depleted_ally_before_fighting() {
        let ctx = CombatContext::builder(priest(100))
            .party([member(2, 70, 2), member(3, 40, 12)])
            .monster(monster())
            .build();
        let mut support = SupportTactics::default();
        assert_eq!(support.select_target(&ctx), None);
        assert_eq!(support.pending_heal(), Some(ActorId(3)));

        let assist = support.assist(&ctx).unwrap();
        assert_eq!(assist.target, ActorId(3));
        assert_eq!(assist.skill.id.as_str(), "AL_HEAL");
        assert_eq!(support.evaluate_positioning(&ctx), Some(Position::new(3, 0)));
    }

    #[test]
    fn heals_self_when_alone() {
        let ctx = CombatContext::builder(priest(50)).monster(monster()).build();
        let mut support = SupportTactics::default();
        assert_eq!(support.assist(&ctx).map(|a| a.target), Some(ActorId(1)));
    }

    #[test]
    fn fights_when_everyone_is_healthy() {
        let ctx = CombatContext::builder(priest(100))
            .party_member(member(2, 95, 2))
            .monster(monster())
            .build();
        let mut support = SupportTactics::default();
        assert_eq!(support.assist(&ctx), None);
        let target = support.select_target(&ctx).unwrap();
        assert_eq!(target.target_id, ActorId(50));
        assert_eq!(support.select_skill(&ctx, &target).unwrap().id.as_str(), "AL_DECAGI");
    }

    #[test]
    fn no_heal_skill_means_no_assist() {
        let mut character = priest(30);
        character.skills.retain(|s| s.kind != SkillKind::Heal);
        let ctx = CombatContext::builder(character).monster(monster()).build();
        let mut support = SupportTactics::default();
        assert_eq!(support.assist(&ctx), None);
        assert!(support.select_target(&ctx).is_some());
    }
}
