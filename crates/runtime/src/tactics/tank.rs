//! Tank: hold aggro and stand between the threat and the party.
use combat_core::{
    ActorId, CombatContext, Position, Skill, TacticalRole, TargetPriority, threat::clamp_unit,
};
use tracing::debug;

use super::Tactics;
use super::targeting::{self, Candidate};
use crate::positioning;

/// Radius around the character in which enemies count as clustered.
const CLUSTER_RADIUS: f32 = 3.0;
/// Clustered enemies needed before an area skill is preferred.
const CLUSTER_SIZE: usize = 3;
const THREAT_SCALE: f32 = 0.8;

#[derive(Debug, Default)]
pub struct TankTactics {
    last_target: Option<ActorId>,
}

impl TankTactics {
    fn score(candidate: &Candidate) -> f32 {
        let base = if candidate.is_threatening() { 200.0 } else { 100.0 };
        base - candidate.distance
    }
}

impl Tactics for TankTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::Tank
    }

    /// Threatening actors first, nearest among equals.
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        let candidates = targeting::candidates(ctx);
        let chosen = candidates.iter().min_by(|a, b| {
            b.is_threatening()
                .cmp(&a.is_threatening())
                .then_with(|| targeting::by_distance(a, b))
        });

        self.last_target = chosen.map(|c| c.id);
        let chosen = chosen?;
        debug!("tank holding {} {}", chosen.kind_label(), chosen.id);
        Some(chosen.priority(Self::score(chosen), chosen.kind_label()))
    }

    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        let distance = targeting::find(ctx, target.target_id)?.distance;
        let clustered = targeting::candidates(ctx)
            .iter()
            .filter(|c| c.distance <= CLUSTER_RADIUS)
            .count();

        if clustered >= CLUSTER_SIZE {
            let area = targeting::strongest(
                targeting::usable_offensive(ctx)
                    .filter(|skill| skill.area > 0 && targeting::reaches(skill, distance)),
            );
            if let Some(area) = area {
                return Some(area.clone());
            }
        }
        Some(targeting::strongest_or_basic(ctx, distance))
    }

    /// With a party, stand one cell in front of the held target on the
    /// party's side. Alone, close to weapon reach.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        let target = targeting::find(ctx, self.last_target?)?;
        if ctx.is_solo() {
            let reach = ctx.character().attack_range.max(1) as f32;
            return positioning::approach(ctx, target.position, reach);
        }
        let party = Position::centroid(
            ctx.party_members()
                .iter()
                .filter(|m| m.is_alive())
                .map(|m| m.position),
        )?;
        let guard = target.position.step_toward(party, 1.0);
        let origin = ctx.character().position;
        if guard == origin {
            return None;
        }
        Some(positioning::avoid_danger(ctx, origin, guard))
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        clamp_unit(ctx.threat_level() * THREAT_SCALE)
    }
}
