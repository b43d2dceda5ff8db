//! Ranged DPS: attack from inside a distance band, kite when crowded.
use combat_core::{
    ActorId, CombatContext, Position, Skill, TacticalRole, TargetPriority, threat::clamp_unit,
};
use tracing::debug;

use super::Tactics;
use super::targeting::{self, Candidate};
use crate::positioning;

/// Closest distance at which the role is willing to shoot.
pub(crate) const MIN_SAFE_DISTANCE: f32 = 3.0;
/// Aggressive monsters this close make ranged roles more vulnerable.
pub(crate) const MELEE_PRESSURE_RADIUS: f32 = 2.0;
const THREAT_SCALE: f32 = 1.1;
const MELEE_PRESSURE_BONUS: f32 = 0.1;

#[derive(Debug, Default)]
pub struct RangedDpsTactics {
    last_target: Option<ActorId>,
    reposition_pending: bool,
}

impl RangedDpsTactics {
    /// Whether the last selection asked to kite instead of shooting.
    pub fn reposition_pending(&self) -> bool {
        self.reposition_pending
    }

    /// Upper edge of the effective band.
    fn max_distance(ctx: &CombatContext) -> f32 {
        (ctx.character().attack_range as f32).max(MIN_SAFE_DISTANCE)
    }

    fn too_close(candidates: &[Candidate]) -> Option<&Candidate> {
        targeting::nearest(candidates.iter().filter(|c| c.distance < MIN_SAFE_DISTANCE))
    }
}

/// Role threat for fragile ranged roles: scaled up, plus a bonus when an
/// aggressive monster is in melee range.
pub(crate) fn fragile_threat(ctx: &CombatContext) -> f32 {
    let mut threat = ctx.threat_level() * THREAT_SCALE;
    if targeting::aggressive_within(ctx, MELEE_PRESSURE_RADIUS)
        .next()
        .is_some()
    {
        threat += MELEE_PRESSURE_BONUS;
    }
    clamp_unit(threat)
}

impl Tactics for RangedDpsTactics {
    fn role(&self) -> TacticalRole {
        TacticalRole::RangedDps
    }

    /// Nearest enemy inside `[MIN_SAFE_DISTANCE, attack_range]`; nothing
    /// while any enemy is closer than the band, so the character can back
    /// off first.
    fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        let candidates = targeting::candidates(ctx);

        if let Some(crowding) = Self::too_close(&candidates) {
            debug!(
                "ranged crowded by {} at {:.1} cells, kiting",
                crowding.id, crowding.distance
            );
            self.reposition_pending = true;
            self.last_target = None;
            return None;
        }
        self.reposition_pending = false;

        let max = Self::max_distance(ctx);
        let in_band = targeting::nearest(candidates.iter().filter(|c| c.distance <= max));
        let selection = match in_band {
            Some(c) => Some((c, "in band")),
            None => targeting::nearest(&candidates).map(|c| (c, "out of band")),
        };

        self.last_target = selection.map(|(c, _)| c.id);
        let (chosen, reason) = selection?;
        Some(chosen.priority(max - chosen.distance + 100.0, reason))
    }

    fn select_skill(&mut self, ctx: &CombatContext, target: &TargetPriority) -> Option<Skill> {
        let target = targeting::find(ctx, target.target_id)?;
        Some(targeting::strongest_or_basic(ctx, target.distance))
    }

    /// Backs away from the closest crowding enemy, or closes in on an
    /// out-of-band target until it is at the band's far edge.
    fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        let candidates = targeting::candidates(ctx);
        if let Some(crowding) = Self::too_close(&candidates) {
            let steps = (MIN_SAFE_DISTANCE + 1.0 - crowding.distance).max(1.0);
            return Some(positioning::retreat_from(ctx, crowding.position, steps));
        }

        let target = candidates.iter().find(|c| Some(c.id) == self.last_target)?;
        positioning::approach(ctx, target.position, Self::max_distance(ctx))
    }

    fn threat_assessment(&self, ctx: &CombatContext) -> f32 {
        fragile_threat(ctx)
    }
}
