//! Movement helpers shared by retreat logic and role positioning.
use combat_core::{CombatContext, Position};

/// Returns `desired`, or a quarter-turn alternative around `origin` when
/// `desired` lies inside a danger zone.
///
/// Counter-clockwise is tried before clockwise. When every candidate is
/// dangerous `desired` is kept; standing still inside a zone is no better.
pub(crate) fn avoid_danger(ctx: &CombatContext, origin: Position, desired: Position) -> Position {
    if !ctx.in_danger_zone(desired) {
        return desired;
    }
    [false, true]
        .into_iter()
        .map(|clockwise| origin.rotate_quarter(desired, clockwise))
        .find(|candidate| !ctx.in_danger_zone(*candidate))
        .unwrap_or(desired)
}

/// Step of `steps` cells away from `threat`, steered around danger zones.
pub(crate) fn retreat_from(ctx: &CombatContext, threat: Position, steps: f32) -> Position {
    let origin = ctx.character().position;
    avoid_danger(ctx, origin, origin.step_away(threat, steps))
}

/// Step towards `goal`, stopping `keep` cells short, steered around danger
/// zones. `None` when already close enough.
pub(crate) fn approach(ctx: &CombatContext, goal: Position, keep: f32) -> Option<Position> {
    let origin = ctx.character().position;
    let distance = origin.distance(goal);
    if distance <= keep {
        return None;
    }
    let desired = origin.step_toward(goal, distance - keep);
    (desired != origin).then(|| avoid_danger(ctx, origin, desired))
}

#[cfg(test)]
mod tests {
    use combat_core::{CharacterState, DangerZone, ResourceMeter};

    use super::*;

    fn ctx_with_zone(zone: Option<DangerZone>) -> CombatContext {
        let character = CharacterState::new(ResourceMeter::full(10), ResourceMeter::full(10));
        CombatContext::builder(character).danger_zones(zone).build()
    }

    #[test]
    fn safe_destination_is_kept() {
        let ctx = ctx_with_zone(None);
        assert_eq!(retreat_from(&ctx, Position::new(-3, 0), 5.0), Position::new(5, 0));
    }

    #[test]
    fn dangerous_destination_is_rotated() {
        let ctx = ctx_with_zone(Some(DangerZone::new(Position::new(5, 0), 1.5)));
        assert_eq!(retreat_from(&ctx, Position::new(-3, 0), 5.0), Position::new(0, 5));
    }

    #[test]
    fn approach_stops_short() {
        let ctx = ctx_with_zone(None);
        assert_eq!(approach(&ctx, Position::new(10, 0), 3.0), Some(Position::new(7, 0)));
        assert_eq!(approach(&ctx, Position::new(2, 0), 3.0), None);
    }
}
