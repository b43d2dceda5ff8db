//! Scalar threat quantification.
//!
//! The threat level is an additive score over actor flags and the
//! character's own health, clamped to `[0, 1]`:
//!
//! ```text
//! threat = 0.40 · [any MVP]
//!        + 0.20 · [any boss]
//!        + 0.08 · #aggressive monsters
//!        + 0.04 · min(#monsters, 5)
//!        + min(0.15 · #opponent players, 0.30)   (PvP / WoE only)
//!        + 0.30 · (1 − hp_fraction)
//! ```
//!
//! Summation follows input order, so identical inputs (including actor
//! ordering) produce bit-identical results.

use crate::state::{CharacterState, ContextFlags, MonsterActor, PlayerActor};

pub const MVP_WEIGHT: f32 = 0.40;
pub const BOSS_WEIGHT: f32 = 0.20;
pub const AGGRESSIVE_WEIGHT: f32 = 0.08;
pub const MONSTER_COUNT_WEIGHT: f32 = 0.04;
/// Monsters beyond this count no longer raise the crowd term.
pub const MONSTER_COUNT_SATURATION: usize = 5;
pub const OPPONENT_WEIGHT: f32 = 0.15;
pub const OPPONENT_CAP: f32 = 0.30;
pub const HEALTH_DEFICIT_WEIGHT: f32 = 0.30;

/// Computes the threat level of a snapshot.
pub fn assess(
    character: &CharacterState,
    monsters: &[MonsterActor],
    players: &[PlayerActor],
    flags: ContextFlags,
) -> f32 {
    let mut threat = 0.0f32;

    if monsters.iter().any(MonsterActor::is_mvp) {
        threat += MVP_WEIGHT;
    }
    if monsters.iter().any(MonsterActor::is_boss) {
        threat += BOSS_WEIGHT;
    }

    for _ in monsters.iter().filter(|m| m.is_aggressive()) {
        threat += AGGRESSIVE_WEIGHT;
    }

    threat += MONSTER_COUNT_WEIGHT * monsters.len().min(MONSTER_COUNT_SATURATION) as f32;

    if flags.player_combat() {
        let opponents = players.iter().filter(|p| p.is_opponent()).count();
        threat += (OPPONENT_WEIGHT * opponents as f32).min(OPPONENT_CAP);
    }

    let hp_fraction = clamp_unit(character.hp_fraction());
    threat += (1.0 - hp_fraction) * HEALTH_DEFICIT_WEIGHT;

    clamp_unit(threat)
}

/// Clamps into `[0, 1]`; NaN maps to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorFlags, ActorId, Position, ResourceMeter};

    fn healthy() -> CharacterState {
        CharacterState::new(ResourceMeter::full(1000), ResourceMeter::full(100))
    }

    fn monster(id: u32, flags: ActorFlags) -> MonsterActor {
        MonsterActor::new(ActorId(id), "mob", ResourceMeter::full(100), Position::new(2, 2))
            .with_flags(flags)
    }

    fn opponent(id: u32) -> PlayerActor {
        PlayerActor::new(ActorId(id), "rival", ResourceMeter::full(100), Position::ORIGIN)
            .with_flags(ActorFlags::ENEMY)
    }

    #[test]
    fn zero_actors_full_health_is_zero() {
        assert_eq!(assess(&healthy(), &[], &[], ContextFlags::empty()), 0.0);
    }

    #[test]
    fn single_aggressive_monster_is_low_threat() {
        let threat = assess(
            &healthy(),
            &[monster(1, ActorFlags::AGGRESSIVE)],
            &[],
            ContextFlags::empty(),
        );
        assert!(threat > 0.0 && threat <= 0.15, "threat = {threat}");
    }

    #[test]
    fn mvp_and_boss_stack() {
        let threat = assess(
            &healthy(),
            &[monster(1, ActorFlags::MVP | ActorFlags::BOSS)],
            &[],
            ContextFlags::empty(),
        );
        let expected = MVP_WEIGHT + BOSS_WEIGHT + MONSTER_COUNT_WEIGHT;
        assert!((threat - expected).abs() < 1e-6);
    }

    #[test]
    fn crowd_term_saturates() {
        let five: Vec<_> = (0..5).map(|i| monster(i, ActorFlags::empty())).collect();
        let twenty: Vec<_> = (0..20).map(|i| monster(i, ActorFlags::empty())).collect();
        let flags = ContextFlags::empty();
        assert_eq!(
            assess(&healthy(), &five, &[], flags),
            assess(&healthy(), &twenty, &[], flags)
        );
    }

    #[test]
    fn opponents_count_only_in_player_combat_and_are_capped() {
        let players: Vec<_> = (0..4).map(opponent).collect();
        assert_eq!(assess(&healthy(), &[], &players, ContextFlags::empty()), 0.0);

        let pvp = assess(&healthy(), &[], &players, ContextFlags::IN_PVP);
        assert!((pvp - OPPONENT_CAP).abs() < 1e-6);

        let woe = assess(&healthy(), &[], &players[..1], ContextFlags::IN_WOE);
        assert!((woe - OPPONENT_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn health_deficit_contributes() {
        let hurt = CharacterState::new(ResourceMeter::new(500, 1000), ResourceMeter::full(100));
        let threat = assess(&hurt, &[], &[], ContextFlags::empty());
        assert!((threat - 0.15).abs() < 1e-6);
    }

    #[test]
    fn always_within_unit_interval() {
        let all_flags = ActorFlags::all();
        let monsters: Vec<_> = (0..50).map(|i| monster(i, all_flags)).collect();
        let players: Vec<_> = (100..120).map(opponent).collect();
        let dying = CharacterState::new(ResourceMeter::new(0, 1000), ResourceMeter::default());

        for hp in [0u32, 1, 250, 999, 1000] {
            let character = CharacterState {
                hp: ResourceMeter::new(hp, 1000),
                ..dying.clone()
            };
            for n in [0usize, 1, 3, 50] {
                for flags in [ContextFlags::empty(), ContextFlags::all()] {
                    let threat = assess(&character, &monsters[..n], &players, flags);
                    assert!((0.0..=1.0).contains(&threat), "threat = {threat}");
                }
            }
        }
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let monsters = vec![
            monster(1, ActorFlags::AGGRESSIVE),
            monster(2, ActorFlags::BOSS),
            monster(3, ActorFlags::empty()),
        ];
        let players = vec![opponent(9)];
        let character = CharacterState::new(ResourceMeter::new(777, 1000), ResourceMeter::full(1));
        let first = assess(&character, &monsters, &players, ContextFlags::IN_PVP);
        for _ in 0..100 {
            let again = assess(&character, &monsters, &players, ContextFlags::IN_PVP);
            assert_eq!(first.to_bits(), again.to_bits());
        }
    }
}
