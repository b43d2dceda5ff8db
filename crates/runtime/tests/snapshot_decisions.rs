//! Decisions driven by JSON snapshots through the content adapter.
use combat_content::{SkillCatalog, SnapshotAdapter};
use combat_core::{ActionType, ActorId, CombatAction, CombatAiConfig, Position, TacticalRole};
use combat_runtime::{CombatAi, CombatState};
use serde_json::json;

fn adapter() -> SnapshotAdapter {
    SnapshotAdapter::new(SkillCatalog::builtin().expect("builtin catalog parses"))
}

#[tokio::test]
async fn priest_heals_wounded_party_member() {
    let ctx = adapter().from_value(&json!({
        "character": {"id": 1, "job": "priest", "hp": 100, "hp_max": 100,
                      "sp": 200, "sp_max": 200, "position": {"x": 0, "y": 0}},
        "monsters": [{"id": 5, "hp": 100, "hp_max": 100, "aggressive": true, "x": 3, "y": 0}],
        "party": [{"id": 2, "hp": 30, "hp_max": 100, "x": 1, "y": 0}]
    }));
    let role = TacticalRole::for_job(&ctx.character().job);
    assert_eq!(role, TacticalRole::Support);

    let mut ai = CombatAi::with_role(CombatAiConfig::default(), role).expect("valid config");
    let actions = ai.decide(&ctx).await;

    let first = actions.first().expect("at least one action");
    assert_eq!(first.action_type, ActionType::Heal);
    assert_eq!(first.target_id, Some(ActorId(2)));
    assert_eq!(first.priority, CombatAction::SUPPORT_PRIORITY);
    assert_eq!(ai.state(), CombatState::Engaging);
}

#[test]
fn far_away_monster_is_approached() {
    let ctx = adapter().from_value(&json!({
        "character": {"id": 1, "hp": 500, "hp_max": 500, "position": {"x": 0, "y": 0}},
        "monsters": [{"id": 4, "hp": 100, "hp_max": 100, "x": 50000, "y": 0}],
        "party": [{"id": 2, "hp": 100, "hp_max": 100, "x": -1, "y": 0}]
    }));
    let mut ai = CombatAi::with_role(CombatAiConfig::default(), TacticalRole::MeleeDps)
        .expect("valid config");

    let actions = ai.decide_blocking(&ctx);

    assert_eq!(actions[0].action_type, ActionType::Attack);
    assert_eq!(actions[0].target_id, Some(ActorId(4)));
    let step = actions
        .iter()
        .find_map(|a| a.destination())
        .expect("a move towards the monster");
    assert_eq!(step, Position::new(49_999, 0));
}

#[test]
fn extreme_coordinates_decide_for_every_role() {
    let ctx = adapter().from_value(&json!({
        "character": {"id": 1, "job": "sage", "hp": 500, "hp_max": 500,
                      "sp": 500, "sp_max": 500, "x": i32::MIN, "y": i32::MIN},
        "monsters": [
            {"id": 4, "aggressive": true, "x": i32::MAX, "y": i32::MAX},
            {"id": 5, "x": i32::MIN, "y": i32::MAX}
        ],
        "party": [{"id": 2, "hp": 10, "hp_max": 100, "x": i32::MAX, "y": i32::MIN}],
        "danger_zones": [{"center": [0, 0], "radius": 3.0e9}]
    }));

    for role in TacticalRole::ALL {
        let mut ai = CombatAi::with_role(CombatAiConfig::default(), role).expect("valid config");
        let actions = ai.decide_blocking(&ctx);
        assert!(
            actions.windows(2).all(|w| w[0].priority >= w[1].priority),
            "{role}: {actions:?}"
        );
    }
}

#[tokio::test]
async fn malformed_snapshot_leaves_ai_idle() {
    let ctx = adapter().from_json_str("this is not a snapshot");
    let mut ai = CombatAi::new(CombatAiConfig::default()).expect("valid config");

    assert!(ai.decide(&ctx).await.is_empty());
    assert_eq!(ai.state(), CombatState::Idle);
}

#[tokio::test]
async fn actions_serialize_for_the_executor() {
    let ctx = adapter().from_json_str(
        r#"{"hp": 50, "hp_max": 1000, "job": "knight", "monsters": [{"id": 9, "x": 1, "y": 1}]}"#,
    );
    let mut ai = CombatAi::with_role(CombatAiConfig::default(), TacticalRole::Tank)
        .expect("valid config");

    let actions = ai.decide(&ctx).await;
    let encoded = serde_json::to_value(&actions).expect("actions serialize");

    assert_eq!(encoded[0]["action_type"], "FLEE");
    assert_eq!(encoded[0]["priority"], 10);
    assert_eq!(encoded[0]["payload"]["kind"], "none");
}
