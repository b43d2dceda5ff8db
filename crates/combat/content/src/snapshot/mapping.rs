//! Lenient reading of mapping-style (JSON) snapshots into [`RawSnapshot`].
//!
//! Every accessor returns `None` for absent, null or wrongly typed values.
use std::collections::BTreeMap;
use std::str::FromStr;

use combat_core::{Element, Position, Race, Size, Skill};
use serde_json::{Map, Value};

use super::raw::{RawActor, RawCharacter, RawDangerZone, RawPartyMember, RawSkill, RawSnapshot};

type Object = Map<String, Value>;

/// First non-null value among the key spellings.
fn field<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn objects<'a>(obj: &'a Object, keys: &[&str]) -> Option<Vec<&'a Object>> {
    field(obj, keys)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).collect())
}

fn int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn uint(value: &Value) -> Option<u32> {
    int(value).and_then(|i| u32::try_from(i).ok())
}

fn float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    f.filter(|f| f.is_finite())
}

fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array of names, or the keys of an object (`{"blessing": 120.0}`).
fn names(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(text).collect()),
        Value::Object(map) => Some(map.keys().cloned().collect()),
        _ => None,
    }
}

/// `{"x": 1, "y": 2}` or `[1, 2]`.
fn position(value: &Value) -> Option<Position> {
    match value {
        Value::Object(obj) => coordinates(obj),
        Value::Array(items) => match items.as_slice() {
            [x, y, ..] => Some(Position::new(coordinate(x)?, coordinate(y)?)),
            _ => None,
        },
        _ => None,
    }
}

fn coordinate(value: &Value) -> Option<i32> {
    int(value).and_then(|i| i32::try_from(i).ok())
}

fn coordinates(obj: &Object) -> Option<Position> {
    let x = field(obj, &["x"]).and_then(coordinate)?;
    let y = field(obj, &["y"]).and_then(coordinate)?;
    Some(Position::new(x, y))
}

/// Position under one of `keys`, or flat `x`/`y` on the object itself.
fn located(obj: &Object, keys: &[&str]) -> Option<Position> {
    field(obj, keys)
        .and_then(position)
        .or_else(|| coordinates(obj))
}

/// Enum given by name or by numeric id.
fn enumerated<T: FromStr>(value: &Value, from_id: fn(u64) -> Option<T>) -> Option<T> {
    match value {
        Value::String(s) => T::from_str(s.trim()).ok(),
        Value::Number(n) => n.as_u64().and_then(from_id),
        _ => None,
    }
}

fn skill(value: &Value) -> Option<RawSkill> {
    match value {
        Value::String(id) => Some(RawSkill::Id(id.clone())),
        Value::Object(_) => serde_json::from_value::<Skill>(value.clone())
            .ok()
            .map(RawSkill::Full),
        _ => None,
    }
}

fn cooldowns(value: &Value) -> Option<BTreeMap<String, f64>> {
    let map = value.as_object()?;
    Some(
        map.iter()
            .filter_map(|(id, remaining)| float(remaining).map(|s| (id.clone(), s)))
            .collect(),
    )
}

/// Reads a snapshot object. Anything that is not an object reads as empty.
pub(crate) fn snapshot_from_value(value: &Value) -> RawSnapshot {
    let Some(root) = value.as_object() else {
        return RawSnapshot::default();
    };
    let character_obj = field(root, &["character", "player", "self"])
        .and_then(Value::as_object)
        .unwrap_or(root);

    RawSnapshot {
        generation: field(root, &["generation", "tick"])
            .and_then(int)
            .and_then(|i| u64::try_from(i).ok()),
        character: Some(character(character_obj, root)),
        nearby_monsters: objects(root, &["nearby_monsters", "monsters"])
            .map(|items| items.into_iter().map(actor).collect()),
        nearby_players: objects(root, &["nearby_players", "players"])
            .map(|items| items.into_iter().map(actor).collect()),
        party_members: objects(root, &["party_members", "party"])
            .map(|items| items.into_iter().map(party_member).collect()),
        in_pvp: field(root, &["in_pvp", "pvp", "is_pvp"]).and_then(boolean),
        in_woe: field(root, &["in_woe", "woe", "is_woe"]).and_then(boolean),
        danger_zones: objects(root, &["danger_zones", "hazards"])
            .map(|items| items.into_iter().map(danger_zone).collect()),
    }
}

/// Buffs, debuffs and cooldowns may sit on the character or on the root.
fn character(obj: &Object, root: &Object) -> RawCharacter {
    let either = |keys: &[&str]| field(obj, keys).or_else(|| field(root, keys));

    RawCharacter {
        id: field(obj, &["id", "actor_id"]).and_then(uint),
        name: field(obj, &["name"]).and_then(text),
        job: field(obj, &["job", "job_class", "class"]).and_then(text),
        level: field(obj, &["level", "base_level"]).and_then(uint),
        hp: field(obj, &["hp", "current_hp"]).and_then(int),
        hp_max: field(obj, &["hp_max", "max_hp"]).and_then(int),
        sp: field(obj, &["sp", "current_sp"]).and_then(int),
        sp_max: field(obj, &["sp_max", "max_sp"]).and_then(int),
        position: located(obj, &["position", "pos"]),
        attack_range: field(obj, &["attack_range", "range"]).and_then(uint),
        buffs: either(&["active_buffs", "buffs"]).and_then(names),
        debuffs: either(&["active_debuffs", "debuffs"]).and_then(names),
        cooldowns: either(&["cooldowns", "skill_cooldowns"]).and_then(cooldowns),
        skills: field(obj, &["skills", "learned_skills"])
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(skill).collect()),
    }
}

fn actor(obj: &Object) -> RawActor {
    let flag = |keys: &[&str]| field(obj, keys).and_then(boolean);

    RawActor {
        id: field(obj, &["id", "actor_id"]).and_then(uint),
        name: field(obj, &["name"]).and_then(text),
        job: field(obj, &["job", "job_class", "class"]).and_then(text),
        hp: field(obj, &["hp", "current_hp"]).and_then(int),
        hp_max: field(obj, &["hp_max", "max_hp"]).and_then(int),
        position: located(obj, &["position", "pos"]),
        is_aggressive: flag(&["is_aggressive", "aggressive"]),
        is_boss: flag(&["is_boss", "boss"]),
        is_mvp: flag(&["is_mvp", "mvp"]),
        is_hostile: flag(&["is_hostile", "hostile"]),
        is_enemy: flag(&["is_enemy", "enemy"]),
        element: field(obj, &["element"]).and_then(|v| enumerated(v, Element::from_id)),
        race: field(obj, &["race"]).and_then(|v| enumerated(v, Race::from_id)),
        size: field(obj, &["size"]).and_then(|v| enumerated(v, Size::from_id)),
        attack_range: field(obj, &["attack_range", "range"]).and_then(uint),
        skills: field(obj, &["skills"]).and_then(names),
    }
}

fn party_member(obj: &Object) -> RawPartyMember {
    RawPartyMember {
        id: field(obj, &["id", "actor_id"]).and_then(uint),
        name: field(obj, &["name"]).and_then(text),
        job: field(obj, &["job", "job_class", "class"]).and_then(text),
        hp: field(obj, &["hp", "current_hp"]).and_then(int),
        hp_max: field(obj, &["hp_max", "max_hp"]).and_then(int),
        sp: field(obj, &["sp", "current_sp"]).and_then(int),
        sp_max: field(obj, &["sp_max", "max_sp"]).and_then(int),
        position: located(obj, &["position", "pos"]),
    }
}

fn danger_zone(obj: &Object) -> RawDangerZone {
    RawDangerZone {
        center: located(obj, &["center", "position", "pos"]),
        radius: field(obj, &["radius", "r"])
            .and_then(float)
            .map(|r| r as f32),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn aliases_and_shapes() {
        let raw = snapshot_from_value(&json!({
            "character": {"hp": 40, "max_hp": "100", "pos": [3, 4], "class": "knight"},
            "monsters": [
                {"id": 1, "aggressive": 1, "element": "Fire", "x": 5, "y": 6},
                {"id": 2, "is_mvp": true, "element": 7, "position": {"x": 1, "y": 1}}
            ],
            "pvp": "yes",
            "buffs": {"blessing": 60.0}
        }));

        let character = raw.character.unwrap();
        assert_eq!(character.hp, Some(40));
        assert_eq!(character.hp_max, Some(100));
        assert_eq!(character.position, Some(Position::new(3, 4)));
        assert_eq!(character.job.as_deref(), Some("knight"));
        assert_eq!(character.buffs, Some(vec!["blessing".to_owned()]));

        let monsters = raw.nearby_monsters.unwrap();
        assert_eq!(monsters[0].is_aggressive, Some(true));
        assert_eq!(monsters[0].element, Some(Element::Fire));
        assert_eq!(monsters[0].position, Some(Position::new(5, 6)));
        assert_eq!(monsters[1].element, Some(Element::Shadow));
        assert_eq!(raw.in_pvp, Some(true));
    }

    #[test]
    fn wrong_types_read_as_absent() {
        let raw = snapshot_from_value(&json!({
            "character": {"hp": "lots", "position": "here", "cooldowns": [1, 2]},
            "monsters": "none",
            "party": [42, {"id": -3}],
            "in_woe": {"maybe": true}
        }));

        let character = raw.character.unwrap();
        assert_eq!(character.hp, None);
        assert_eq!(character.position, None);
        assert_eq!(character.cooldowns, None);
        assert_eq!(raw.nearby_monsters, None);
        assert_eq!(raw.party_members.unwrap()[0].id, None);
        assert_eq!(raw.in_woe, None);
    }

    #[test]
    fn flat_character_fields_on_root() {
        let raw = snapshot_from_value(&json!({"hp": 10, "hp_max": 20, "job": "mage"}));
        let character = raw.character.unwrap();
        assert_eq!(character.hp, Some(10));
        assert_eq!(character.job.as_deref(), Some("mage"));
    }

    #[test]
    fn non_object_reads_as_empty() {
        assert_eq!(snapshot_from_value(&json!([1, 2, 3])), RawSnapshot::default());
    }
}
