use std::collections::BTreeMap;

use combat_core::{Element, Position, Race, Size, Skill};
use serde::{Deserialize, Serialize};

/// Attribute-style snapshot. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    pub generation: Option<u64>,
    pub character: Option<RawCharacter>,
    pub nearby_monsters: Option<Vec<RawActor>>,
    pub nearby_players: Option<Vec<RawActor>>,
    pub party_members: Option<Vec<RawPartyMember>>,
    pub in_pvp: Option<bool>,
    pub in_woe: Option<bool>,
    pub danger_zones: Option<Vec<RawDangerZone>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCharacter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub level: Option<u32>,
    /// Signed so that bogus negative readings can be clamped.
    pub hp: Option<i64>,
    pub hp_max: Option<i64>,
    pub sp: Option<i64>,
    pub sp_max: Option<i64>,
    pub position: Option<Position>,
    pub attack_range: Option<u32>,
    pub buffs: Option<Vec<String>>,
    pub debuffs: Option<Vec<String>>,
    /// Remaining seconds by skill id.
    pub cooldowns: Option<BTreeMap<String, f64>>,
    pub skills: Option<Vec<RawSkill>>,
}

/// A learned skill: either a bare id resolved through the skill catalog,
/// or a full descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSkill {
    Id(String),
    Full(Skill),
}

/// A nearby monster or player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawActor {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub hp: Option<i64>,
    pub hp_max: Option<i64>,
    pub position: Option<Position>,
    pub is_aggressive: Option<bool>,
    pub is_boss: Option<bool>,
    pub is_mvp: Option<bool>,
    pub is_hostile: Option<bool>,
    pub is_enemy: Option<bool>,
    pub element: Option<Element>,
    pub race: Option<Race>,
    pub size: Option<Size>,
    pub attack_range: Option<u32>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPartyMember {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub hp: Option<i64>,
    pub hp_max: Option<i64>,
    pub sp: Option<i64>,
    pub sp_max: Option<i64>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDangerZone {
    pub center: Option<Position>,
    pub radius: Option<f32>,
}
