use std::collections::BTreeSet;

use combat_core::{
    ActorFlags, ActorId, CharacterState, CombatContext, DangerZone, MonsterActor, PartyMember,
    PlayerActor, ResourceMeter, Skill, SkillId,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::mapping;
use super::raw::{RawActor, RawCharacter, RawDangerZone, RawPartyMember, RawSkill, RawSnapshot};
use crate::loaders::SkillCatalog;

/// Normalizes external snapshots into [`CombatContext`]s.
///
/// Normalization never fails:
/// - HP/SP are clamped into `[0, max]`; a missing maximum takes the current
///   value, a missing current value takes the maximum
/// - actors without an id are dropped, and so are later actors repeating an
///   id already seen in the same list
/// - a character without learned skills gets its job's catalog list
/// - danger zones without a center or with a bad radius are dropped
#[derive(Debug, Clone, Default)]
pub struct SnapshotAdapter {
    catalog: SkillCatalog,
}

impl SnapshotAdapter {
    pub fn new(catalog: SkillCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Attribute-style input.
    pub fn adapt(&self, raw: &RawSnapshot) -> CombatContext {
        let default_character = RawCharacter::default();
        let character = self.character(raw.character.as_ref().unwrap_or(&default_character));

        let monsters = unique(raw.nearby_monsters.as_deref(), |a| a.id, "monster")
            .into_iter()
            .map(|(id, raw)| monster(id, raw));
        let players = unique(raw.nearby_players.as_deref(), |a| a.id, "player")
            .into_iter()
            .map(|(id, raw)| player(id, raw));
        let party = unique(raw.party_members.as_deref(), |m| m.id, "party member")
            .into_iter()
            .map(|(id, raw)| party_member(id, raw));
        let zones = raw
            .danger_zones
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(danger_zone);

        CombatContext::builder(character)
            .generation(raw.generation.unwrap_or_default())
            .monsters(monsters)
            .players(players)
            .party(party)
            .in_pvp(raw.in_pvp.unwrap_or(false))
            .in_woe(raw.in_woe.unwrap_or(false))
            .danger_zones(zones)
            .build()
    }

    /// Mapping-style input.
    pub fn from_value(&self, value: &Value) -> CombatContext {
        if !value.is_object() {
            warn!("snapshot is not an object, using defaults");
        }
        self.adapt(&mapping::snapshot_from_value(value))
    }

    /// Mapping-style input as JSON text; unparsable text yields the default
    /// context.
    pub fn from_json_str(&self, text: &str) -> CombatContext {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.from_value(&value),
            Err(e) => {
                warn!("unparsable snapshot, using defaults: {}", e);
                self.adapt(&RawSnapshot::default())
            }
        }
    }

    fn character(&self, raw: &RawCharacter) -> CharacterState {
        let job = raw.job.clone().unwrap_or_default();
        let skills = self.skills(raw.skills.as_deref().unwrap_or_default(), &job);
        let cooldowns = raw
            .cooldowns
            .iter()
            .flatten()
            .filter(|(_, remaining)| remaining.is_finite())
            .map(|(id, remaining)| (SkillId::new(id.as_str()), remaining.max(0.0) as f32))
            .collect();

        CharacterState {
            id: ActorId(raw.id.unwrap_or_default()),
            name: raw.name.clone().unwrap_or_default(),
            job,
            level: raw.level.unwrap_or(1).max(1),
            hp: meter(raw.hp, raw.hp_max),
            sp: meter(raw.sp, raw.sp_max),
            position: raw.position.unwrap_or_default(),
            attack_range: raw.attack_range.unwrap_or(1).max(1),
            buffs: raw.buffs.clone().unwrap_or_default(),
            debuffs: raw.debuffs.clone().unwrap_or_default(),
            cooldowns,
            skills,
        }
    }

    /// Reported skills resolved through the catalog; the job's catalog list
    /// when nothing usable was reported.
    fn skills(&self, raw: &[RawSkill], job: &str) -> Vec<Skill> {
        let learned: Vec<Skill> = raw
            .iter()
            .filter_map(|entry| match entry {
                RawSkill::Full(skill) => Some(skill.clone()),
                RawSkill::Id(id) => {
                    let found = self.catalog.find(&SkillId::new(id.as_str())).cloned();
                    if found.is_none() {
                        debug!("skill {} not in catalog, ignored", id);
                    }
                    found
                }
            })
            .filter(|skill| !skill.id.as_str().is_empty() && !skill.is_basic_attack())
            .collect();

        if learned.is_empty() {
            self.catalog.skills_for(job).to_vec()
        } else {
            learned
        }
    }
}

/// Entries with an id, first occurrence of each id only.
fn unique<'a, T>(
    items: Option<&'a [T]>,
    id_of: fn(&T) -> Option<u32>,
    kind: &str,
) -> Vec<(ActorId, &'a T)> {
    let mut seen = BTreeSet::new();
    let mut kept = Vec::new();
    for item in items.unwrap_or_default() {
        match id_of(item) {
            Some(id) if seen.insert(id) => kept.push((ActorId(id), item)),
            Some(id) => debug!("dropping duplicate {} id {}", kind, id),
            None => debug!("dropping {} without id", kind),
        }
    }
    kept
}

fn meter(current: Option<i64>, maximum: Option<i64>) -> ResourceMeter {
    let clamp = |value: i64| u32::try_from(value.max(0)).unwrap_or(u32::MAX);
    match (current.map(clamp), maximum.map(clamp)) {
        (Some(current), Some(maximum)) => ResourceMeter::new(current, maximum),
        (Some(value), None) | (None, Some(value)) => ResourceMeter::full(value),
        (None, None) => ResourceMeter::default(),
    }
}

fn actor_flags(raw: &RawActor) -> ActorFlags {
    let mut flags = ActorFlags::empty();
    flags.set(ActorFlags::AGGRESSIVE, raw.is_aggressive.unwrap_or(false));
    flags.set(ActorFlags::BOSS, raw.is_boss.unwrap_or(false));
    flags.set(ActorFlags::MVP, raw.is_mvp.unwrap_or(false));
    flags.set(ActorFlags::HOSTILE, raw.is_hostile.unwrap_or(false));
    flags.set(ActorFlags::ENEMY, raw.is_enemy.unwrap_or(false));
    flags
}

fn monster(id: ActorId, raw: &RawActor) -> MonsterActor {
    MonsterActor {
        id,
        name: raw.name.clone().unwrap_or_default(),
        hp: meter(raw.hp, raw.hp_max),
        position: raw.position.unwrap_or_default(),
        flags: actor_flags(raw),
        element: raw.element.unwrap_or_default(),
        race: raw.race.unwrap_or_default(),
        size: raw.size.unwrap_or_default(),
        attack_range: raw.attack_range.unwrap_or(1),
        skills: raw.skills.clone().unwrap_or_default(),
    }
}

fn player(id: ActorId, raw: &RawActor) -> PlayerActor {
    PlayerActor {
        id,
        name: raw.name.clone().unwrap_or_default(),
        job: raw.job.clone().unwrap_or_default(),
        hp: meter(raw.hp, raw.hp_max),
        position: raw.position.unwrap_or_default(),
        flags: actor_flags(raw),
        element: raw.element.unwrap_or_default(),
        attack_range: raw.attack_range.unwrap_or(1),
        skills: raw.skills.clone().unwrap_or_default(),
    }
}

fn party_member(id: ActorId, raw: &RawPartyMember) -> PartyMember {
    PartyMember {
        id,
        name: raw.name.clone().unwrap_or_default(),
        job: raw.job.clone().unwrap_or_default(),
        hp: meter(raw.hp, raw.hp_max),
        sp: meter(raw.sp, raw.sp_max),
        position: raw.position.unwrap_or_default(),
    }
}

fn danger_zone(raw: &RawDangerZone) -> Option<DangerZone> {
    let radius = raw.radius.filter(|r| r.is_finite() && *r >= 0.0)?;
    Some(DangerZone::new(raw.center?, radius))
}
