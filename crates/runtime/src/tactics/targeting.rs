//! Candidate enumeration and skill helpers shared by the role policies.
use core::cmp::Ordering;

use combat_core::{
    ActorFlags, ActorId, CombatContext, Element, Position, ResourceMeter, Skill, SkillKind,
    TargetPriority,
};

/// Something the character could attack this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Candidate {
    pub id: ActorId,
    pub position: Position,
    pub hp: ResourceMeter,
    pub flags: ActorFlags,
    pub element: Element,
    pub is_monster: bool,
    /// Distance from the character.
    pub distance: f32,
}

impl Candidate {
    pub fn hp_fraction(&self) -> f32 {
        self.hp.fraction()
    }

    /// Monsters that engage on their own, and every opponent player.
    pub fn is_threatening(&self) -> bool {
        !self.is_monster || self.flags.is_threatening()
    }

    pub fn priority(&self, priority: f32, reason: &str) -> TargetPriority {
        if self.is_monster {
            TargetPriority::monster(self.id, priority, reason)
        } else {
            TargetPriority::player(self.id, priority, reason)
        }
    }

    /// Short label for logs and target reasons.
    pub fn kind_label(&self) -> &'static str {
        if !self.is_monster {
            "opponent"
        } else if self.flags.contains(ActorFlags::MVP) {
            "mvp"
        } else if self.flags.contains(ActorFlags::BOSS) {
            "boss"
        } else if self.flags.contains(ActorFlags::AGGRESSIVE) {
            "aggressive"
        } else {
            "passive"
        }
    }
}

/// Live monsters followed by opponent players, in snapshot order.
pub(crate) fn candidates(ctx: &CombatContext) -> Vec<Candidate> {
    let origin = ctx.character().position;
    let monsters = ctx.live_monsters().map(|m| Candidate {
        id: m.id,
        position: m.position,
        hp: m.hp,
        flags: m.flags,
        element: m.element,
        is_monster: true,
        distance: origin.distance(m.position),
    });
    let players = ctx.opponents().map(|p| Candidate {
        id: p.id,
        position: p.position,
        hp: p.hp,
        flags: p.flags,
        element: p.element,
        is_monster: false,
        distance: origin.distance(p.position),
    });
    monsters.chain(players).collect()
}

/// Candidate named by a previously selected target.
pub(crate) fn find(ctx: &CombatContext, id: ActorId) -> Option<Candidate> {
    candidates(ctx).into_iter().find(|c| c.id == id)
}

pub(crate) fn by_distance(a: &Candidate, b: &Candidate) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

/// Closest candidate; ties go to the earliest in snapshot order.
pub(crate) fn nearest<'a, I>(candidates: I) -> Option<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates.into_iter().min_by(|a, b| by_distance(a, b))
}

/// Aggressive monsters standing within `radius` of the character.
pub(crate) fn aggressive_within(ctx: &CombatContext, radius: f32) -> impl Iterator<Item = Position> {
    let origin = ctx.character().position;
    ctx.live_monsters()
        .filter(move |m| m.is_aggressive() && origin.distance(m.position) <= radius)
        .map(|m| m.position)
}

/// Usable damaging skills, excluding the basic attack.
pub(crate) fn usable_offensive(ctx: &CombatContext) -> impl Iterator<Item = &Skill> {
    ctx.character()
        .usable_skills(SkillKind::Offensive)
        .filter(|skill| !skill.is_basic_attack())
}

/// Whether `skill` reaches a target `distance` cells away.
pub(crate) fn reaches(skill: &Skill, distance: f32) -> bool {
    distance <= skill.range as f32 + f32::EPSILON
}

/// Strongest of `skills` by power; ties go to the first learned.
pub(crate) fn strongest<'a, I>(skills: I) -> Option<&'a Skill>
where
    I: IntoIterator<Item = &'a Skill>,
{
    skills
        .into_iter()
        .min_by(|a, b| b.power.cmp(&a.power))
}

/// Strongest usable damaging skill reaching `distance`, else the basic attack.
pub(crate) fn strongest_or_basic(ctx: &CombatContext, distance: f32) -> Skill {
    strongest(usable_offensive(ctx).filter(|skill| reaches(skill, distance)))
        .cloned()
        .unwrap_or_else(|| ctx.character().basic_attack())
}
