use std::collections::BTreeMap;

use super::common::{ActorId, Position, ResourceMeter};
use crate::skill::{Skill, SkillId, SkillKind};

/// The controlled character, rebuilt fresh every tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: ActorId,
    pub name: String,
    /// Job identifier as reported by the game (`"knight"`, `"high_priest"`).
    pub job: String,
    pub level: u32,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub position: Position,
    /// Reach of the equipped weapon, in cells.
    pub attack_range: u32,
    pub buffs: Vec<String>,
    pub debuffs: Vec<String>,
    /// Remaining reuse delay in seconds, by skill.
    pub cooldowns: BTreeMap<SkillId, f32>,
    pub skills: Vec<Skill>,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            id: ActorId::default(),
            name: String::new(),
            job: String::new(),
            level: 1,
            hp: ResourceMeter::default(),
            sp: ResourceMeter::default(),
            position: Position::ORIGIN,
            attack_range: 1,
            buffs: Vec::new(),
            debuffs: Vec::new(),
            cooldowns: BTreeMap::new(),
            skills: Vec::new(),
        }
    }
}

impl CharacterState {
    pub fn new(hp: ResourceMeter, sp: ResourceMeter) -> Self {
        Self {
            hp,
            sp,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_attack_range(mut self, range: u32) -> Self {
        self.attack_range = range;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_buff(mut self, status: impl Into<String>) -> Self {
        self.buffs.push(status.into());
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, skill: impl Into<SkillId>, remaining: f32) -> Self {
        self.cooldowns.insert(skill.into(), remaining);
        self
    }

    pub fn hp_fraction(&self) -> f32 {
        self.hp.fraction()
    }

    pub fn sp_fraction(&self) -> f32 {
        self.sp.fraction()
    }

    pub fn has_buff(&self, status: &str) -> bool {
        self.buffs.iter().any(|b| b.eq_ignore_ascii_case(status))
    }

    pub fn has_debuff(&self, status: &str) -> bool {
        self.debuffs.iter().any(|d| d.eq_ignore_ascii_case(status))
    }

    /// Remaining cooldown in seconds, zero when the skill is not listed.
    pub fn cooldown_remaining(&self, skill: &SkillId) -> f32 {
        self.cooldowns.get(skill).copied().unwrap_or(0.0)
    }

    /// A skill is usable when its SP cost is covered and it is not cooling down.
    pub fn can_use(&self, skill: &Skill) -> bool {
        skill.sp_cost <= self.sp.current && self.cooldown_remaining(&skill.id) <= 0.0
    }

    /// Learned skills of one kind that are usable right now, in learned order.
    pub fn usable_skills(&self, kind: SkillKind) -> impl Iterator<Item = &Skill> {
        self.skills
            .iter()
            .filter(move |skill| skill.kind == kind && self.can_use(skill))
    }

    /// Plain weapon attack at the character's reach.
    pub fn basic_attack(&self) -> Skill {
        Skill::basic_attack(self.attack_range)
    }
}
