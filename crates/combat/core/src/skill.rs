//! Skill descriptors used by skill selection.

use core::fmt;

use crate::state::Element;

/// Skill identifier (the game's skill handle, e.g. `"MG_FIREBOLT"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SkillId(pub String);

impl SkillId {
    /// Handle of the plain weapon attack.
    pub const BASIC_ATTACK: &'static str = "basic_attack";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// What a skill is for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillKind {
    /// Damages an enemy.
    #[default]
    Offensive,
    /// Restores HP of the caster or an ally.
    Heal,
    /// Grants a beneficial status to the caster.
    Buff,
    /// Applies a harmful status (provoke, slow) to an enemy.
    Debuff,
}

/// A learned skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub level: u8,
    pub sp_cost: u32,
    /// Reuse delay in seconds after a cast.
    pub cooldown: f32,
    pub kind: SkillKind,
    pub element: Element,
    /// Cast range in cells.
    pub range: u32,
    /// Area-of-effect radius in cells, 0 for single target.
    pub area: u32,
    /// Relative strength (damage or heal percentage).
    pub power: u32,
    /// Status granted by a buff, used to detect whether it is still active.
    pub grants: Option<String>,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: SkillId::default(),
            name: String::new(),
            level: 1,
            sp_cost: 0,
            cooldown: 0.0,
            kind: SkillKind::Offensive,
            element: Element::Neutral,
            range: 1,
            area: 0,
            power: 100,
            grants: None,
        }
    }
}

impl Skill {
    pub fn new(id: impl Into<String>, kind: SkillKind, sp_cost: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: SkillId(id),
            kind,
            sp_cost,
            ..Self::default()
        }
    }

    /// Plain weapon attack: always affordable, never on cooldown.
    pub fn basic_attack(range: u32) -> Self {
        Self {
            id: SkillId::new(SkillId::BASIC_ATTACK),
            name: "Attack".to_owned(),
            range: range.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: u32) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown = seconds;
        self
    }

    #[must_use]
    pub fn granting(mut self, status: impl Into<String>) -> Self {
        self.grants = Some(status.into());
        self
    }

    pub fn is_basic_attack(&self) -> bool {
        self.id.as_str() == SkillId::BASIC_ATTACK
    }

    pub fn is_offensive(&self) -> bool {
        matches!(self.kind, SkillKind::Offensive | SkillKind::Debuff)
    }
}
