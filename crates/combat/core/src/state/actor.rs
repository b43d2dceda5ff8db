use bitflags::bitflags;

use super::common::{ActorId, Position, ResourceMeter};
use super::element::{Element, Race, Size};

bitflags! {
    /// Behavioural flags reported for nearby actors.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorFlags: u8 {
        const AGGRESSIVE = 1 << 0;
        const BOSS       = 1 << 1;
        const MVP        = 1 << 2;
        const HOSTILE    = 1 << 3;
        const ENEMY      = 1 << 4;
    }
}

impl ActorFlags {
    /// Aggressive, boss or MVP: actors that will engage on their own.
    pub fn is_threatening(self) -> bool {
        self.intersects(ActorFlags::AGGRESSIVE | ActorFlags::BOSS | ActorFlags::MVP)
    }

    /// Hostile or enemy: players that may be attacked in PvP modes.
    pub fn is_opponent(self) -> bool {
        self.intersects(ActorFlags::HOSTILE | ActorFlags::ENEMY)
    }
}

/// A monster observed this tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterActor {
    pub id: ActorId,
    pub name: String,
    pub hp: ResourceMeter,
    pub position: Position,
    pub flags: ActorFlags,
    pub element: Element,
    pub race: Race,
    pub size: Size,
    /// Reach of the monster's own attacks, in cells.
    pub attack_range: u32,
    pub skills: Vec<String>,
}

impl MonsterActor {
    pub fn new(id: ActorId, name: impl Into<String>, hp: ResourceMeter, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            hp,
            position,
            flags: ActorFlags::empty(),
            element: Element::Neutral,
            race: Race::Formless,
            size: Size::Medium,
            attack_range: 1,
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ActorFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_attack_range(mut self, range: u32) -> Self {
        self.attack_range = range;
        self
    }

    pub fn is_aggressive(&self) -> bool {
        self.flags.contains(ActorFlags::AGGRESSIVE)
    }

    pub fn is_boss(&self) -> bool {
        self.flags.contains(ActorFlags::BOSS)
    }

    pub fn is_mvp(&self) -> bool {
        self.flags.contains(ActorFlags::MVP)
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }
}

/// Another player observed this tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerActor {
    pub id: ActorId,
    pub name: String,
    pub job: String,
    pub hp: ResourceMeter,
    pub position: Position,
    pub flags: ActorFlags,
    pub element: Element,
    pub attack_range: u32,
    pub skills: Vec<String>,
}

impl PlayerActor {
    pub fn new(id: ActorId, name: impl Into<String>, hp: ResourceMeter, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            job: String::new(),
            hp,
            position,
            flags: ActorFlags::empty(),
            element: Element::Neutral,
            attack_range: 1,
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ActorFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Hostile or enemy player.
    pub fn is_opponent(&self) -> bool {
        self.flags.is_opponent()
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }
}

/// A member of the character's party.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub id: ActorId,
    pub name: String,
    pub job: String,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub position: Position,
}

impl PartyMember {
    pub fn new(id: ActorId, name: impl Into<String>, hp: ResourceMeter, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            job: String::new(),
            hp,
            sp: ResourceMeter::default(),
            position,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }
}
