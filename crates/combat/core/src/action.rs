//! Decision outputs: target priorities and executor-facing actions.

use crate::skill::{Skill, SkillId};
use crate::state::{ActorId, Position};

/// Result of target selection.
///
/// `target_id` always names an actor of the context the priority was
/// computed from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetPriority {
    pub target_id: ActorId,
    /// Higher is more urgent. Only comparable within one selection.
    pub priority: f32,
    pub reason: String,
    pub is_monster: bool,
}

impl TargetPriority {
    pub fn monster(target_id: ActorId, priority: f32, reason: impl Into<String>) -> Self {
        Self {
            target_id,
            priority,
            reason: reason.into(),
            is_monster: true,
        }
    }

    pub fn player(target_id: ActorId, priority: f32, reason: impl Into<String>) -> Self {
        Self {
            target_id,
            priority,
            reason: reason.into(),
            is_monster: false,
        }
    }
}

/// Kind of action handed to the executor.
#[derive(
    Clone,
    Copy,
    Debug,
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
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActionType {
    Attack,
    Skill,
    Move,
    Flee,
    Buff,
    Heal,
    Idle,
}

impl ActionType {
    /// Actions that damage or debuff an enemy.
    pub const fn is_offensive(self) -> bool {
        matches!(self, ActionType::Attack | ActionType::Skill)
    }
}

/// Action-specific data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum ActionPayload {
    #[default]
    None,
    Skill { skill: SkillId, level: u8 },
    Destination { position: Position },
}

/// One executor-facing action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub action_type: ActionType,
    pub target_id: Option<ActorId>,
    /// 0-10, higher runs first.
    pub priority: u8,
    pub payload: ActionPayload,
}

impl CombatAction {
    pub const EMERGENCY_PRIORITY: u8 = 10;
    pub const RETREAT_PRIORITY: u8 = 9;
    pub const SUPPORT_PRIORITY: u8 = 8;
    pub const URGENT_MOVE_PRIORITY: u8 = 7;
    pub const ATTACK_PRIORITY: u8 = 6;
    pub const FOLLOW_UP_MOVE_PRIORITY: u8 = 4;

    /// Disengage without a specific destination.
    pub fn flee(priority: u8) -> Self {
        Self {
            action_type: ActionType::Flee,
            target_id: None,
            priority,
            payload: ActionPayload::None,
        }
    }

    pub fn move_to(position: Position, priority: u8) -> Self {
        Self {
            action_type: ActionType::Move,
            target_id: None,
            priority,
            payload: ActionPayload::Destination { position },
        }
    }

    /// Attacks `target` with `skill`; the basic attack becomes `ATTACK`.
    pub fn offensive(target: ActorId, skill: &Skill, priority: u8) -> Self {
        if skill.is_basic_attack() {
            return Self {
                action_type: ActionType::Attack,
                target_id: Some(target),
                priority,
                payload: ActionPayload::None,
            };
        }
        Self {
            action_type: ActionType::Skill,
            target_id: Some(target),
            priority,
            payload: Self::skill_payload(skill),
        }
    }

    /// Self-cast buff.
    pub fn buff(skill: &Skill, priority: u8) -> Self {
        Self {
            action_type: ActionType::Buff,
            target_id: None,
            priority,
            payload: Self::skill_payload(skill),
        }
    }

    pub fn heal(target: ActorId, skill: &Skill, priority: u8) -> Self {
        Self {
            action_type: ActionType::Heal,
            target_id: Some(target),
            priority,
            payload: Self::skill_payload(skill),
        }
    }

    pub fn is_offensive(&self) -> bool {
        self.action_type.is_offensive()
    }

    /// Destination of a move, if any.
    pub fn destination(&self) -> Option<Position> {
        match self.payload {
            ActionPayload::Destination { position } => Some(position),
            _ => None,
        }
    }

    fn skill_payload(skill: &Skill) -> ActionPayload {
        ActionPayload::Skill {
            skill: skill.id.clone(),
            level: skill.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillKind;

    #[test]
    fn basic_attack_maps_to_attack() {
        let action = CombatAction::offensive(ActorId(3), &Skill::basic_attack(1), 6);
        assert_eq!(action.action_type, ActionType::Attack);
        assert_eq!(action.payload, ActionPayload::None);
        assert!(action.is_offensive());
    }

    #[test]
    fn skill_attack_carries_payload() {
        let bolt = Skill::new("MG_FIREBOLT", SkillKind::Offensive, 20);
        let action = CombatAction::offensive(ActorId(3), &bolt, 6);
        assert_eq!(action.action_type, ActionType::Skill);
        assert_eq!(
            action.payload,
            ActionPayload::Skill {
                skill: SkillId::new("MG_FIREBOLT"),
                level: 1
            }
        );
    }

    #[test]
    fn flee_and_move_are_not_offensive() {
        assert!(!CombatAction::flee(10).is_offensive());
        let step = CombatAction::move_to(Position::new(4, 4), 9);
        assert!(!step.is_offensive());
        assert_eq!(step.destination(), Some(Position::new(4, 4)));
    }
}
