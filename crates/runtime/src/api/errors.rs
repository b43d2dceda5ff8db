//! Unified error types surfaced by the combat runtime.
//!
//! Configuration failures are returned to the caller. Faults raised while
//! assembling a decision never escape [`crate::CombatAi::decide`]; they are
//! logged and downgraded to a safe action list.
use combat_core::{ActorId, CombatError, ConfigError, ErrorSeverity, SkillId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Config(err) => err.error_code(),
        }
    }
}

/// Inconsistency detected while assembling an action list.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DecisionFault {
    #[error("target {target} does not resolve in snapshot {generation}")]
    DanglingTarget { target: ActorId, generation: u64 },

    #[error("skill {skill} costs {sp_cost} SP but only {available} is available")]
    UnaffordableSkill {
        skill: SkillId,
        sp_cost: u32,
        available: u32,
    },

    #[error("skill {skill} is cooling down for {remaining:.2}s")]
    SkillOnCooldown { skill: SkillId, remaining: f32 },

    #[error("{what} evaluated to a non-finite value")]
    NonFiniteScore { what: &'static str },
}

impl CombatError for DecisionFault {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            DecisionFault::DanglingTarget { .. } => "DECISION_DANGLING_TARGET",
            DecisionFault::UnaffordableSkill { .. } => "DECISION_UNAFFORDABLE_SKILL",
            DecisionFault::SkillOnCooldown { .. } => "DECISION_SKILL_ON_COOLDOWN",
            DecisionFault::NonFiniteScore { .. } => "DECISION_NON_FINITE_SCORE",
        }
    }
}
