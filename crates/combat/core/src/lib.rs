//! Deterministic combat model shared by the decision runtime and loaders.
//!
//! `combat-core` defines the canonical per-tick value types (character,
//! nearby actors, party, situational flags), the threat quantification
//! function, and the vocabulary of decisions (roles, skills, actions).
//! Everything here is pure: no I/O, no clocks, no logging. Downstream crates
//! build a [`CombatContext`] once per tick and hand it to the runtime.
pub mod action;
pub mod config;
pub mod error;
pub mod role;
pub mod skill;
pub mod state;
pub mod threat;

pub use action::{ActionPayload, ActionType, CombatAction, TargetPriority};
pub use config::CombatAiConfig;
pub use error::{CombatError, ConfigError, ErrorSeverity};
pub use role::TacticalRole;
pub use skill::{Skill, SkillId, SkillKind};
pub use state::{
    ActorFlags, ActorId, CharacterState, CombatContext, CombatContextBuilder, ContextFlags,
    DangerZone, Element, MonsterActor, PartyMember, PlayerActor, Position, Race, ResolvedActor,
    ResourceMeter, Size,
};
pub use threat::assess as assess_threat;
