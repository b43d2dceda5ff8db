//! Per-tick combat snapshot types.
//!
//! Everything in this module is an immutable value rebuilt every tick. Actor
//! identifiers are only meaningful inside the [`CombatContext`] that produced
//! them.
mod actor;
mod character;
mod common;
mod context;
mod element;

pub use actor::{ActorFlags, MonsterActor, PartyMember, PlayerActor};
pub use character::CharacterState;
pub use common::{ActorId, Position, ResourceMeter};
pub use context::{CombatContext, CombatContextBuilder, ContextFlags, DangerZone, ResolvedActor};
pub use element::{Element, Race, Size};
