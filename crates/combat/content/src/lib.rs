//! Data-driven content and the snapshot boundary of the combat core.
//!
//! This crate houses everything that reads external, loosely shaped data:
//! - Combat AI configuration (data-driven via TOML)
//! - Per-job skill catalogs (data-driven via RON, with embedded defaults)
//! - Game-state snapshots, attribute-style ([`RawSnapshot`]) or
//!   mapping-style (JSON), normalized into a [`combat_core::CombatContext`]
//!
//! Nothing downstream of [`SnapshotAdapter`] ever sees the raw shape.

pub mod loaders;
pub mod snapshot;

pub use loaders::{ConfigLoader, LoadResult, SkillCatalog};
pub use snapshot::{
    RawActor, RawCharacter, RawDangerZone, RawPartyMember, RawSkill, RawSnapshot, SnapshotAdapter,
};
