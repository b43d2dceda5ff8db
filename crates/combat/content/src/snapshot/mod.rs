//! Snapshot normalization boundary.
//!
//! Hosts hand over game state either attribute-style, by filling a
//! [`RawSnapshot`], or mapping-style, as a JSON object whose keys may use
//! several spellings. Both are read leniently: absent or wrongly typed fields
//! take safe defaults, never errors. [`SnapshotAdapter`] turns either shape
//! into the canonical [`combat_core::CombatContext`].
mod adapter;
mod mapping;
mod raw;

pub use adapter::SnapshotAdapter;
pub use raw::{RawActor, RawCharacter, RawDangerZone, RawPartyMember, RawSkill, RawSnapshot};
