//! Per-tick combat state machine.
//!
//! [`CombatAi`] evaluates the rules below in order and stops at the first
//! that applies:
//!
//! 1. **Emergency**: HP under the emergency threshold, flee.
//! 2. **Retreat**: low HP, high threat at moderate HP, or a boss fought
//!    alone; move away from nearby threats.
//! 3. **Engage**: targets present; heal or buff, attack, reposition.
//! 4. **Idle**: nothing to do.
mod combat_ai;
mod policy;
mod state;

pub use combat_ai::CombatAi;
pub use policy::RetreatReason;
pub use state::CombatState;
