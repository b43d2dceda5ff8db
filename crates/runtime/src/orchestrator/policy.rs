//! Emergency and retreat rules.
use combat_core::{CombatAction, CombatAiConfig, CombatContext, Position};

use crate::positioning;

/// Why the character is withdrawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RetreatReason {
    LowHealth,
    /// High threat while only moderately healthy.
    Overwhelmed,
    /// MVP or boss nearby with no party.
    SoloVersusBoss,
}

pub(crate) fn is_emergency(config: &CombatAiConfig, ctx: &CombatContext) -> bool {
    ctx.hp_fraction() < config.emergency_hp_threshold
}

pub(crate) fn retreat_reason(config: &CombatAiConfig, ctx: &CombatContext) -> Option<RetreatReason> {
    let hp = ctx.hp_fraction();
    if hp < config.retreat_hp_threshold {
        return Some(RetreatReason::LowHealth);
    }
    if ctx.threat_level() >= config.engage_threat_threshold && hp < config.moderate_hp_threshold {
        return Some(RetreatReason::Overwhelmed);
    }
    if config.retreat_when_solo_vs_boss && ctx.is_solo() && (ctx.has_mvp() || ctx.has_boss()) {
        return Some(RetreatReason::SoloVersusBoss);
    }
    None
}

/// Move directly away from the centroid of nearby threats; a plain flee when
/// no threat is within the threat radius.
pub(crate) fn retreat_action(config: &CombatAiConfig, ctx: &CombatContext) -> CombatAction {
    match Position::centroid(ctx.threats_within(config.threat_radius)) {
        Some(center) => CombatAction::move_to(
            positioning::retreat_from(ctx, center, config.retreat_distance),
            CombatAction::RETREAT_PRIORITY,
        ),
        None => CombatAction::flee(CombatAction::RETREAT_PRIORITY),
    }
}
