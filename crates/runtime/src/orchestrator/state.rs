/// Phase of the orchestrator, updated by every decision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CombatState {
    #[default]
    Idle,
    /// Inside a decision, before a rule matched.
    Evaluating,
    Engaging,
    Retreating,
    Emergency,
}

impl CombatState {
    /// Whether the last decision was to disengage.
    pub fn is_withdrawing(self) -> bool {
        matches!(self, CombatState::Retreating | CombatState::Emergency)
    }
}
