use crate::error::ConfigError;

/// Tunable policy for one combat AI instance.
///
/// Immutable for the lifetime of the orchestrator that owns it. All
/// thresholds are fractions of the relevant maximum (HP fraction, threat in
/// `[0, 1]`), distances are map cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CombatAiConfig {
    /// HP fraction below which the character flees unconditionally.
    pub emergency_hp_threshold: f32,
    /// HP fraction below which the character withdraws from combat.
    pub retreat_hp_threshold: f32,
    /// Threat level at or above which a moderately hurt character withdraws.
    pub engage_threat_threshold: f32,
    /// Record per-decision latency samples.
    pub enable_performance_tracking: bool,

    /// Upper HP fraction considered "moderate" for the threat-based retreat.
    pub moderate_hp_threshold: f32,
    /// Withdraw when an MVP or boss is present and there is no party.
    pub retreat_when_solo_vs_boss: bool,
    /// Radius (cells) within which hostile actors count as nearby threats.
    pub threat_radius: f32,
    /// Length (cells) of a single move-away step while retreating.
    pub retreat_distance: f32,
    /// SP fraction that must remain after casting a pre-battle buff.
    pub buff_sp_reserve: f32,
}

impl CombatAiConfig {
    /// Capacity of the rolling decision-latency window.
    pub const METRICS_WINDOW: usize = 100;

    pub const DEFAULT_EMERGENCY_HP_THRESHOLD: f32 = 0.20;
    pub const DEFAULT_RETREAT_HP_THRESHOLD: f32 = 0.35;
    pub const DEFAULT_ENGAGE_THREAT_THRESHOLD: f32 = 0.70;
    pub const DEFAULT_MODERATE_HP_THRESHOLD: f32 = 0.60;
    pub const DEFAULT_THREAT_RADIUS: f32 = 10.0;
    pub const DEFAULT_RETREAT_DISTANCE: f32 = 7.0;
    pub const DEFAULT_BUFF_SP_RESERVE: f32 = 0.30;

    pub fn new() -> Self {
        Self {
            emergency_hp_threshold: Self::DEFAULT_EMERGENCY_HP_THRESHOLD,
            retreat_hp_threshold: Self::DEFAULT_RETREAT_HP_THRESHOLD,
            engage_threat_threshold: Self::DEFAULT_ENGAGE_THREAT_THRESHOLD,
            enable_performance_tracking: true,
            moderate_hp_threshold: Self::DEFAULT_MODERATE_HP_THRESHOLD,
            retreat_when_solo_vs_boss: true,
            threat_radius: Self::DEFAULT_THREAT_RADIUS,
            retreat_distance: Self::DEFAULT_RETREAT_DISTANCE,
            buff_sp_reserve: Self::DEFAULT_BUFF_SP_RESERVE,
        }
    }

    #[must_use]
    pub fn with_emergency_hp_threshold(mut self, value: f32) -> Self {
        self.emergency_hp_threshold = value;
        self
    }

    #[must_use]
    pub fn with_retreat_hp_threshold(mut self, value: f32) -> Self {
        self.retreat_hp_threshold = value;
        self
    }

    #[must_use]
    pub fn with_engage_threat_threshold(mut self, value: f32) -> Self {
        self.engage_threat_threshold = value;
        self
    }

    #[must_use]
    pub fn with_performance_tracking(mut self, enabled: bool) -> Self {
        self.enable_performance_tracking = enabled;
        self
    }

    /// Checks every option against its domain.
    ///
    /// Called by the orchestrator at construction so a bad configuration is
    /// rejected before the first tick rather than in the middle of one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("emergency_hp_threshold", self.emergency_hp_threshold),
            ("retreat_hp_threshold", self.retreat_hp_threshold),
            ("engage_threat_threshold", self.engage_threat_threshold),
            ("moderate_hp_threshold", self.moderate_hp_threshold),
            ("buff_sp_reserve", self.buff_sp_reserve),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        let distances = [
            ("threat_radius", self.threat_radius),
            ("retreat_distance", self.retreat_distance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { name, value });
            }
        }

        if self.emergency_hp_threshold > self.retreat_hp_threshold {
            return Err(ConfigError::ThresholdOrder {
                emergency: self.emergency_hp_threshold,
                retreat: self.retreat_hp_threshold,
            });
        }

        Ok(())
    }
}

impl Default for CombatAiConfig {
    fn default() -> Self {
        Self::new()
    }
}
