//! Common error infrastructure for combat-core.
//!
//! Only configuration problems are surfaced as errors by this crate. Snapshot
//! defects are normalized away by the adapter, and "nothing to do" outcomes
//! are modelled as `None` or empty lists rather than failures.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input rejected at a boundary (bad config, unknown role).
    ///
    /// Should not be retried without changing the input.
    Validation,

    /// Unexpected inconsistency inside a decision cycle.
    ///
    /// Examples: tactics referencing an actor that is not in the context.
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all combat errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for asserting on errors in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Configuration-kind errors raised before any decision cycle runs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Role name does not match any known tactical role.
    #[error("unknown tactical role `{0}`")]
    UnknownRole(String),

    /// A fractional threshold is outside `[0, 1]` or not finite.
    #[error("{name} must be a finite fraction in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    /// A distance/radius option is negative or not finite.
    #[error("{name} must be a finite non-negative distance, got {value}")]
    InvalidDistance { name: &'static str, value: f32 },

    /// Emergency must trigger at or below the retreat threshold.
    #[error("emergency_hp_threshold ({emergency}) exceeds retreat_hp_threshold ({retreat})")]
    ThresholdOrder { emergency: f32, retreat: f32 },
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            UnknownRole(_) => "CONFIG_UNKNOWN_ROLE",
            ThresholdOutOfRange { .. } => "CONFIG_THRESHOLD_OUT_OF_RANGE",
            InvalidDistance { .. } => "CONFIG_INVALID_DISTANCE",
            ThresholdOrder { .. } => "CONFIG_THRESHOLD_ORDER",
        }
    }
}
