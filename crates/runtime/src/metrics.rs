//! Decision latency metrics.
//!
//! Tracks how many decisions were made and a rolling window of the most
//! recent decision times.

use std::time::Duration;

use arrayvec::ArrayVec;
use combat_core::CombatAiConfig;

/// Number of latency samples kept in the rolling window.
pub const WINDOW_CAPACITY: usize = CombatAiConfig::METRICS_WINDOW;

/// Decision metrics owned by one orchestrator.
///
/// The window is a fixed-capacity ring buffer: once full, every new sample
/// overwrites the oldest one.
#[derive(Debug, Clone, Default)]
pub struct CombatMetrics {
    /// Decision times in milliseconds
    samples: ArrayVec<f64, WINDOW_CAPACITY>,

    /// Slot the next sample overwrites once the window is full
    next: usize,

    /// Total number of decisions, timed or not
    decisions_made: u64,
}

impl CombatMetrics {
    /// Creates a new empty metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a timed decision.
    pub fn record(&mut self, elapsed: Duration) {
        let millis = elapsed.as_nanos() as f64 / 1_000_000.0;
        if self.samples.is_full() {
            self.samples[self.next] = millis;
            self.next = (self.next + 1) % WINDOW_CAPACITY;
        } else {
            self.samples.push(millis);
        }
        self.decisions_made += 1;
    }

    /// Records a decision made while latency tracking is disabled.
    pub fn record_untimed(&mut self) {
        self.decisions_made += 1;
    }

    pub fn decisions_made(&self) -> u64 {
        self.decisions_made
    }

    /// Number of samples currently in the window.
    pub fn window_len(&self) -> usize {
        self.samples.len()
    }

    /// Samples in the window, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.samples.split_at(self.next);
        older.iter().chain(newer).copied()
    }

    /// Mean of the window, 0 when empty.
    pub fn average_decision_time_ms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Maximum of the window, 0 when empty.
    pub fn max_decision_time_ms(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Creates a snapshot of all metrics for display/logging.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            decisions_made: self.decisions_made,
            average_decision_time_ms: self.average_decision_time_ms(),
            max_decision_time_ms: self.max_decision_time_ms(),
            window_len: self.window_len(),
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub decisions_made: u64,
    pub average_decision_time_ms: f64,
    pub max_decision_time_ms: f64,
    pub window_len: usize,
}
