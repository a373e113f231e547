//! Verbosity-gated progress logging for selection runs.
//!
//! Events go through `tracing`; the library never installs a subscriber.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::engine::{SelectionStep, StopReason};
use super::params::SelectionParams;
use crate::scoring::ScoringError;

/// Verbosity level for selection output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Failures only.
    Warning,
    /// Start, stop, and summary.
    Info,
    /// Every accepted feature.
    Debug,
}

/// Logger for a single selection run.
#[derive(Debug)]
pub struct SelectionLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
}

impl SelectionLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
        }
    }

    #[inline]
    fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn start_selection(&mut self, n_candidates: usize, params: &SelectionParams) {
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            tracing::info!(
                n_candidates,
                target_size = params.target_size,
                threshold = params.threshold,
                inc_red_intensity = params.inc_red_intensity,
                "starting greedy feature selection"
            );
        }
    }

    pub fn log_step(&self, step_index: usize, step: &SelectionStep) {
        if self.enabled(Verbosity::Debug) {
            tracing::debug!(
                step = step_index,
                feature = step.feature,
                raw_delta = step.raw_delta,
                adjusted_delta = step.adjusted_delta,
                score = step.score,
                "accepted feature"
            );
        }
    }

    pub fn log_failure(&self, completed_steps: usize, error: &ScoringError) {
        if self.enabled(Verbosity::Warning) {
            tracing::warn!(completed_steps, %error, "feature selection aborted");
        }
    }

    pub fn log_cancelled(&self, completed_steps: usize) {
        if self.enabled(Verbosity::Warning) {
            tracing::warn!(completed_steps, "feature selection cancelled");
        }
    }

    pub fn finish_selection(&self, n_selected: usize, score: f64, stop_reason: &StopReason) {
        if self.enabled(Verbosity::Info) {
            let elapsed_ms = self
                .started
                .map(|t| t.elapsed().as_secs_f64() * 1e3)
                .unwrap_or(0.0);
            tracing::info!(
                n_selected,
                score,
                stop_reason = ?stop_reason,
                elapsed_ms,
                "feature selection finished"
            );
        }
    }
}
