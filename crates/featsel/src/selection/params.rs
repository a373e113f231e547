//! Parameters consumed by the greedy selection engine.

use serde::{Deserialize, Serialize};

// =============================================================================
// OnCancel
// =============================================================================

/// What a cancelled run returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCancel {
    /// Fail with [`SelectionError::Cancelled`](crate::SelectionError::Cancelled).
    #[default]
    Fail,
    /// Return the features accepted before cancellation.
    KeepSelected,
}

// =============================================================================
// SelectionParams
// =============================================================================

/// Selection parameters.
///
/// Read-only for the duration of a run.
///
/// # Example
///
/// ```
/// use featsel::SelectionParams;
///
/// let params = SelectionParams::new(10, 0.01, 0.5).unwrap();
/// assert_eq!(params.target_size, 10);
///
/// // Negative sizes and intensities outside [0, 1] are rejected.
/// assert!(SelectionParams::new(-1, 0.0, 0.0).is_err());
/// assert!(SelectionParams::new(3, 0.0, 1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Maximum number of features to select. Default: 0.
    ///
    /// 0 disables selection: the whole universe is returned unscored.
    pub target_size: usize,

    /// Minimum adjusted score gain required to accept a candidate. Default: 0.0.
    pub threshold: f64,

    /// Redundancy discount intensity in `[0, 1]`. Default: 0.0 (no discount).
    pub inc_red_intensity: f64,

    /// Behaviour on cancellation. Default: [`OnCancel::Fail`].
    pub on_cancel: OnCancel,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            target_size: 0,
            threshold: 0.0,
            inc_red_intensity: 0.0,
            on_cancel: OnCancel::default(),
        }
    }
}

impl SelectionParams {
    /// Create validated parameters from raw configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ParamValidationError`] if `target_size` is negative, or if
    /// `threshold` / `inc_red_intensity` are outside their valid domain.
    pub fn new(
        target_size: i64,
        threshold: f64,
        inc_red_intensity: f64,
    ) -> Result<Self, ParamValidationError> {
        let target_size = usize::try_from(target_size)
            .map_err(|_| ParamValidationError::InvalidTargetSize(target_size))?;
        let params = Self {
            target_size,
            threshold,
            inc_red_intensity,
            ..Default::default()
        };
        params.validate()?;
        Ok(params)
    }

    /// Set the cancellation behaviour.
    pub fn with_on_cancel(mut self, on_cancel: OnCancel) -> Self {
        self.on_cancel = on_cancel;
        self
    }

    /// Validate parameters.
    ///
    /// Intensities outside `[0, 1]` are rejected rather than clamped.
    ///
    /// # Errors
    ///
    /// Returns error if `threshold` is not finite or `inc_red_intensity` is
    /// not in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !self.threshold.is_finite() {
            return Err(ParamValidationError::InvalidThreshold(self.threshold));
        }
        if !(0.0..=1.0).contains(&self.inc_red_intensity) {
            return Err(ParamValidationError::InvalidIntensity(self.inc_red_intensity));
        }
        Ok(())
    }

    /// Returns `true` if selection is disabled (`target_size == 0`).
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.target_size == 0
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamValidationError {
    /// target_size must be >= 0.
    #[error("target_size must be >= 0, got {0}")]
    InvalidTargetSize(i64),

    /// threshold must be finite.
    #[error("threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    /// inc_red_intensity must be in [0, 1].
    #[error("inc_red_intensity must be in [0, 1], got {0}")]
    InvalidIntensity(f64),
}
