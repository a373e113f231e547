//! Scoring feature subsets against the target variable.
//!
//! - [`Scorer`]: Trait for measuring how informative a subset is
//! - [`MutualInformation`]: `I(X_S; Y)` estimated from a [`CTable`](crate::CTable)
//! - [`entropy`]: Information-theory primitives in bits
//!
//! Scores are finite reals, higher is better. NaN or infinite values are
//! never coerced: [`checked`] turns them into [`ScoringError::NonFinite`].

pub mod entropy;
mod mutual_info;

pub use mutual_info::MutualInformation;

use crate::universe::FeatureId;

/// Errors raised while scoring a subset or a candidate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("feature {feature} is out of range for arity {arity}")]
    FeatureOutOfRange { feature: FeatureId, arity: usize },

    #[error("score is not finite: {value}")]
    NonFinite { value: f64 },

    #[error("redundancy must be non-negative, got {value}")]
    NegativeRedundancy { value: f64 },

    /// Failure reported by a custom estimator.
    #[error("estimator failed: {0}")]
    Estimator(String),
}

/// Measures how informative a feature subset is about the target.
///
/// Implementations must be pure: the same subset always yields the same
/// score for a fixed dataset. The empty subset yields the estimator's
/// baseline score.
pub trait Scorer: Sync {
    /// Score of `subset`.
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError>;

    /// Score of `subset ∪ {candidate}`.
    ///
    /// Override when the extended score can be computed more cheaply than a
    /// full [`score`](Self::score) call.
    fn score_with(&self, subset: &[FeatureId], candidate: FeatureId) -> Result<f64, ScoringError> {
        let mut extended = Vec::with_capacity(subset.len() + 1);
        extended.extend_from_slice(subset);
        extended.push(candidate);
        self.score(&extended)
    }
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        (**self).score(subset)
    }

    fn score_with(&self, subset: &[FeatureId], candidate: FeatureId) -> Result<f64, ScoringError> {
        (**self).score_with(subset, candidate)
    }
}

/// Reject NaN and infinite values.
#[inline]
pub fn checked(value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { value })
    }
}

/// Fail with [`ScoringError::FeatureOutOfRange`] if any id is `>= arity`.
pub(crate) fn check_range(ids: &[FeatureId], arity: usize) -> Result<(), ScoringError> {
    match ids.iter().find(|&&f| f >= arity) {
        Some(&feature) => Err(ScoringError::FeatureOutOfRange { feature, arity }),
        None => Ok(()),
    }
}
