//! Top-level error type for feature selection.

use crate::data::DatasetError;
use crate::scoring::ScoringError;
use crate::selection::ParamValidationError;

/// Errors surfaced by a selection run.
///
/// A failed run never yields a partial feature set.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The dataset reported a negative or unusable arity.
    #[error("invalid dataset arity: {arity}")]
    InvalidArity { arity: i64 },

    /// The dataset could not be built.
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Selection parameters are outside their valid domain.
    #[error("invalid selection parameter: {0}")]
    InvalidParameter(#[from] ParamValidationError),

    /// The scorer or redundancy measure could not produce a valid score.
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    /// The run was cancelled before reaching a stopping rule.
    #[error("selection cancelled after {completed_steps} accepted features")]
    Cancelled { completed_steps: usize },

    /// The worker thread pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
