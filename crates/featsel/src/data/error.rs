//! Errors raised while building a contingency table.

/// Errors that can occur when constructing a [`CTable`](super::CTable).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("input row has {got} values, table arity is {expected}")]
    InconsistentArity { expected: usize, got: usize },

    #[error("count {0} is negative, not finite, or overflows the table total")]
    InvalidCount(f64),

    #[error("sample count mismatch: features have {features} samples, targets have {targets}")]
    LengthMismatch { features: usize, targets: usize },
}
