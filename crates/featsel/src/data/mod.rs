//! Dataset access for feature selection.
//!
//! Selection never reads raw rows. Scorers and redundancy measures read a
//! [`CTable`], a compressed contingency table of discrete input rows against
//! target values.

mod ctable;
mod error;

pub use ctable::{CTable, TargetCounts};
pub use error::DatasetError;

/// A read-only table whose columns are candidate features.
pub trait FeatureTable: Sync {
    /// Number of feature columns.
    fn arity(&self) -> usize;
}
