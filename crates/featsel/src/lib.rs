//! featsel: greedy information-theoretic feature selection.
//!
//! Picks a small, non-redundant subset of dataset columns that is jointly
//! informative about a target variable, for use before model fitting.
//!
//! # Key Types
//!
//! - [`CTable`] - Contingency table over discrete features and a target
//! - [`FeatureUniverse`] / [`FeatureSet`] - Candidate and selected feature ids
//! - [`Scorer`] / [`MutualInformation`] - Subset informativeness
//! - [`Redundancy`] / [`PairwiseRedundancy`] - Redundancy discounting
//! - [`GreedySelector`] - The incremental selection engine
//! - [`SelectionConfig`] - High-level configuration builder
//!
//! # Selecting Features
//!
//! Build a [`CTable`], configure with `SelectionConfig::builder()`, then call
//! [`select_features`]. See the [`selection`] module for the lower-level engine.
//!
//! ```
//! use featsel::{select_features, CTable, SelectionConfig};
//! use ndarray::array;
//!
//! // Feature-major: 3 features, 4 samples. Feature 1 equals the target.
//! let features = array![[0u32, 0, 1, 1], [0, 1, 0, 1], [1, 1, 1, 1]];
//! let targets = array![0u32, 1, 0, 1];
//! let table = CTable::from_columns(features.view(), targets.view()).unwrap();
//!
//! let config = SelectionConfig::builder().target_size(1).build().unwrap();
//! let selection = select_features(&table, &config).unwrap();
//! assert_eq!(selection.features(), &[1]);
//! ```

pub mod data;
pub mod error;
pub mod redundancy;
pub mod scoring;
pub mod selection;
pub mod testing;
pub mod universe;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{CTable, DatasetError, FeatureTable};
pub use error::SelectionError;
pub use redundancy::{Aggregation, NoRedundancy, PairwiseRedundancy, Redundancy};
pub use scoring::{MutualInformation, Scorer, ScoringError};
pub use selection::{
    rank_features, select_features, select_features_with_cancel, CancelToken, GreedySelector,
    OnCancel, ParamValidationError, Selection, SelectionConfig, SelectionParams, SelectionStep,
    StopReason, Verbosity,
};
pub use universe::{FeatureId, FeatureSet, FeatureUniverse};
pub use utils::{run_with_threads, Parallelism};
