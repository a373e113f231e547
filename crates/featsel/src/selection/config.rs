//! High-level selection configuration and entry points.
//!
//! [`SelectionConfig`] bundles the engine parameters with the choice of
//! redundancy aggregation, thread count, and verbosity. [`select_features`]
//! runs mutual-information selection on a [`CTable`] with that configuration.
//!
//! # Example
//!
//! ```
//! use featsel::{Aggregation, SelectionConfig, Verbosity};
//!
//! // All defaults: selection disabled, every feature is returned.
//! let config = SelectionConfig::builder().build().unwrap();
//! assert!(config.params().is_disabled());
//!
//! let config = SelectionConfig::builder()
//!     .target_size(8)
//!     .threshold(0.01)
//!     .inc_red_intensity(0.5)
//!     .aggregation(Aggregation::Mean)
//!     .n_threads(1)
//!     .verbosity(Verbosity::Info)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.target_size, 8);
//! ```

use bon::Builder;

use super::cancel::CancelToken;
use super::engine::{GreedySelector, Selection};
use super::logger::Verbosity;
use super::params::{OnCancel, ParamValidationError, SelectionParams};
use crate::data::CTable;
use crate::error::SelectionError;
use crate::redundancy::{Aggregation, PairwiseRedundancy};
use crate::scoring::MutualInformation;
use crate::universe::FeatureUniverse;
use crate::utils::run_with_threads;

// =============================================================================
// SelectionConfig
// =============================================================================

/// Configuration for a mutual-information selection run.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct SelectionConfig {
    /// Maximum number of features to select. Default: 0 (selection disabled).
    #[builder(default)]
    pub target_size: usize,

    /// Minimum adjusted gain, in bits, to accept a feature. Default: 0.0.
    #[builder(default = 0.0)]
    pub threshold: f64,

    /// Redundancy discount intensity in `[0, 1]`. Default: 0.0.
    #[builder(default = 0.0)]
    pub inc_red_intensity: f64,

    /// How pairwise redundancy with selected features is combined. Default: `Max`.
    #[builder(default)]
    pub aggregation: Aggregation,

    /// Behaviour on cancellation. Default: `Fail`.
    #[builder(default)]
    pub on_cancel: OnCancel,

    /// Number of threads: 0 = auto, 1 = sequential, n = exactly n. Default: 0.
    #[builder(default)]
    pub n_threads: usize,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: selection_config_builder::IsComplete> SelectionConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParamValidationError`] if `threshold` is not finite or
    /// `inc_red_intensity` is outside `[0, 1]`.
    pub fn build(self) -> Result<SelectionConfig, ParamValidationError> {
        let config = self.__build_internal();
        config.params().validate()?;
        Ok(config)
    }
}

impl SelectionConfig {
    /// Engine parameters for this configuration.
    pub fn params(&self) -> SelectionParams {
        SelectionParams {
            target_size: self.target_size,
            threshold: self.threshold,
            inc_red_intensity: self.inc_red_intensity,
            on_cancel: self.on_cancel,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Select features of `table` by mutual information with its target.
///
/// With `target_size == 0` the full universe `[0, arity)` is returned
/// without scoring. Otherwise runs [`GreedySelector`] with a
/// [`MutualInformation`] scorer and [`PairwiseRedundancy`], on a thread
/// pool sized by `config.n_threads`.
pub fn select_features(table: &CTable, config: &SelectionConfig) -> Result<Selection, SelectionError> {
    select_inner(table, config, None)
}

/// Like [`select_features`], checking `cancel` before every step.
pub fn select_features_with_cancel(
    table: &CTable,
    config: &SelectionConfig,
    cancel: &CancelToken,
) -> Result<Selection, SelectionError> {
    select_inner(table, config, Some(cancel))
}

fn select_inner(
    table: &CTable,
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
) -> Result<Selection, SelectionError> {
    let universe = FeatureUniverse::from_table(table);
    let params = config.params();
    params.validate()?;
    if params.is_disabled() {
        return Ok(Selection::disabled(&universe));
    }

    let selector = GreedySelector::new(
        MutualInformation::new(table),
        PairwiseRedundancy::new(table, config.aggregation),
        params,
    )
    .with_verbosity(config.verbosity);

    run_with_threads(config.n_threads, |parallelism| {
        selector.run(&universe, cancel, parallelism)
    })?
}
