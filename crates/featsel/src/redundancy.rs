//! Redundancy control for incremental selection.
//!
//! A candidate that mostly repeats what the selected features already say
//! should be worth less than its raw score gain. A [`Redundancy`] measure
//! reports how much a candidate overlaps the selected set, and
//! [`Redundancy::adjust`] discounts the raw gain by that amount scaled by an
//! intensity in `[0, 1]`:
//!
//! ```text
//! adjusted = raw - intensity * redundancy(candidate, selected)
//! ```
//!
//! Since redundancy is non-negative, raising the intensity never raises the
//! adjusted gain, and an intensity of 0 leaves the raw gain untouched.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::data::CTable;
use crate::scoring::{checked, MutualInformation, ScoringError};
use crate::universe::FeatureId;

/// Measures how redundant a candidate is with already-selected features.
pub trait Redundancy: Sync {
    /// Non-negative overlap between `candidate` and `selected`.
    ///
    /// Only called with a non-empty `selected`.
    fn redundancy(&self, candidate: FeatureId, selected: &[FeatureId]) -> Result<f64, ScoringError>;

    /// Discount `raw_delta` by `intensity` times the candidate's redundancy.
    ///
    /// With `intensity == 0` or nothing selected, returns `raw_delta`
    /// unchanged without evaluating the measure.
    ///
    /// # Errors
    ///
    /// Fails if the measure errors, or returns a negative or non-finite value.
    fn adjust(
        &self,
        raw_delta: f64,
        candidate: FeatureId,
        selected: &[FeatureId],
        intensity: f64,
    ) -> Result<f64, ScoringError> {
        if intensity == 0.0 || selected.is_empty() {
            return Ok(raw_delta);
        }
        let redundancy = checked(self.redundancy(candidate, selected)?)?;
        if redundancy < 0.0 {
            return Err(ScoringError::NegativeRedundancy { value: redundancy });
        }
        checked(raw_delta - intensity * redundancy)
    }
}

impl<R: Redundancy + ?Sized> Redundancy for &R {
    fn redundancy(&self, candidate: FeatureId, selected: &[FeatureId]) -> Result<f64, ScoringError> {
        (**self).redundancy(candidate, selected)
    }
}

// =============================================================================
// NoRedundancy
// =============================================================================

/// Measure that never discounts: every candidate has zero redundancy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedundancy;

impl Redundancy for NoRedundancy {
    #[inline]
    fn redundancy(&self, _candidate: FeatureId, _selected: &[FeatureId]) -> Result<f64, ScoringError> {
        Ok(0.0)
    }
}

// =============================================================================
// PairwiseRedundancy
// =============================================================================

/// How pairwise overlaps with each selected feature are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Strongest single overlap.
    #[default]
    Max,
    /// Average overlap (the mRMR criterion).
    Mean,
}

/// Redundancy as pairwise mutual information `I(X_c; X_s)` between the
/// candidate and each selected feature, aggregated by [`Aggregation`].
///
/// Each pair costs one scan of the table the first time it is asked for;
/// later steps reuse the cached value. The cache holds at most one entry per
/// (candidate, selected feature) pair seen during a run.
///
/// # Example
///
/// ```
/// use featsel::{Aggregation, CTable, PairwiseRedundancy, Redundancy};
/// use ndarray::array;
///
/// // Feature 1 duplicates feature 0.
/// let features = array![[0u32, 1, 0, 1], [0, 1, 0, 1]];
/// let targets = array![0u32, 1, 0, 1];
/// let table = CTable::from_columns(features.view(), targets.view()).unwrap();
///
/// let redundancy = PairwiseRedundancy::new(&table, Aggregation::Max);
/// let adjusted = redundancy.adjust(1.0, 1, &[0], 0.5).unwrap();
/// assert!((adjusted - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct PairwiseRedundancy<'a> {
    mi: MutualInformation<'a>,
    aggregation: Aggregation,
    /// `I(X_a; X_b)` keyed by `(min, max)`.
    pairs: RwLock<BTreeMap<(FeatureId, FeatureId), f64>>,
}

impl<'a> PairwiseRedundancy<'a> {
    pub fn new(table: &'a CTable, aggregation: Aggregation) -> Self {
        Self {
            mi: MutualInformation::new(table),
            aggregation,
            pairs: RwLock::new(BTreeMap::new()),
        }
    }

    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Pairwise mutual information, computed once per unordered pair.
    fn pair(&self, a: FeatureId, b: FeatureId) -> Result<f64, ScoringError> {
        let key = (a.min(b), a.max(b));
        if let Ok(pairs) = self.pairs.read() {
            if let Some(&value) = pairs.get(&key) {
                return Ok(value);
            }
        }

        // Concurrent misses compute the same value; the last write wins.
        let value = self.mi.between(key.0, key.1)?;
        if let Ok(mut pairs) = self.pairs.write() {
            pairs.insert(key, value);
        }
        Ok(value)
    }

    #[cfg(test)]
    fn cached_pairs(&self) -> usize {
        self.pairs.read().map(|pairs| pairs.len()).unwrap_or(0)
    }
}

impl Clone for PairwiseRedundancy<'_> {
    fn clone(&self) -> Self {
        let pairs = self.pairs.read().map(|pairs| pairs.clone()).unwrap_or_default();
        Self {
            mi: self.mi,
            aggregation: self.aggregation,
            pairs: RwLock::new(pairs),
        }
    }
}

impl Redundancy for PairwiseRedundancy<'_> {
    fn redundancy(&self, candidate: FeatureId, selected: &[FeatureId]) -> Result<f64, ScoringError> {
        if selected.is_empty() {
            return Ok(0.0);
        }

        let mut max = 0.0f64;
        let mut sum = 0.0f64;
        for &feature in selected {
            let overlap = self.pair(candidate, feature)?;
            max = max.max(overlap);
            sum += overlap;
        }

        Ok(match self.aggregation {
            Aggregation::Max => max,
            Aggregation::Mean => sum / selected.len() as f64,
        })
    }
}
