//! Compressed contingency table.
//!
//! Identical input rows are merged; each distinct row keeps weighted counts
//! of the target values observed with it. Storage is ordered so every pass
//! over the table visits rows in the same order, which keeps floating-point
//! accumulation reproducible across runs.

use std::collections::BTreeMap;

use ndarray::{ArrayView1, ArrayView2};

use super::error::DatasetError;
use super::FeatureTable;

// =============================================================================
// TargetCounts
// =============================================================================

/// Weighted counts of target values for one input row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetCounts {
    counts: BTreeMap<u32, f64>,
}

impl TargetCounts {
    /// Add `count` observations of `target`.
    #[inline]
    fn add(&mut self, target: u32, count: f64) {
        *self.counts.entry(target).or_insert(0.0) += count;
    }

    /// Count for a given target value (0 if never observed).
    #[inline]
    pub fn get(&self, target: u32) -> f64 {
        self.counts.get(&target).copied().unwrap_or(0.0)
    }

    /// Sum of all counts in this row.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Iterate `(target, count)` pairs in ascending target order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.counts.iter().map(|(&t, &c)| (t, c))
    }

    /// Number of distinct target values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no target value was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// =============================================================================
// CTable
// =============================================================================

/// Contingency table of discrete feature rows against a discrete target.
///
/// # Example
///
/// ```
/// use featsel::CTable;
///
/// let mut table = CTable::new(2);
/// table.insert(&[0, 1], 1, 1.0).unwrap();
/// table.insert(&[0, 1], 0, 2.0).unwrap();
/// table.insert(&[1, 1], 1, 1.0).unwrap();
///
/// assert_eq!(table.arity(), 2);
/// assert_eq!(table.n_rows(), 2);
/// assert_eq!(table.total_count(), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CTable {
    arity: usize,
    rows: BTreeMap<Vec<u32>, TargetCounts>,
    total: f64,
}

impl CTable {
    /// Create an empty table with `arity` feature columns.
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            rows: BTreeMap::new(),
            total: 0.0,
        }
    }

    /// Build a table from feature-major columns.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature matrix `[n_features, n_samples]` (feature-major)
    /// * `targets` - Target value per sample
    ///
    /// Every sample contributes a count of 1.
    pub fn from_columns(
        features: ArrayView2<u32>,
        targets: ArrayView1<u32>,
    ) -> Result<Self, DatasetError> {
        let n_features = features.nrows();
        let n_samples = features.ncols();
        if targets.len() != n_samples {
            return Err(DatasetError::LengthMismatch {
                features: n_samples,
                targets: targets.len(),
            });
        }

        let mut table = Self::new(n_features);
        let mut row = Vec::with_capacity(n_features);
        for (sample, &target) in targets.iter().enumerate() {
            row.clear();
            row.extend(features.column(sample).iter().copied());
            table.insert(&row, target, 1.0)?;
        }
        Ok(table)
    }

    /// Add `count` observations of `target` for the input row `inputs`.
    ///
    /// Zero counts are accepted and leave the table unchanged. A count that
    /// would push the table total past `f64::MAX` is rejected, so every row
    /// and marginal sum stays finite.
    pub fn insert(&mut self, inputs: &[u32], target: u32, count: f64) -> Result<(), DatasetError> {
        if inputs.len() != self.arity {
            return Err(DatasetError::InconsistentArity {
                expected: self.arity,
                got: inputs.len(),
            });
        }
        if !count.is_finite() || count < 0.0 {
            return Err(DatasetError::InvalidCount(count));
        }
        if count == 0.0 {
            return Ok(());
        }
        let total = self.total + count;
        if !total.is_finite() {
            return Err(DatasetError::InvalidCount(count));
        }

        match self.rows.get_mut(inputs) {
            Some(counts) => counts.add(target, count),
            None => {
                let mut counts = TargetCounts::default();
                counts.add(target, count);
                self.rows.insert(inputs.to_vec(), counts);
            }
        }
        self.total = total;
        Ok(())
    }

    /// Insert without any count checks, for building corrupt tables in tests.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, inputs: &[u32], target: u32, count: f64) {
        self.rows
            .entry(inputs.to_vec())
            .or_default()
            .add(target, count);
        self.total += count;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of feature columns.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of distinct input rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Sum of all counts.
    #[inline]
    pub fn total_count(&self) -> f64 {
        self.total
    }

    /// Returns `true` if the table holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate distinct input rows with their target counts.
    pub fn iter(&self) -> impl Iterator<Item = (&[u32], &TargetCounts)> + '_ {
        self.rows.iter().map(|(row, counts)| (row.as_slice(), counts))
    }

    /// Marginal counts of the target variable.
    pub fn target_counts(&self) -> TargetCounts {
        let mut marginal = TargetCounts::default();
        for counts in self.rows.values() {
            for (target, count) in counts.iter() {
                marginal.add(target, count);
            }
        }
        marginal
    }
}

impl FeatureTable for CTable {
    #[inline]
    fn arity(&self) -> usize {
        self.arity
    }
}
