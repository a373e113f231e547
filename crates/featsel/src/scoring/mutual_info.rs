//! Mutual information between a feature subset and the target.

use std::collections::BTreeMap;

use super::entropy::{entropy_from_counts, mutual_information};
use super::{check_range, checked, Scorer, ScoringError};
use crate::data::CTable;
use crate::universe::FeatureId;

/// Scores a subset `S` by `I(X_S; Y)` in bits.
///
/// Rows of the table are projected onto `S`; the joint of the projected
/// inputs is treated as a single discrete variable. The empty subset scores
/// 0, and the score never exceeds `H(Y)`.
///
/// # Example
///
/// ```
/// use featsel::{CTable, MutualInformation, Scorer};
/// use ndarray::array;
///
/// // Feature 0 copies the target, feature 1 is constant.
/// let features = array![[0u32, 1, 0, 1], [3, 3, 3, 3]];
/// let targets = array![0u32, 1, 0, 1];
/// let table = CTable::from_columns(features.view(), targets.view()).unwrap();
///
/// let mi = MutualInformation::new(&table);
/// assert!((mi.score(&[0]).unwrap() - 1.0).abs() < 1e-12);
/// assert!(mi.score(&[1]).unwrap().abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MutualInformation<'a> {
    table: &'a CTable,
    target_entropy: f64,
}

impl<'a> MutualInformation<'a> {
    pub fn new(table: &'a CTable) -> Self {
        let marginal: Vec<f64> = table.target_counts().iter().map(|(_, c)| c).collect();
        Self {
            table,
            target_entropy: entropy_from_counts(marginal),
        }
    }

    /// The table this scorer reads.
    #[inline]
    pub fn table(&self) -> &'a CTable {
        self.table
    }

    /// `H(Y)`, the upper bound of any subset score.
    #[inline]
    pub fn target_entropy(&self) -> f64 {
        self.target_entropy
    }

    /// `I(X_a; X_b)` between two feature columns.
    pub fn between(&self, a: FeatureId, b: FeatureId) -> Result<f64, ScoringError> {
        check_range(&[a, b], self.table.arity())?;
        checked(self.table.total_count())?;

        let mut a_counts: BTreeMap<u32, f64> = BTreeMap::new();
        let mut b_counts: BTreeMap<u32, f64> = BTreeMap::new();
        let mut ab_counts: BTreeMap<(u32, u32), f64> = BTreeMap::new();
        for (row, targets) in self.table.iter() {
            let weight = targets.total();
            *a_counts.entry(row[a]).or_insert(0.0) += weight;
            *b_counts.entry(row[b]).or_insert(0.0) += weight;
            *ab_counts.entry((row[a], row[b])).or_insert(0.0) += weight;
        }

        let h_a = checked(entropy_from_counts(a_counts.values().copied()))?;
        let h_b = checked(entropy_from_counts(b_counts.values().copied()))?;
        let h_ab = checked(entropy_from_counts(ab_counts.values().copied()))?;
        Ok(mutual_information(h_a, h_b, h_ab))
    }
}

impl Scorer for MutualInformation<'_> {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        check_range(subset, self.table.arity())?;
        // An overflowed total would turn every probability into 0.
        checked(self.table.total_count())?;
        if subset.is_empty() {
            return Ok(0.0);
        }

        // Canonical id order so the score depends only on set membership.
        let mut ids = subset.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut x_counts: BTreeMap<Vec<u32>, f64> = BTreeMap::new();
        let mut xy_counts: BTreeMap<(Vec<u32>, u32), f64> = BTreeMap::new();
        for (row, targets) in self.table.iter() {
            let key: Vec<u32> = ids.iter().map(|&f| row[f]).collect();
            for (target, count) in targets.iter() {
                *xy_counts.entry((key.clone(), target)).or_insert(0.0) += count;
            }
            *x_counts.entry(key).or_insert(0.0) += targets.total();
        }

        let h_x = checked(entropy_from_counts(x_counts.values().copied()))?;
        let h_xy = checked(entropy_from_counts(xy_counts.values().copied()))?;
        Ok(mutual_information(h_x, self.target_entropy, h_xy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// XOR: neither input alone says anything, together they say everything.
    fn xor_table() -> CTable {
        let features = array![[0u32, 0, 1, 1], [0, 1, 0, 1], [0, 0, 0, 0]];
        let targets = array![0u32, 1, 1, 0];
        CTable::from_columns(features.view(), targets.view()).unwrap()
    }

    #[test]
    fn empty_subset_is_baseline() {
        let table = xor_table();
        let mi = MutualInformation::new(&table);
        assert_eq!(mi.score(&[]).unwrap(), 0.0);
    }

    #[test]
    fn xor_needs_both_inputs() {
        let table = xor_table();
        let mi = MutualInformation::new(&table);

        assert_abs_diff_eq!(mi.score(&[0]).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.score(&[1]).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.score(&[0, 1]).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.score_with(&[0], 1).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.target_entropy(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn score_ignores_order_and_duplicates() {
        let table = xor_table();
        let mi = MutualInformation::new(&table);
        let a = mi.score(&[0, 1, 2]).unwrap();
        let b = mi.score(&[2, 1, 0, 1]).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn out_of_range_feature() {
        let table = xor_table();
        let mi = MutualInformation::new(&table);
        assert_eq!(
            mi.score(&[0, 3]),
            Err(ScoringError::FeatureOutOfRange { feature: 3, arity: 3 })
        );
        assert!(mi.between(0, 9).is_err());
    }

    #[test]
    fn weighted_counts() {
        let mut table = CTable::new(1);
        table.insert(&[0], 0, 3.0).unwrap();
        table.insert(&[1], 1, 1.0).unwrap();
        let mi = MutualInformation::new(&table);

        // Feature determines the target, so I(X;Y) = H(Y) = H(3/4, 1/4).
        let h_y = -(0.75f64 * 0.75f64.log2() + 0.25 * 0.25f64.log2());
        assert_abs_diff_eq!(mi.score(&[0]).unwrap(), h_y, epsilon = 1e-12);
    }

    #[test]
    fn pairwise_between_features() {
        let features = array![[0u32, 1, 0, 1], [0, 1, 0, 1], [0, 0, 1, 1]];
        let targets = array![0u32, 0, 0, 0];
        let table = CTable::from_columns(features.view(), targets.view()).unwrap();
        let mi = MutualInformation::new(&table);

        assert_abs_diff_eq!(mi.between(0, 1).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.between(0, 2).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mi.between(2, 2).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_table_scores_zero() {
        let table = CTable::new(2);
        let mi = MutualInformation::new(&table);
        assert_eq!(mi.score(&[0, 1]).unwrap(), 0.0);
        assert_eq!(mi.target_entropy(), 0.0);
        assert!(mi.target_entropy().is_sign_positive());
    }

    #[test]
    fn constant_target_has_positive_zero_entropy() {
        let features = array![[0u32, 1, 2]];
        let targets = array![4u32, 4, 4];
        let table = CTable::from_columns(features.view(), targets.view()).unwrap();
        let mi = MutualInformation::new(&table);
        assert!(mi.target_entropy().is_sign_positive());
        assert_eq!(format!("{}", mi.target_entropy()), "0");
    }

    #[test]
    fn overflowed_total_is_an_error() {
        let mut table = CTable::new(1);
        table.insert_unchecked(&[0], 0, 1e308);
        table.insert_unchecked(&[1], 1, 1e308);
        assert_eq!(table.total_count(), f64::INFINITY);

        let mi = MutualInformation::new(&table);
        assert!(matches!(mi.score(&[0]), Err(ScoringError::NonFinite { .. })));
        assert!(matches!(mi.score(&[]), Err(ScoringError::NonFinite { .. })));
        assert!(matches!(mi.between(0, 0), Err(ScoringError::NonFinite { .. })));
    }
}
