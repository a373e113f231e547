//! Univariate feature ranking.

use crate::error::SelectionError;
use crate::scoring::{checked, Scorer};
use crate::universe::{FeatureId, FeatureUniverse};
use crate::utils::Parallelism;

/// Rank every feature by its score alone, best first.
///
/// Each feature is scored as the singleton `{f}`; ties keep ascending id
/// order. Useful as a cheap first look before a greedy run, since it ignores
/// interactions and redundancy entirely.
///
/// # Example
///
/// ```
/// use featsel::testing::AdditiveScorer;
/// use featsel::{rank_features, FeatureUniverse, Parallelism};
///
/// let scorer = AdditiveScorer::new(vec![0.2, 0.7, 0.2]);
/// let ranked = rank_features(&scorer, &FeatureUniverse::from_arity(3), Parallelism::Sequential).unwrap();
/// let order: Vec<usize> = ranked.iter().map(|&(f, _)| f).collect();
/// assert_eq!(order, vec![1, 0, 2]);
/// ```
pub fn rank_features<S: Scorer + ?Sized>(
    scorer: &S,
    universe: &FeatureUniverse,
    parallelism: Parallelism,
) -> Result<Vec<(FeatureId, f64)>, SelectionError> {
    let ids = universe.ids();
    let scored = parallelism.maybe_par_map(&ids[..], |&feature| {
        scorer
            .score_with(&[], feature)
            .and_then(checked)
            .map(|score| (feature, score))
    });

    let mut ranked = scored.into_iter().collect::<Result<Vec<_>, _>>()?;
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(ranked)
}
