//! Greedy engine scenarios.
//!
//! Scorers here are additive or near-additive, so the expected selection
//! can be worked out by hand:
//! - Ordering and tie-breaks
//! - Stopping rules (target size, threshold, exhaustion)
//! - Error propagation and cancellation
//! - Parallel vs sequential evaluation

use featsel::testing::{AdditiveScorer, FailingScorer};
use featsel::{
    CancelToken, FeatureId, FeatureUniverse, GreedySelector, NoRedundancy, OnCancel, Parallelism,
    Scorer, ScoringError, SelectionError, SelectionParams, StopReason,
};
use rstest::rstest;

fn params(target_size: i64, threshold: f64) -> SelectionParams {
    SelectionParams::new(target_size, threshold, 0.0).unwrap()
}

// =============================================================================
// Ordering
// =============================================================================

#[rstest]
#[case::sequential(Parallelism::Sequential)]
#[case::parallel(Parallelism::Parallel)]
fn end_to_end_order(#[case] parallelism: Parallelism) {
    let scorer = AdditiveScorer::new(vec![0.1, 0.5, 0.3, 0.5, 0.0]);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(3, 0.0));

    let selection = selector.select(&FeatureUniverse::from_arity(5), parallelism).unwrap();

    assert_eq!(selection.features(), &[1, 3, 2]);
    assert_eq!(selection.stop_reason(), StopReason::TargetSize);
}

/// Equal gains always go to the lowest id, wherever the tie sits.
#[rstest]
#[case(vec![0.4, 0.4, 0.1], 0)]
#[case(vec![0.1, 0.4, 0.4], 1)]
#[case(vec![0.2, 0.2, 0.2, 0.2], 0)]
#[case(vec![0.0, 0.3, 0.1, 0.3], 1)]
fn tie_goes_to_lowest_id(#[case] values: Vec<f64>, #[case] expected: FeatureId) {
    let arity = values.len();
    let selector = GreedySelector::new(AdditiveScorer::new(values), NoRedundancy, params(1, 0.0));

    for parallelism in [Parallelism::Sequential, Parallelism::Parallel] {
        let selection = selector.select(&FeatureUniverse::from_arity(arity), parallelism).unwrap();
        assert_eq!(selection.features(), &[expected]);
    }
}

/// Scores far from zero with gains that differ by a few ulps.
struct OffsetScorer {
    offset: f64,
    inner: AdditiveScorer,
}

impl Scorer for OffsetScorer {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        Ok(self.offset + self.inner.score(subset)?)
    }
}

#[test]
fn closely_spaced_large_scores_keep_order() {
    let scorer = OffsetScorer {
        offset: 1e9,
        inner: AdditiveScorer::new(vec![3e-6, 5e-6, 4e-6]),
    };
    let selector = GreedySelector::new(scorer, NoRedundancy, params(3, 0.0));

    let selection = selector
        .select(&FeatureUniverse::from_arity(3), Parallelism::Sequential)
        .unwrap();

    assert_eq!(selection.features(), &[1, 2, 0]);
    assert!(selection.steps().iter().all(|s| s.raw_delta > 0.0));
}

// =============================================================================
// Stopping Rules
// =============================================================================

#[test]
fn threshold_stops_after_two() {
    let scorer = AdditiveScorer::new(vec![0.9, 0.05, 0.8, 0.02]);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(4, 0.1));

    let selection = selector
        .select(&FeatureUniverse::from_arity(4), Parallelism::Sequential)
        .unwrap();

    assert_eq!(selection.features(), &[0, 2]);
    assert!(matches!(
        selection.stop_reason(),
        StopReason::BelowThreshold { best_feature: 1, .. }
    ));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
fn zero_target_size_returns_universe(#[case] arity: usize) {
    let selector = GreedySelector::new(FailingScorer::always(), NoRedundancy, params(0, 0.0));

    let selection = selector
        .select(&FeatureUniverse::from_arity(arity), Parallelism::Sequential)
        .unwrap();

    let mut features = selection.into_features();
    features.sort_unstable();
    assert_eq!(features, (0..arity).collect::<Vec<_>>());
}

#[rstest]
#[case(1, 1)]
#[case(3, 3)]
#[case(10, 4)]
fn size_bounded_by_target_and_arity(#[case] target_size: i64, #[case] expected: usize) {
    let scorer = AdditiveScorer::new(vec![0.1, 0.2, 0.3, 0.4]);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(target_size, 0.0));

    let selection = selector
        .select(&FeatureUniverse::from_arity(4), Parallelism::Sequential)
        .unwrap();

    assert_eq!(selection.len(), expected);
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
#[case::sequential(Parallelism::Sequential)]
#[case::parallel(Parallelism::Parallel)]
fn failure_on_second_step_returns_nothing(#[case] parallelism: Parallelism) {
    let scorer = FailingScorer::on_step(vec![0.5, 0.3, 0.1], 2);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(3, 0.0));

    let result = selector.select(&FeatureUniverse::from_arity(3), parallelism);

    assert!(matches!(
        result,
        Err(SelectionError::Scoring(ScoringError::Estimator(_)))
    ));
}

#[test]
fn nan_score_is_an_error() {
    let scorer = AdditiveScorer::new(vec![0.2, f64::NAN, 0.1]);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(2, 0.0));

    let err = selector
        .select(&FeatureUniverse::from_arity(3), Parallelism::Sequential)
        .unwrap_err();

    assert!(matches!(err, SelectionError::Scoring(ScoringError::NonFinite { .. })));
}

#[test]
fn universe_larger_than_scorer() {
    let scorer = AdditiveScorer::new(vec![0.2, 0.1]);
    let selector = GreedySelector::new(scorer, NoRedundancy, params(2, 0.0));

    let err = selector
        .select(&FeatureUniverse::from_arity(3), Parallelism::Sequential)
        .unwrap_err();

    assert!(matches!(
        err,
        SelectionError::Scoring(ScoringError::FeatureOutOfRange { feature: 2, arity: 2 })
    ));
}

#[test]
fn negative_arity_rejected() {
    assert!(matches!(
        FeatureUniverse::build(-1),
        Err(SelectionError::InvalidArity { arity: -1 })
    ));
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cancels its token while evaluating candidates for the second step.
struct CancellingScorer {
    inner: AdditiveScorer,
    token: CancelToken,
}

impl Scorer for CancellingScorer {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        if subset.len() == 2 {
            self.token.cancel();
        }
        self.inner.score(subset)
    }
}

#[rstest]
#[case(OnCancel::Fail)]
#[case(OnCancel::KeepSelected)]
fn cancel_takes_effect_at_step_boundary(#[case] on_cancel: OnCancel) {
    let token = CancelToken::new();
    let scorer = CancellingScorer {
        inner: AdditiveScorer::new(vec![0.4, 0.3, 0.2, 0.1]),
        token: token.clone(),
    };
    let selector = GreedySelector::new(
        scorer,
        NoRedundancy,
        params(4, 0.0).with_on_cancel(on_cancel),
    );

    let result = selector.select_with_cancel(
        &FeatureUniverse::from_arity(4),
        &token,
        Parallelism::Sequential,
    );

    match on_cancel {
        OnCancel::Fail => {
            assert!(matches!(result, Err(SelectionError::Cancelled { completed_steps: 2 })));
        }
        OnCancel::KeepSelected => {
            let selection = result.unwrap();
            assert_eq!(selection.features(), &[0, 1]);
            assert_eq!(selection.stop_reason(), StopReason::Cancelled);
        }
    }
}
