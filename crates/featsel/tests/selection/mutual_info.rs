//! Mutual-information selection on synthetic data.
//!
//! The synthetic target is `2a + b` where features 0 and 1 hold `a` and `b`,
//! feature 2 is a noisy copy of `a`, and the rest is noise.

use approx::assert_abs_diff_eq;
use featsel::testing::synthetic_dataset;
use featsel::{
    select_features, Aggregation, CTable, FeatureUniverse, GreedySelector, MutualInformation,
    PairwiseRedundancy, Parallelism, SelectionConfig, SelectionParams, StopReason,
};
use rstest::rstest;

fn table(n_noise: usize, flip: f64, seed: u64) -> CTable {
    synthetic_dataset(2_000, n_noise, flip, seed).to_ctable().unwrap()
}

fn sorted(features: &[usize]) -> Vec<usize> {
    let mut features = features.to_vec();
    features.sort_unstable();
    features
}

#[rstest]
#[case(0.0)]
#[case(0.5)]
#[case(1.0)]
fn informative_pair_selected_first(#[case] intensity: f64) {
    let table = table(4, 0.1, 42);
    let config = SelectionConfig::builder()
        .target_size(2)
        .inc_red_intensity(intensity)
        .n_threads(1)
        .build()
        .unwrap();

    let selection = select_features(&table, &config).unwrap();

    assert_eq!(sorted(selection.features()), vec![0, 1]);
    // a and b together determine the two-bit target.
    let h_y = MutualInformation::new(&table).target_entropy();
    assert_abs_diff_eq!(selection.score().unwrap(), h_y, epsilon = 1e-9);
}

#[test]
fn threshold_drops_uninformative_features() {
    let table = table(4, 0.1, 7);
    let config = SelectionConfig::builder()
        .target_size(10)
        .threshold(0.05)
        .n_threads(1)
        .build()
        .unwrap();

    let selection = select_features(&table, &config).unwrap();

    assert_eq!(sorted(selection.features()), vec![0, 1]);
    assert!(matches!(selection.stop_reason(), StopReason::BelowThreshold { .. }));
}

#[rstest]
#[case(Aggregation::Max)]
#[case(Aggregation::Mean)]
fn redundant_copy_is_penalized(#[case] aggregation: Aggregation) {
    let table = table(2, 0.05, 11);
    let config = SelectionConfig::builder()
        .target_size(3)
        .threshold(-10.0)
        .inc_red_intensity(1.0)
        .aggregation(aggregation)
        .n_threads(1)
        .build()
        .unwrap();

    let selection = select_features(&table, &config).unwrap();

    assert_eq!(selection.len(), 3);
    assert_eq!(sorted(&selection.features()[..2]), vec![0, 1]);
    assert_ne!(selection.features()[2], 2);

    let third = selection.steps()[2];
    assert!(third.adjusted_delta <= third.raw_delta);
}

#[rstest]
#[case(0.0, Aggregation::Max)]
#[case(0.7, Aggregation::Max)]
#[case(0.7, Aggregation::Mean)]
fn threaded_run_matches_sequential(#[case] intensity: f64, #[case] aggregation: Aggregation) {
    let table = table(6, 0.2, 3);
    let build = |n_threads| {
        SelectionConfig::builder()
            .target_size(5)
            .threshold(-1.0)
            .inc_red_intensity(intensity)
            .aggregation(aggregation)
            .n_threads(n_threads)
            .build()
            .unwrap()
    };

    let sequential = select_features(&table, &build(1)).unwrap();
    let threaded = select_features(&table, &build(4)).unwrap();

    assert_eq!(sequential, threaded);
}

#[test]
fn engine_with_mutual_information_components() {
    let table = table(3, 0.1, 5);
    let params = SelectionParams::new(2, 0.0, 0.5).unwrap();
    let selector = GreedySelector::new(
        MutualInformation::new(&table),
        PairwiseRedundancy::new(&table, Aggregation::Max),
        params,
    );
    let universe = FeatureUniverse::from_table(&table);

    let a = selector.select(&universe, Parallelism::Sequential).unwrap();
    let b = selector.select(&universe, Parallelism::Sequential).unwrap();

    assert_eq!(a, b);
    assert_eq!(sorted(a.features()), vec![0, 1]);
}
