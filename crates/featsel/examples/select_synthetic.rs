//! Select features from a synthetic dataset and print the audit trail.
//!
//! Run with: `RUST_LOG=debug cargo run --example select_synthetic`

use featsel::testing::synthetic_dataset;
use featsel::{
    rank_features, select_features, Aggregation, FeatureUniverse, MutualInformation, Parallelism,
    SelectionConfig, Verbosity,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let data = synthetic_dataset(4_000, 6, 0.1, 42);
    let table = data.to_ctable()?;
    println!("{} features, {} samples, {} distinct rows", table.arity(), data.n_samples(), table.n_rows());

    let mi = MutualInformation::new(&table);
    println!("H(target) = {:.4} bits", mi.target_entropy());

    let ranked = rank_features(&mi, &FeatureUniverse::from_table(&table), Parallelism::Sequential)?;
    println!("\nUnivariate ranking:");
    for (feature, score) in &ranked {
        println!("  f{feature:<3} {score:.4}");
    }

    let config = SelectionConfig::builder()
        .target_size(4)
        .threshold(0.01)
        .inc_red_intensity(0.5)
        .aggregation(Aggregation::Max)
        .verbosity(Verbosity::Debug)
        .build()?;
    let selection = select_features(&table, &config)?;

    println!("\nGreedy selection:");
    for step in selection.steps() {
        println!(
            "  f{:<3} raw {:+.4}  adjusted {:+.4}  score {:.4}",
            step.feature, step.raw_delta, step.adjusted_delta, step.score
        );
    }
    println!("stopped: {:?}", selection.stop_reason());

    Ok(())
}
