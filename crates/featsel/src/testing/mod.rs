//! Test utilities: deterministic scorers and synthetic datasets.
//!
//! Used by unit tests, integration tests, benches, and doc examples.

mod data;
mod scorers;

pub use data::{synthetic_dataset, SyntheticDataset};
pub use scorers::{AdditiveScorer, FailingScorer};
