//! Greedy incremental feature selection.
//!
//! # Overview
//!
//! | Layer | Entry point | Use |
//! |-------|-------------|-----|
//! | High level | [`select_features`] | Mutual information on a [`CTable`](crate::CTable) |
//! | Engine | [`GreedySelector`] | Any [`Scorer`](crate::Scorer) and [`Redundancy`](crate::Redundancy) |
//! | Ranking | [`rank_features`] | Univariate scores, no interactions |
//!
//! # Parameters
//!
//! - `target_size`: maximum number of features; 0 disables selection and
//!   returns the whole universe
//! - `threshold`: minimum adjusted gain to accept a feature
//! - `inc_red_intensity`: how strongly redundancy with already selected
//!   features discounts a candidate's gain, in `[0, 1]`
//!
//! A failed run returns no partial selection. Cancellation is checked once
//! per step; see [`OnCancel`].

mod cancel;
mod config;
mod engine;
mod logger;
mod params;
mod rank;

pub use cancel::CancelToken;
pub use config::{select_features, select_features_with_cancel, SelectionConfig, SelectionConfigBuilder};
pub use engine::{GreedySelector, Selection, SelectionStep, StopReason};
pub use logger::{SelectionLogger, Verbosity};
pub use params::{OnCancel, ParamValidationError, SelectionParams};
pub use rank::rank_features;
