//! Greedy incremental selection engine.
//!
//! Starting from the empty set, every step scores each remaining candidate
//! against the current selection, discounts the gain for redundancy, and
//! accepts the best candidate. The run stops when:
//!
//! - the selection reaches `target_size`,
//! - no candidates remain, or
//! - the best adjusted gain falls below `threshold`.
//!
//! Ties go to the lowest feature id. Candidate evaluation within a step may
//! run in parallel; every worker sees the same snapshot of the selection and
//! running score, and the reduction walks results in ascending id order, so
//! the outcome does not depend on scheduling.

use serde::{Deserialize, Serialize};

use super::cancel::CancelToken;
use super::logger::{SelectionLogger, Verbosity};
use super::params::{OnCancel, SelectionParams};
use crate::error::SelectionError;
use crate::redundancy::Redundancy;
use crate::scoring::{checked, Scorer, ScoringError};
use crate::universe::{FeatureId, FeatureSet, FeatureUniverse};
use crate::utils::Parallelism;

// =============================================================================
// Results
// =============================================================================

/// One accepted feature, as evaluated in the step that accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionStep {
    /// The accepted feature.
    pub feature: FeatureId,
    /// Score gain over the previous selection.
    pub raw_delta: f64,
    /// Gain after the redundancy discount; this is what was compared.
    pub adjusted_delta: f64,
    /// Score of the selection including this feature.
    pub score: f64,
}

/// Why a selection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `target_size == 0`: the whole universe was returned unscored.
    Disabled,
    /// The selection reached `target_size`.
    TargetSize,
    /// Every candidate was accepted.
    Exhausted,
    /// The best remaining candidate gained less than `threshold`.
    BelowThreshold {
        best_feature: FeatureId,
        best_delta: f64,
    },
    /// Cancelled with [`OnCancel::KeepSelected`].
    Cancelled,
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    features: FeatureSet,
    score: Option<f64>,
    steps: Vec<SelectionStep>,
    stop_reason: StopReason,
}

impl Selection {
    /// The "selection disabled" result: the full universe, unscored.
    pub(crate) fn disabled(universe: &FeatureUniverse) -> Self {
        Self {
            features: universe.to_feature_set(),
            score: None,
            steps: Vec::new(),
            stop_reason: StopReason::Disabled,
        }
    }

    /// Selected features in acceptance order.
    #[inline]
    pub fn features(&self) -> &[FeatureId] {
        self.features.as_slice()
    }

    #[inline]
    pub fn feature_set(&self) -> &FeatureSet {
        &self.features
    }

    pub fn into_features(self) -> Vec<FeatureId> {
        self.features.into_vec()
    }

    /// Score of the final selection. `None` when selection was disabled.
    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Per-feature audit trail, in acceptance order.
    #[inline]
    pub fn steps(&self) -> &[SelectionStep] {
        &self.steps
    }

    #[inline]
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// =============================================================================
// GreedySelector
// =============================================================================

/// Greedy forward selection driven by a [`Scorer`] and a [`Redundancy`] measure.
///
/// # Example
///
/// ```
/// use featsel::testing::AdditiveScorer;
/// use featsel::{FeatureUniverse, GreedySelector, NoRedundancy, Parallelism, SelectionParams};
///
/// let scorer = AdditiveScorer::new(vec![0.1, 0.5, 0.3, 0.5, 0.0]);
/// let params = SelectionParams::new(3, 0.0, 0.0).unwrap();
/// let selector = GreedySelector::new(scorer, NoRedundancy, params);
///
/// let universe = FeatureUniverse::from_arity(5);
/// let selection = selector.select(&universe, Parallelism::Sequential).unwrap();
/// assert_eq!(selection.features(), &[1, 3, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct GreedySelector<S: Scorer, R: Redundancy> {
    scorer: S,
    redundancy: R,
    params: SelectionParams,
    verbosity: Verbosity,
}

impl<S: Scorer, R: Redundancy> GreedySelector<S, R> {
    pub fn new(scorer: S, redundancy: R, params: SelectionParams) -> Self {
        Self {
            scorer,
            redundancy,
            params,
            verbosity: Verbosity::default(),
        }
    }

    /// Set the logging verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[inline]
    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    /// Select features from `universe`.
    ///
    /// **Note:** This method does NOT create a thread pool. With
    /// [`Parallelism::Parallel`], candidates are scored on the current rayon
    /// pool; use [`run_with_threads`](crate::run_with_threads) to control it.
    ///
    /// # Errors
    ///
    /// Fails on invalid parameters or on the first scoring error. No partial
    /// selection is returned on failure.
    pub fn select(
        &self,
        universe: &FeatureUniverse,
        parallelism: Parallelism,
    ) -> Result<Selection, SelectionError> {
        self.run(universe, None, parallelism)
    }

    /// Like [`select`](Self::select), checking `cancel` before every step.
    ///
    /// On cancellation the outcome follows [`SelectionParams::on_cancel`].
    pub fn select_with_cancel(
        &self,
        universe: &FeatureUniverse,
        cancel: &CancelToken,
        parallelism: Parallelism,
    ) -> Result<Selection, SelectionError> {
        self.run(universe, Some(cancel), parallelism)
    }

    pub(crate) fn run(
        &self,
        universe: &FeatureUniverse,
        cancel: Option<&CancelToken>,
        parallelism: Parallelism,
    ) -> Result<Selection, SelectionError> {
        self.params.validate()?;
        if self.params.is_disabled() {
            return Ok(Selection::disabled(universe));
        }

        let mut logger = SelectionLogger::new(self.verbosity);
        logger.start_selection(universe.arity(), &self.params);

        let mut selected = FeatureSet::with_capacity(universe.arity());
        let mut remaining: Vec<FeatureId> = universe.ids();
        let mut steps = Vec::with_capacity(self.params.target_size.min(universe.arity()));
        let mut running = match self.scorer.score(&[]).and_then(checked) {
            Ok(score) => score,
            Err(e) => {
                logger.log_failure(0, &e);
                return Err(e.into());
            }
        };

        let stop_reason = loop {
            if selected.len() >= self.params.target_size {
                break StopReason::TargetSize;
            }
            if remaining.is_empty() {
                break StopReason::Exhausted;
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                logger.log_cancelled(selected.len());
                match self.params.on_cancel {
                    OnCancel::Fail => {
                        return Err(SelectionError::Cancelled {
                            completed_steps: selected.len(),
                        })
                    }
                    OnCancel::KeepSelected => break StopReason::Cancelled,
                }
            }

            let best = match self.best_candidate(selected.as_slice(), &remaining, running, parallelism) {
                Ok(best) => best,
                Err(e) => {
                    logger.log_failure(selected.len(), &e);
                    return Err(e.into());
                }
            };
            let Some(best) = best else {
                break StopReason::Exhausted;
            };

            if best.adjusted_delta < self.params.threshold {
                break StopReason::BelowThreshold {
                    best_feature: best.feature,
                    best_delta: best.adjusted_delta,
                };
            }

            selected.insert(best.feature);
            remaining.retain(|&f| f != best.feature);
            running = best.score;
            logger.log_step(steps.len(), &best);
            steps.push(best);
        };

        logger.finish_selection(selected.len(), running, &stop_reason);
        Ok(Selection {
            features: selected,
            score: Some(running),
            steps,
            stop_reason,
        })
    }

    /// Evaluate every remaining candidate and return the best one.
    ///
    /// `remaining` is in ascending id order; a later candidate only wins on a
    /// strictly larger adjusted gain. The first error in id order is returned.
    fn best_candidate(
        &self,
        selected: &[FeatureId],
        remaining: &[FeatureId],
        running: f64,
        parallelism: Parallelism,
    ) -> Result<Option<SelectionStep>, ScoringError> {
        let evaluated = parallelism.maybe_par_map(remaining, |&candidate| {
            self.evaluate(selected, running, candidate)
        });

        let mut best: Option<SelectionStep> = None;
        for result in evaluated {
            let step = result?;
            if best.map_or(true, |b| step.adjusted_delta > b.adjusted_delta) {
                best = Some(step);
            }
        }
        Ok(best)
    }

    /// Score one candidate against the current selection.
    ///
    /// The gain is the difference of two full scores. When the scores are
    /// within a factor of two of each other the subtraction is exact, so
    /// closely spaced large scores keep their ordering.
    fn evaluate(
        &self,
        selected: &[FeatureId],
        running: f64,
        candidate: FeatureId,
    ) -> Result<SelectionStep, ScoringError> {
        let score = checked(self.scorer.score_with(selected, candidate)?)?;
        let raw_delta = checked(score - running)?;
        let adjusted_delta = self.redundancy.adjust(
            raw_delta,
            candidate,
            selected,
            self.params.inc_red_intensity,
        )?;
        Ok(SelectionStep {
            feature: candidate,
            raw_delta,
            adjusted_delta,
            score,
        })
    }
}
