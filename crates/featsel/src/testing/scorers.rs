use crate::scoring::{check_range, Scorer, ScoringError};
use crate::universe::FeatureId;

/// Scores a subset by summing fixed per-feature values.
///
/// Features never interact, so the gain of a candidate is exactly its own
/// value. Handy for checking selection order by hand.
#[derive(Debug, Clone)]
pub struct AdditiveScorer {
    values: Vec<f64>,
}

impl AdditiveScorer {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

impl Scorer for AdditiveScorer {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        check_range(subset, self.values.len())?;
        let mut ids = subset.to_vec();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids.iter().map(|&f| self.values[f]).sum())
    }
}

/// Scorer that fails on purpose.
#[derive(Debug, Clone)]
pub struct FailingScorer {
    inner: AdditiveScorer,
    fail_on_step: Option<usize>,
}

impl FailingScorer {
    /// Fails every call, including the empty-set baseline.
    pub fn always() -> Self {
        Self {
            inner: AdditiveScorer::new(Vec::new()),
            fail_on_step: None,
        }
    }

    /// Behaves like [`AdditiveScorer`] until candidates for the given step
    /// (1-based) are evaluated, i.e. `score_with` on a subset of
    /// `step - 1` features.
    pub fn on_step(values: Vec<f64>, step: usize) -> Self {
        Self {
            inner: AdditiveScorer::new(values),
            fail_on_step: Some(step),
        }
    }
}

impl Scorer for FailingScorer {
    fn score(&self, subset: &[FeatureId]) -> Result<f64, ScoringError> {
        match self.fail_on_step {
            None => Err(ScoringError::Estimator("scorer always fails".into())),
            Some(_) => self.inner.score(subset),
        }
    }

    fn score_with(&self, subset: &[FeatureId], candidate: FeatureId) -> Result<f64, ScoringError> {
        match self.fail_on_step {
            Some(step) if subset.len() + 1 == step => {
                Err(ScoringError::Estimator(format!("failed on step {step}")))
            }
            Some(_) => self.inner.score_with(subset, candidate),
            None => Err(ScoringError::Estimator("scorer always fails".into())),
        }
    }
}
