use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::{CTable, DatasetError};

/// A discrete dataset with known structure.
///
/// Feature layout:
///
/// | Feature | Content |
/// |---------|---------|
/// | 0 | bit `a` |
/// | 1 | bit `b` |
/// | 2 | copy of `a`, each value flipped with probability `flip` |
/// | 3.. | uniform noise in `0..4` |
///
/// The target is `2a + b`, so features 0 and 1 together determine it and
/// feature 2 is redundant with feature 0.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// Feature-major values, shape `[n_features, n_samples]`.
    pub features: Array2<u32>,
    pub targets: Array1<u32>,
}

impl SyntheticDataset {
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn to_ctable(&self) -> Result<CTable, DatasetError> {
        CTable::from_columns(self.features.view(), self.targets.view())
    }
}

/// Generate a [`SyntheticDataset`] with `n_noise` noise features.
///
/// # Panics
///
/// Panics if `flip` is not in `[0, 1]`.
pub fn synthetic_dataset(n_samples: usize, n_noise: usize, flip: f64, seed: u64) -> SyntheticDataset {
    assert!((0.0..=1.0).contains(&flip), "flip must be in [0, 1], got {flip}");
    let mut rng = StdRng::seed_from_u64(seed);
    let n_features = 3 + n_noise;

    let mut features = Array2::<u32>::zeros((n_features, n_samples));
    let mut targets = Array1::<u32>::zeros(n_samples);
    for s in 0..n_samples {
        let a = u32::from(rng.gen_bool(0.5));
        let b = u32::from(rng.gen_bool(0.5));
        let copy = if rng.gen_bool(flip) { 1 - a } else { a };

        features[[0, s]] = a;
        features[[1, s]] = b;
        features[[2, s]] = copy;
        for f in 3..n_features {
            features[[f, s]] = rng.gen_range(0..4);
        }
        targets[s] = 2 * a + b;
    }

    SyntheticDataset { features, targets }
}
