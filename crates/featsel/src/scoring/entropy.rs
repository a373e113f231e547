//! Entropy and mutual information in bits.
//!
//! | Function | Measures | Formula |
//! |----------|----------|---------|
//! | [`entropy`] | Uncertainty in a distribution | H(p) = -Σ p(x) log₂ p(x) |
//! | [`entropy_from_counts`] | Same, from raw counts | H = -Σ (c/n) log₂ (c/n) |
//! | [`mutual_information`] | Shared information | I(X;Y) = H(X) + H(Y) - H(X,Y) |
//!
//! Probabilities at or below [`EPSILON`] contribute nothing, so `0 log 0 = 0`.

const LN_2: f64 = std::f64::consts::LN_2;

/// Probabilities at or below this value are treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Shannon entropy of a probability vector, in bits.
///
/// # Example
///
/// ```
/// use featsel::scoring::entropy::entropy;
///
/// assert!((entropy(&[0.25, 0.25, 0.25, 0.25]) - 2.0).abs() < 1e-10);
/// assert!(entropy(&[1.0, 0.0]) < 1e-10);
/// ```
pub fn entropy(p: &[f64]) -> f64 {
    p.iter()
        .filter(|&&x| x > EPSILON)
        .map(|&x| -x * x.ln() / LN_2)
        .fold(0.0, |acc, h| acc + h)
}

/// Shannon entropy of the empirical distribution given by `counts`, in bits.
///
/// Returns 0 when the total count is (numerically) zero.
pub fn entropy_from_counts<I>(counts: I) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let counts = counts.into_iter();
    let total: f64 = counts.clone().sum();
    if total <= EPSILON {
        return 0.0;
    }
    counts
        .map(|c| c / total)
        .filter(|&p| p > EPSILON)
        .map(|p| -p * p.ln() / LN_2)
        .fold(0.0, |acc, h| acc + h)
}

/// Mutual information from marginal and joint entropies.
///
/// Rounding can push `H(X) + H(Y) - H(X,Y)` slightly below zero; the result
/// is clamped at 0.
#[inline]
pub fn mutual_information(h_x: f64, h_y: f64, h_xy: f64) -> f64 {
    (h_x + h_y - h_xy).max(0.0)
}
