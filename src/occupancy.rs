//! Balls-into-bins occupancy estimates.
//!
//! One peeling round resolves a batch of codewords, each identifying one
//! transaction. Modeling every still-undecoded transaction as a bin and every
//! newly solved codeword as a ball, the fraction of nonempty bins is the
//! fraction of undecoded transactions hit this round.

/// Expected fraction of `n` bins receiving at least one of `m` balls thrown
/// independently and uniformly: 1 − (1 − 1/n)^m.
///
/// Reference form; the iteration hot path uses the continuum limit
/// [`fraction_nonempty_bins_limit`].
pub fn fraction_nonempty_bins(m: usize, n: usize) -> f64 {
    1.0 - (1.0 - 1.0 / n as f64).powf(m as f64)
}

/// Limit of [`fraction_nonempty_bins`] as m and n grow without bound with
/// n/m → `bins_per_ball`: 1 − exp(−1/bins_per_ball).
///
/// Requires `bins_per_ball` > 0. Sparse regime (`bins_per_ball` → ∞) tends
/// to 0, saturated regime (→ 0⁺) tends to 1; +∞ itself maps to exactly 0.
pub fn fraction_nonempty_bins_limit(bins_per_ball: f64) -> f64 {
    1.0 - (-1.0 / bins_per_ball).exp()
}
