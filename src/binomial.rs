//! Numerically stable binomial probabilities.
//!
//! Codeword degrees reach MaxDeg = l·MaxT, easily into the hundreds, where
//! direct factorial evaluation of the binomial coefficient overflows f64.
//! The mass function is therefore assembled in log space from `ln_gamma` and
//! exponentiated once at the end.

use statrs::function::gamma::ln_gamma;

/// P(X = x) for X ~ Binomial(n, p).
///
/// The `p == 0` and `p == 1` endpoints are resolved before the log-domain
/// formula so the degenerate outcomes get probability exactly 1 or 0 and
/// `0 · ln 0` is never formed.
pub fn binomial_probability(n: usize, x: usize, p: f64) -> f64 {
    debug_assert!(x <= n, "x={x} exceeds n={n}");
    debug_assert!((0.0..=1.0).contains(&p), "p={p} out of range");

    if p == 0.0 {
        return if x == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if x == n { 1.0 } else { 0.0 };
    }

    let mut log_prob = ln_gamma(n as f64 + 1.0);
    log_prob -= ln_gamma((n - x) as f64 + 1.0);
    log_prob -= ln_gamma(x as f64 + 1.0);
    log_prob += x as f64 * p.ln() + (n - x) as f64 * (1.0 - p).ln();
    log_prob.exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_sums_to_one() {
        for &(n, p) in &[(10usize, 0.3f64), (50, 0.5), (200, 0.01), (7, 0.999)] {
            let total: f64 = (0..=n).map(|x| binomial_probability(n, x, p)).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "n={n} p={p} total={total}"
            );
        }
    }

    #[test]
    fn degenerate_success_probabilities() {
        assert_eq!(binomial_probability(5, 0, 0.0), 1.0);
        assert_eq!(binomial_probability(5, 3, 0.0), 0.0);
        assert_eq!(binomial_probability(5, 5, 1.0), 1.0);
        assert_eq!(binomial_probability(5, 2, 1.0), 0.0);
    }

    #[test]
    fn zero_trials() {
        assert!((binomial_probability(0, 0, 0.42) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn matches_direct_evaluation_for_small_n() {
        // C(4,2) · 0.3² · 0.7² = 6 · 0.09 · 0.49
        let expected = 6.0 * 0.09 * 0.49;
        assert!((binomial_probability(4, 2, 0.3) - expected).abs() < 1e-12);
    }

    #[test]
    fn symmetric_in_success_and_failure() {
        for x in 0..=20 {
            let a = binomial_probability(20, x, 0.37);
            let b = binomial_probability(20, 20 - x, 0.63);
            assert!((a - b).abs() < 1e-12, "x={x} a={a} b={b}");
        }
    }
}
