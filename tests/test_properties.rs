//! Property-based tests for the numerical core.

use proptest::prelude::*;

use ripple::binomial::binomial_probability;
use ripple::occupancy::fraction_nonempty_bins_limit;
use ripple::{DensityEvolution, Params};

/// Strategy: a valid (arrival_ratio, filter_probability, max_lookback)
/// triple with f·l ≤ 1.
fn params_strategy() -> impl Strategy<Value = Params> {
    (0.05f64..2.0, 0.0f64..=1.0, 1usize..40).prop_filter_map(
        "reference probability must stay within [0, 1]",
        |(arrival, filter, lookback)| Params::new(arrival, filter, lookback).ok(),
    )
}

proptest! {
    // 1. The mass function sums to 1 over its support
    #[test]
    fn binomial_mass_sums_to_one(n in 0usize..200, p in 0.0f64..=1.0) {
        let total: f64 = (0..=n).map(|x| binomial_probability(n, x, p)).sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "n={n} p={p} total={total}");
    }

    // 2. Endpoint masses match the closed forms (1−p)^n and p^n
    #[test]
    fn binomial_endpoints(n in 0usize..200, p in 0.0f64..=1.0) {
        let none = binomial_probability(n, 0, p);
        let all = binomial_probability(n, n, p);
        prop_assert!((none - (1.0 - p).powi(n as i32)).abs() < 1e-9);
        prop_assert!((all - p.powi(n as i32)).abs() < 1e-9);
    }

    // 3. Probabilities never leave [0, 1]
    #[test]
    fn binomial_stays_in_unit_interval(n in 0usize..200, frac in 0.0f64..=1.0, p in 0.0f64..=1.0) {
        let x = ((n as f64) * frac).floor() as usize;
        let prob = binomial_probability(n, x.min(n), p);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&prob), "n={n} x={x} p={p} prob={prob}");
    }

    // 4. The occupancy limit is strictly decreasing in bins-per-ball
    #[test]
    fn occupancy_limit_strictly_decreasing(a in 0.01f64..20.0, delta in 0.01f64..20.0) {
        let b = a + delta;
        prop_assert!(
            fraction_nonempty_bins_limit(a) > fraction_nonempty_bins_limit(b),
            "a={a} b={b}"
        );
    }

    // 5. The occupancy limit stays within (0, 1) for positive finite ratios
    //    (below ~1/36 the result rounds to exactly 1.0 in f64, so start there)
    #[test]
    fn occupancy_limit_in_unit_interval(ratio in 0.05f64..1e6) {
        let frac = fraction_nonempty_bins_limit(ratio);
        prop_assert!(frac > 0.0 && frac < 1.0, "ratio={ratio} frac={frac}");
    }

    // 6. advance conserves distribution mass and never decreases the decoded
    //    fraction, which stays within [0, 1]
    #[test]
    fn advance_conserves_mass_and_decoded_is_monotone(params in params_strategy()) {
        let mut evolution = DensityEvolution::new(params);
        let mut prev_decoded = 0.0;
        for _ in 0..200 {
            let before: f64 = evolution.degree_distribution().iter().sum();
            let progressed = evolution.advance();
            let after: f64 = evolution.degree_distribution().iter().sum();
            prop_assert!((before - after).abs() < 1e-9, "mass {before} -> {after}");

            let decoded = evolution.decoded_transactions();
            prop_assert!(decoded >= prev_decoded, "decoded regressed: {prev_decoded} -> {decoded}");
            prop_assert!((0.0..=1.0 + 1e-12).contains(&decoded), "decoded={decoded}");
            prop_assert!(decoded.is_finite() && evolution.decodable_codewords().is_finite());
            prev_decoded = decoded;

            if !progressed {
                break;
            }
        }
    }

    // 7. Once stuck, advance stays stuck and leaves the outputs fixed
    #[test]
    fn stuck_state_is_terminal(params in params_strategy()) {
        let mut evolution = DensityEvolution::new(params);
        let mut guard = 0;
        while evolution.advance() {
            guard += 1;
            prop_assume!(guard < 10_000);
        }
        let cw = evolution.decodable_codewords();
        let tx = evolution.decoded_transactions();
        prop_assert!(!evolution.advance());
        prop_assert_eq!(evolution.decodable_codewords(), cw);
        prop_assert_eq!(evolution.decoded_transactions(), tx);
    }
}

// 8. Reference example: MaxT=2, l=1, f=0.5 (non-proptest)
#[test]
fn reference_example_first_round() {
    let params = Params::new(1.0, 0.5, 2).unwrap();
    let mut evolution = DensityEvolution::new(params);

    let init: Vec<f64> = evolution.degree_distribution().to_vec();
    for (value, expected) in init.iter().zip([0.25, 0.5, 0.25]) {
        assert!((value - expected).abs() < 1e-12);
    }

    assert!(evolution.advance());
    assert!((evolution.decoded_transactions() - 0.39347).abs() < 1e-5);
}

// 9. Degenerate configuration: f·l = 0 sticks on the first round without
//    producing non-finite values
#[test]
fn degenerate_configuration_terminates_cleanly() {
    let params = Params::new(2.0, 0.0, 3).unwrap();
    let mut evolution = DensityEvolution::new(params);
    assert_eq!(evolution.degree_distribution()[0], 1.0);
    assert!(!evolution.advance());
    assert_eq!(evolution.decoded_transactions(), 0.0);
    assert!(evolution.degree_distribution().iter().all(|v| v.is_finite()));
}
