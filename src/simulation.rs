//! Finite-population peeling simulation — empirical cross-check of the
//! asymptotic recurrence.
//!
//! One trial replays the generative model the recurrence abstracts over:
//! transactions arrive Poisson(l) per timeslot, each timeslot emits one
//! codeword that includes every transaction of the last MaxT slots
//! independently with probability f, and an actual queue-driven peeling
//! decoder then runs to completion over the sampled history. Trials run in
//! parallel and are fully determined by the base seed.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::Params;

/// SplitMix64 increment, used to spread the base seed across trials.
const SEED_STRIDE: u64 = 0x9e3779b97f4a7c15;

/// What the peeling decoder recovered from one sampled history.
pub struct PeelOutcome {
    /// Per-transaction decoded flag.
    pub decoded_transactions: Vec<bool>,
    /// Codewords whose references were all resolved.
    pub decoded_codewords: usize,
}

/// Outcome of a single sampled history.
#[derive(Clone, Copy, Debug)]
pub struct TrialResult {
    pub codewords: usize,
    pub transactions: usize,
    pub decoded_codeword_fraction: f64,
    pub decoded_transaction_fraction: f64,
}

/// Aggregate over independent trials.
pub struct SimulationResult {
    pub trials: Vec<TrialResult>,
    pub mean_codeword_fraction: f64,
    pub mean_transaction_fraction: f64,
}

/// Run the peeling decoder over a fixed set of codewords.
///
/// Repeatedly takes a degree-1 codeword off the queue, marks its last
/// unresolved transaction as decoded, and lowers the degree of every other
/// codeword referencing that transaction.
pub fn peel(codewords: &[Vec<usize>], num_transactions: usize) -> PeelOutcome {
    let mut membership: Vec<Vec<usize>> = vec![Vec::new(); num_transactions];
    for (ci, refs) in codewords.iter().enumerate() {
        for &tx in refs {
            membership[tx].push(ci);
        }
    }

    let mut remaining: Vec<usize> = codewords.iter().map(|refs| refs.len()).collect();
    let mut decoded = vec![false; num_transactions];
    let mut queue: VecDeque<usize> = remaining
        .iter()
        .enumerate()
        .filter(|&(_, &deg)| deg == 1)
        .map(|(ci, _)| ci)
        .collect();

    while let Some(ci) = queue.pop_front() {
        // May have been peeled below degree 1 while queued.
        if remaining[ci] != 1 {
            continue;
        }
        let tx = match codewords[ci].iter().find(|&&tx| !decoded[tx]) {
            Some(&tx) => tx,
            None => continue,
        };
        decoded[tx] = true;
        for &other in &membership[tx] {
            remaining[other] -= 1;
            if remaining[other] == 1 {
                queue.push_back(other);
            }
        }
    }

    let decoded_codewords = remaining.iter().filter(|&&deg| deg == 0).count();
    PeelOutcome {
        decoded_transactions: decoded,
        decoded_codewords,
    }
}

/// Sample one transaction/codeword history and peel it.
pub fn run_trial(params: &Params, epochs: usize, seed: u64) -> TrialResult {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut num_transactions = 0usize;
    let mut window: VecDeque<Vec<usize>> = VecDeque::with_capacity(params.max_lookback + 1);
    let mut codewords: Vec<Vec<usize>> = Vec::with_capacity(epochs);

    for _ in 0..epochs {
        let arrivals = poisson_sample(&mut rng, params.arrival_ratio);
        let slot: Vec<usize> = (num_transactions..num_transactions + arrivals).collect();
        num_transactions += arrivals;

        window.push_back(slot);
        if window.len() > params.max_lookback {
            window.pop_front();
        }

        let mut refs = Vec::new();
        for slot in &window {
            for &tx in slot {
                if rng.gen_bool(params.filter_probability) {
                    refs.push(tx);
                }
            }
        }
        codewords.push(refs);
    }

    let outcome = peel(&codewords, num_transactions);
    let decoded_tx = outcome.decoded_transactions.iter().filter(|&&d| d).count();

    TrialResult {
        codewords: codewords.len(),
        transactions: num_transactions,
        decoded_codeword_fraction: fraction(outcome.decoded_codewords, codewords.len()),
        decoded_transaction_fraction: fraction(decoded_tx, num_transactions),
    }
}

/// Run `trials` independent histories in parallel and aggregate.
pub fn simulate(params: &Params, epochs: usize, trials: usize, seed: u64) -> SimulationResult {
    let results: Vec<TrialResult> = (0..trials as u64)
        .into_par_iter()
        .map(|t| run_trial(params, epochs, seed.wrapping_add(t.wrapping_mul(SEED_STRIDE))))
        .collect();

    let n = results.len().max(1) as f64;
    let mean_codeword_fraction =
        results.iter().map(|r| r.decoded_codeword_fraction).sum::<f64>() / n;
    let mean_transaction_fraction =
        results.iter().map(|r| r.decoded_transaction_fraction).sum::<f64>() / n;

    SimulationResult {
        trials: results,
        mean_codeword_fraction,
        mean_transaction_fraction,
    }
}

/// Empty populations count as fully decoded.
fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        1.0
    } else {
        part as f64 / whole as f64
    }
}

/// Knuth's product-of-uniforms Poisson sampler. Adequate for the small
/// per-slot arrival rates used here.
fn poisson_sample(rng: &mut SmallRng, rate: f64) -> usize {
    let threshold = (-rate).exp();
    let mut count = 0;
    let mut acc: f64 = rng.gen();
    while acc > threshold {
        count += 1;
        acc *= rng.gen::<f64>();
    }
    count
}
