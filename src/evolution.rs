//! The density-evolution recurrence over the codeword degree distribution.
//!
//! State is the degree-distribution array `D` (entry i = fraction of
//! codewords with i still-undecoded transaction references) plus the
//! cumulative decoded transaction fraction. One [`DensityEvolution::advance`]:
//!
//! 1. every degree-1 codeword resolves its single remaining transaction, so
//!    `D[1]` folds into `D[0]`;
//! 2. the occupancy limit estimates the fraction of still-undecoded
//!    transactions hit by this batch of newly solved codewords;
//! 3. each degree-i codeword sheds a Binomial(i, convert_frac) number of
//!    references — a convolution-style transform of the whole array, built
//!    into a staging buffer and swapped in;
//! 4. the decoded fraction accumulates.
//!
//! The recurrence is stuck once the conversion fraction drops below
//! [`STUCK_THRESHOLD`]; `D[0]` and the decoded fraction are then final. Mass
//! only moves between degree classes, so `Σ D[i]` is conserved by every round
//! up to floating error.

use crate::binomial::binomial_probability;
use crate::config::Params;
use crate::error::Error;
use crate::occupancy::fraction_nonempty_bins_limit;

/// Conversion fractions below this terminate the recurrence.
pub const STUCK_THRESHOLD: f64 = 1e-12;

/// Mean-field peeling state: degree distribution plus decoded fraction.
pub struct DensityEvolution {
    params: Params,
    /// D[i]: fraction of codewords with i undecoded references. D[0]
    /// accumulates the codewords that became fully decodable.
    dist: Vec<f64>,
    /// Staging buffer for the rebuilt distribution, swapped in each round.
    next_dist: Vec<f64>,
    /// Cumulative fraction of all transactions decoded so far.
    decoded: f64,
}

/// Outcome of driving the recurrence to its fixed point.
#[derive(Clone, Copy, Debug)]
pub struct FixedPoint {
    /// Final fraction of codewords that became fully decodable (D[0]).
    pub decodable_codewords: f64,
    /// Final fraction of all transactions recovered.
    pub decoded_transactions: f64,
    /// Productive rounds before the recurrence stuck.
    pub iterations: usize,
}

impl DensityEvolution {
    /// Initialize `D[i] = P(Binomial(MaxT, f·l) = i)` and a zero decoded
    /// fraction.
    ///
    /// When l > 1 the tracked degree range extends past MaxT; those entries
    /// carry no binomial mass and start at zero.
    pub fn new(params: Params) -> Self {
        let len = params.max_degree() + 1;
        let p = params.reference_probability();
        let dist: Vec<f64> = (0..len)
            .map(|i| {
                if i <= params.max_lookback {
                    binomial_probability(params.max_lookback, i, p)
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            params,
            dist,
            next_dist: vec![0.0; len],
            decoded: 0.0,
        }
    }

    /// One peeling round. Returns false once the process is stuck; the state
    /// is then final. The degree-1 fold in step 1 persists even on a stuck
    /// return — that mass is already solved and belongs in the reported
    /// `D[0]`.
    pub fn advance(&mut self) -> bool {
        // Degree-1 codewords reference exactly one undecoded transaction
        // each; all of them resolve now.
        let newly_decoded_cw = if self.dist.len() > 1 {
            std::mem::take(&mut self.dist[1])
        } else {
            0.0
        };
        self.dist[0] += newly_decoded_cw;
        if newly_decoded_cw <= 0.0 {
            return false;
        }

        // Each undecoded transaction is a bin, each newly solved codeword a
        // ball; the occupancy limit gives the chance a given undecoded
        // transaction was just identified.
        let undecoded = 1.0 - self.decoded;
        let bins_per_ball = self.params.arrival_ratio * undecoded / newly_decoded_cw;
        let convert_frac = fraction_nonempty_bins_limit(bins_per_ball);
        if convert_frac < STUCK_THRESHOLD {
            return false;
        }

        // Rebuild the distribution: a degree-i codeword drops to degree i−np
        // when np of its references turn out newly decoded,
        // np ~ Binomial(i, convert_frac).
        self.next_dist.iter_mut().for_each(|v| *v = 0.0);
        for i in 0..self.dist.len() {
            let mass = self.dist[i];
            if mass == 0.0 {
                continue;
            }
            for np in 0..=i {
                self.next_dist[i - np] += mass * binomial_probability(i, np, convert_frac);
            }
        }
        std::mem::swap(&mut self.dist, &mut self.next_dist);

        self.decoded += convert_frac * undecoded;
        true
    }

    /// Drive [`advance`](Self::advance) to the fixed point under a hard
    /// iteration cap.
    pub fn run(&mut self, max_iterations: usize) -> Result<FixedPoint, Error> {
        let mut iterations = 0;
        while self.advance() {
            iterations += 1;
            if iterations >= max_iterations {
                return Err(Error::DidNotConverge { iterations });
            }
        }
        Ok(FixedPoint {
            decodable_codewords: self.decodable_codewords(),
            decoded_transactions: self.decoded,
            iterations,
        })
    }

    /// Fraction of codewords that have become fully decodable (D[0]).
    pub fn decodable_codewords(&self) -> f64 {
        self.dist[0]
    }

    /// Cumulative fraction of all transactions decoded so far.
    pub fn decoded_transactions(&self) -> f64 {
        self.decoded
    }

    /// Current degree distribution, index = remaining references.
    pub fn degree_distribution(&self) -> &[f64] {
        &self.dist
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}
