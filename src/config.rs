//! Run parameters: arrival ratio, filter probability, lookback window.

use crate::error::Error;

/// Immutable parameters for one analysis run.
///
/// - `arrival_ratio` (l): transaction arrival rate normalized to the codeword
///   production rate
/// - `filter_probability` (f): probability that a given transaction slot is
///   included in a codeword
/// - `max_lookback` (MaxT): number of timeslots considered when forming a
///   codeword, which bounds the codeword degree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub arrival_ratio: f64,
    pub filter_probability: f64,
    pub max_lookback: usize,
}

impl Params {
    /// Validate and construct.
    ///
    /// Rejects non-finite or non-positive arrival ratios, filter
    /// probabilities outside [0, 1], and combinations where f·l exceeds 1
    /// (no valid initial degree distribution exists there).
    pub fn new(
        arrival_ratio: f64,
        filter_probability: f64,
        max_lookback: usize,
    ) -> Result<Self, Error> {
        if !arrival_ratio.is_finite() || arrival_ratio <= 0.0 {
            return Err(Error::InvalidArrivalRatio(arrival_ratio));
        }
        if !filter_probability.is_finite() || !(0.0..=1.0).contains(&filter_probability) {
            return Err(Error::InvalidFilterProbability(filter_probability));
        }
        if filter_probability * arrival_ratio > 1.0 {
            return Err(Error::ReferenceProbabilityOutOfRange {
                filter: filter_probability,
                arrival: arrival_ratio,
            });
        }
        Ok(Self {
            arrival_ratio,
            filter_probability,
            max_lookback,
        })
    }

    /// Largest codeword degree tracked: floor(l · MaxT).
    pub fn max_degree(&self) -> usize {
        (self.arrival_ratio * self.max_lookback as f64).floor() as usize
    }

    /// Expected references a single timeslot contributes to a codeword: f·l.
    /// Also the success probability of the initial degree distribution.
    pub fn reference_probability(&self) -> f64 {
        self.filter_probability * self.arrival_ratio
    }
}
