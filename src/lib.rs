//! # Ripple — density-evolution analysis of codeword peeling
//!
//! Estimates what fraction of transactions become decodable when codewords are
//! built by sampling transactions from a lookback window and a peeling
//! (belief-propagation-style) decoder runs to convergence. Instead of
//! simulating a finite decoder, the crate tracks the probability distribution
//! over codeword degree in the large-population limit — **density evolution** —
//! and iterates it to a fixed point.
//!
//! ## Algorithm overview
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | init | [`evolution`] | `D[i] = P(Binomial(MaxT, f·l) = i)`: degree distribution of freshly built codewords |
//! | peel round | [`evolution`] | fold degree-1 mass into degree 0, estimate the newly-decoded transaction fraction via [`occupancy`], redistribute every degree class through [`binomial`] |
//! | fixed point | [`evolution`] | stop once the conversion fraction drops below the stuck threshold |
//!
//! A "codeword" references the transactions it sampled; its *degree* is the
//! number of references not yet resolved. Every degree-1 codeword pins down
//! exactly one transaction, which in turn lowers the degree of the other
//! codewords referencing it — the ripple that drives peeling.
//!
//! Two cross-checking companions complete the crate: [`simulation`] runs an
//! actual finite-population peeling decoder over sampled codeword histories,
//! and [`sweep`] evaluates the recurrence across parameter grids in parallel.
//!
//! ## Binaries
//!
//! - `analyze` — one parameter set, one line per peeling round
//! - `sweep` — filter-probability grid, JSON output
//! - `simulate` — finite-population trials vs. the asymptotic prediction

pub mod binomial;
pub mod config;
pub mod error;
pub mod evolution;
pub mod occupancy;
pub mod simulation;
pub mod sweep;

pub use config::Params;
pub use error::Error;
pub use evolution::{DensityEvolution, FixedPoint};
