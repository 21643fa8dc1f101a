// src/lattice/estimators.rs
//! Public lattice estimators
//!
//! | Estimator | Construction | Minimum N |
//! |---|---|---|
//! | Binomial | payoff leaves at depth N | 2 |
//! | Average binomial | mean of binomial at N and N+1 | 2 |
//! | BBS | Black-Scholes leaves at depth N-1 | 3 |
//! | BBSR | `2 * BBS(N) - BBS(N/2)` | 6 |
//!
//! Plain trees oscillate as N alternates parity; averaging adjacent N damps
//! the oscillation. BBS replaces the final step with the closed form, leaving
//! a smooth error roughly proportional to 1/N, which BBSR extrapolates away.
//! N/2 truncates, so odd N extrapolate with a step ratio slightly above 2.

use super::greeks::PricingResult;
use super::pricer::{BinomialPricer, BlackScholesLeaves, PayoffLeaves, SideValues, SidedResult};
use crate::error::{validation::*, LatticeResult};
use crate::market::{MarketParams, OptionType};
use std::fmt;

pub const BINOMIAL_MIN_STEPS: usize = 2;
pub const BBS_MIN_STEPS: usize = 3;
pub const BBSR_MIN_STEPS: usize = 2 * BBS_MIN_STEPS;

/// Call and put values of an N-step tree without Greeks (N ≥ 1)
pub fn binomial_values(market: &MarketParams, steps: usize) -> LatticeResult<SideValues> {
    Ok(BinomialPricer::new(PayoffLeaves).run(market, steps)?.values)
}

/// Plain binomial tree, both sides
pub fn binomial(market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
    BinomialPricer::new(PayoffLeaves).price_and_greeks(market, steps)
}

/// Mean of the N and N+1 step trees, both sides
pub fn average_binomial(market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
    validate_steps("average binomial", steps, BINOMIAL_MIN_STEPS)?;
    let even_odd = binomial(market, steps)?;
    let odd_even = binomial(market, steps + 1)?;
    Ok(even_odd.average(&odd_even))
}

/// Binomial tree with Black-Scholes leaves, both sides
pub fn bbs(market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
    BinomialPricer::new(BlackScholesLeaves).price_and_greeks(market, steps)
}

/// Richardson extrapolation of BBS at N and N/2, both sides
pub fn bbsr(market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
    validate_steps("BBSR", steps, BBSR_MIN_STEPS)?;
    let fine = bbs(market, steps)?;
    let coarse = bbs(market, steps / 2)?;
    Ok(SidedResult::richardson(&fine, &coarse))
}

/// Plain binomial value and Greeks for the requested side
///
/// A missing or unrecognized `option_type` prices a call and logs a warning.
pub fn price_and_greeks(
    market: &MarketParams,
    steps: usize,
    option_type: Option<&str>,
) -> LatticeResult<PricingResult> {
    Estimator::Binomial.price(market, steps, OptionType::resolve(option_type))
}

/// Average-binomial value and Greeks for the requested side
pub fn average_price_and_greeks(
    market: &MarketParams,
    steps: usize,
    option_type: Option<&str>,
) -> LatticeResult<PricingResult> {
    Estimator::AverageBinomial.price(market, steps, OptionType::resolve(option_type))
}

/// BBS value and Greeks for the requested side, valued from `market.t_start`
pub fn bbs_price_and_greeks(
    market: &MarketParams,
    steps: usize,
    option_type: Option<&str>,
) -> LatticeResult<PricingResult> {
    Estimator::Bbs.price(market, steps, OptionType::resolve(option_type))
}

/// BBSR value and Greeks for the requested side, valued from `market.t_start`
pub fn bbsr_price_and_greeks(
    market: &MarketParams,
    steps: usize,
    option_type: Option<&str>,
) -> LatticeResult<PricingResult> {
    Estimator::Bbsr.price(market, steps, OptionType::resolve(option_type))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Estimator {
    Binomial,
    AverageBinomial,
    Bbs,
    Bbsr,
}

impl Estimator {
    pub const ALL: [Estimator; 4] = [
        Estimator::Binomial,
        Estimator::AverageBinomial,
        Estimator::Bbs,
        Estimator::Bbsr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Estimator::Binomial => "binomial",
            Estimator::AverageBinomial => "average_binomial",
            Estimator::Bbs => "bbs",
            Estimator::Bbsr => "bbsr",
        }
    }

    pub fn min_steps(&self) -> usize {
        match self {
            Estimator::Binomial | Estimator::AverageBinomial => BINOMIAL_MIN_STEPS,
            Estimator::Bbs => BBS_MIN_STEPS,
            Estimator::Bbsr => BBSR_MIN_STEPS,
        }
    }

    /// Both sides at N steps
    pub fn price_both(&self, market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
        tracing::debug!(estimator = self.name(), steps, "pricing");
        match self {
            Estimator::Binomial => binomial(market, steps),
            Estimator::AverageBinomial => average_binomial(market, steps),
            Estimator::Bbs => bbs(market, steps),
            Estimator::Bbsr => bbsr(market, steps),
        }
    }

    pub fn price(
        &self,
        market: &MarketParams,
        steps: usize,
        option_type: OptionType,
    ) -> LatticeResult<PricingResult> {
        Ok(self.price_both(market, steps)?.select(option_type))
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
