// src/lattice/pricer.rs
//! Backward-induction core shared by every lattice estimator
//!
//! # Algorithm
//!
//! 1. Derive `LatticeParams` for N steps.
//! 2. Fill the terminal layer for both sides through a `TerminalLayer`
//!    strategy. Plain trees use payoffs at depth N; BBS uses closed-form
//!    values at depth N-1.
//! 3. Step each side back to the root, recording depths 2, 1 and 0.
//! 4. Convert the recorded nodes into value, delta, gamma and theta.
//!
//! No interior node is compared against exercise value: the trees are
//! strictly European.

use super::greeks::{GreekSnapshot, PricingResult, SnapshotRecorder};
use super::layer::LatticeLayer;
use super::params::LatticeParams;
use crate::analytics::bs_analytic;
use crate::error::{validation::*, LatticeError, LatticeResult};
use crate::market::{MarketParams, OptionType};

/// Initializer for the deepest layer the induction starts from
pub trait TerminalLayer {
    /// Estimator name used in errors and logs
    fn name(&self) -> &'static str;

    /// Depth of the terminal layer in an N-step lattice (N ≥ 1)
    fn depth(&self, steps: usize) -> usize;

    /// Value of a terminal node whose underlying price is `s_node`
    fn node_value(
        &self,
        market: &MarketParams,
        lattice: &LatticeParams,
        s_node: f64,
        option_type: OptionType,
    ) -> f64;
}

/// European payoff at maturity
#[derive(Clone, Copy, Debug, Default)]
pub struct PayoffLeaves;

impl TerminalLayer for PayoffLeaves {
    fn name(&self) -> &'static str {
        "binomial"
    }

    fn depth(&self, steps: usize) -> usize {
        steps
    }

    fn node_value(
        &self,
        market: &MarketParams,
        _lattice: &LatticeParams,
        s_node: f64,
        option_type: OptionType,
    ) -> f64 {
        match option_type {
            OptionType::Call => (s_node - market.k).max(0.0),
            OptionType::Put => (market.k - s_node).max(0.0),
        }
    }
}

/// Black-Scholes values one step before maturity
#[derive(Clone, Copy, Debug, Default)]
pub struct BlackScholesLeaves;

impl TerminalLayer for BlackScholesLeaves {
    fn name(&self) -> &'static str {
        "BBS"
    }

    fn depth(&self, steps: usize) -> usize {
        steps.saturating_sub(1)
    }

    fn node_value(
        &self,
        market: &MarketParams,
        lattice: &LatticeParams,
        s_node: f64,
        option_type: OptionType,
    ) -> f64 {
        // exactly one Δt of maturity left at every leaf
        bs_analytic::bs_price(
            market.t_start,
            s_node,
            market.k,
            market.t_start + lattice.dt,
            market.sigma,
            market.r,
            market.q,
            option_type,
        )
    }
}

/// Root values of both sides
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideValues {
    pub call: f64,
    pub put: f64,
}

impl SideValues {
    pub fn select(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call,
            OptionType::Put => self.put,
        }
    }
}

/// Value and Greeks of both sides from a single lattice pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SidedResult {
    pub call: PricingResult,
    pub put: PricingResult,
}

impl SidedResult {
    pub fn select(&self, option_type: OptionType) -> PricingResult {
        match option_type {
            OptionType::Call => self.call,
            OptionType::Put => self.put,
        }
    }

    pub fn average(&self, other: &SidedResult) -> SidedResult {
        SidedResult {
            call: self.call.average(&other.call),
            put: self.put.average(&other.put),
        }
    }

    pub fn richardson(fine: &SidedResult, coarse: &SidedResult) -> SidedResult {
        SidedResult {
            call: PricingResult::richardson(&fine.call, &coarse.call),
            put: PricingResult::richardson(&fine.put, &coarse.put),
        }
    }
}

/// Everything a single backward pass produces
#[derive(Clone, Debug)]
pub struct LatticeOutcome {
    pub lattice: LatticeParams,
    pub values: SideValues,
    pub call_snapshot: Option<GreekSnapshot>,
    pub put_snapshot: Option<GreekSnapshot>,
}

/// Binomial pricer parameterized by its terminal-layer strategy
#[derive(Clone, Copy, Debug, Default)]
pub struct BinomialPricer<L: TerminalLayer> {
    leaves: L,
}

impl<L: TerminalLayer> BinomialPricer<L> {
    pub fn new(leaves: L) -> Self {
        BinomialPricer { leaves }
    }

    pub fn name(&self) -> &'static str {
        self.leaves.name()
    }

    /// Smallest N whose lattice reaches depth 2
    pub fn min_greek_steps(&self) -> usize {
        (2..).find(|&n| self.leaves.depth(n) >= 2).unwrap_or(usize::MAX)
    }

    /// Run the backward induction for both sides
    ///
    /// Snapshots are present only when the lattice spans depths 0 to 2.
    pub fn run(&self, market: &MarketParams, steps: usize) -> LatticeResult<LatticeOutcome> {
        market.validate()?;
        validate_steps(self.name(), steps, 1)?;
        let lattice = LatticeParams::new(market, steps)?;
        let depth = self.leaves.depth(steps);

        let terminal = |option_type: OptionType| {
            LatticeLayer::from_fn(depth, |i| {
                let s_node = lattice.node_price(market.s0, depth, i);
                self.leaves.node_value(market, &lattice, s_node, option_type)
            })
        };
        let mut call = terminal(OptionType::Call);
        let mut put = terminal(OptionType::Put);

        let mut call_recorder = SnapshotRecorder::default();
        let mut put_recorder = SnapshotRecorder::default();
        loop {
            call_recorder.record(&call);
            put_recorder.record(&put);
            if call.depth() == 0 {
                break;
            }
            call.step_back(&lattice);
            put.step_back(&lattice);
        }

        Ok(LatticeOutcome {
            lattice,
            values: SideValues {
                call: call.root(),
                put: put.root(),
            },
            call_snapshot: call_recorder.finish(),
            put_snapshot: put_recorder.finish(),
        })
    }

    /// Value and Greeks of both sides
    ///
    /// # Errors
    ///
    /// `InsufficientSteps` when the lattice does not reach depth 2, on top of
    /// the parameter and arbitrage checks of `run`.
    pub fn price_and_greeks(&self, market: &MarketParams, steps: usize) -> LatticeResult<SidedResult> {
        validate_steps(self.name(), steps, self.min_greek_steps())?;
        let outcome = self.run(market, steps)?;

        match (outcome.call_snapshot, outcome.put_snapshot) {
            (Some(call), Some(put)) => Ok(SidedResult {
                call: call.greeks(market.s0, &outcome.lattice),
                put: put.greeks(market.s0, &outcome.lattice),
            }),
            // unreachable once the step floor holds
            _ => Err(LatticeError::InsufficientSteps {
                method: self.name().to_string(),
                steps,
                minimum: self.min_greek_steps(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_tree_by_hand() {
        let market = MarketParams::default();
        let outcome = BinomialPricer::new(PayoffLeaves).run(&market, 1).unwrap();
        let l = outcome.lattice;

        let up = market.s0 * l.u;
        let expected_call = l.discount * (l.p_rn * (up - market.k).max(0.0));
        assert!((outcome.values.call - expected_call).abs() < 1e-12);
        assert!(outcome.call_snapshot.is_none());
    }

    #[test]
    fn test_two_step_tree_snapshots_terminal_layer() {
        let market = MarketParams::default();
        let outcome = BinomialPricer::new(PayoffLeaves).run(&market, 2).unwrap();
        let snapshot = outcome.put_snapshot.unwrap();
        let l = outcome.lattice;

        assert_eq!(snapshot.v22, (market.k - market.s0 * l.u * l.u).max(0.0));
        assert_eq!(snapshot.v00, outcome.values.put);
    }

    #[test]
    fn test_bbs_terminal_depth() {
        assert_eq!(BlackScholesLeaves.depth(10), 9);
        assert_eq!(PayoffLeaves.depth(10), 10);
        assert_eq!(BinomialPricer::new(PayoffLeaves).min_greek_steps(), 2);
        assert_eq!(BinomialPricer::new(BlackScholesLeaves).min_greek_steps(), 3);
    }

    #[test]
    fn test_single_step_bbs_is_closed_form() {
        let market = MarketParams::default();
        let outcome = BinomialPricer::new(BlackScholesLeaves).run(&market, 1).unwrap();
        let exact = bs_analytic::bs_put_price(0.0, market.s0, market.k, market.t, market.sigma, market.r, market.q);
        assert!((outcome.values.put - exact).abs() < 1e-12);
    }

    #[test]
    fn test_greeks_need_depth_two() {
        let market = MarketParams::default();
        assert!(matches!(
            BinomialPricer::new(PayoffLeaves).price_and_greeks(&market, 1),
            Err(LatticeError::InsufficientSteps { steps: 1, minimum: 2, .. })
        ));
        assert!(matches!(
            BinomialPricer::new(BlackScholesLeaves).price_and_greeks(&market, 2),
            Err(LatticeError::InsufficientSteps { steps: 2, minimum: 3, .. })
        ));
    }
}
