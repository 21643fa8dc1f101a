// src/lattice/params.rs
//! Cox-Ross-Rubinstein lattice parameters
//!
//! # Formulas
//! ```text
//! Δt  = T / N
//! u   = exp(σ√Δt),  d = 1/u
//! p   = (exp((r - q)Δt) - d) / (u - d)
//! q_p = 1 - p
//! ```
//!
//! The node reached after `depth` steps with `index` down-moves carries the
//! underlying price `S * u^(depth - index) * d^index`.

use crate::error::{validation::*, LatticeResult};
use crate::market::MarketParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeParams {
    pub steps: usize,
    pub dt: f64,
    pub u: f64,
    pub d: f64,
    pub p_rn: f64,
    pub q_rn: f64,
    pub discount: f64, // exp(-r Δt)
}

impl LatticeParams {
    /// Derive the per-step multipliers and risk-neutral probability
    ///
    /// # Errors
    ///
    /// - `InsufficientSteps` when `steps == 0`
    /// - `ArbitrageViolation` when p falls outside [0, 1] or is not finite
    ///   (zero volatility gives u = d and an undefined p)
    pub fn new(market: &MarketParams, steps: usize) -> LatticeResult<Self> {
        validate_steps("lattice", steps, 1)?;

        let dt = market.t / steps as f64;
        let u = (market.sigma * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p_rn = (((market.r - market.q) * dt).exp() - d) / (u - d);
        validate_probability(p_rn, dt)?;

        let params = LatticeParams {
            steps,
            dt,
            u,
            d,
            p_rn,
            q_rn: 1.0 - p_rn,
            discount: (-market.r * dt).exp(),
        };
        tracing::debug!(steps, dt, u, d, p_rn, "lattice parameters");
        Ok(params)
    }

    /// Underlying price at node (`depth`, `index`), `index` counting down-moves
    pub fn node_price(&self, s0: f64, depth: usize, index: usize) -> f64 {
        s0 * self.u.powi((depth - index) as i32) * self.d.powi(index as i32)
    }
}
