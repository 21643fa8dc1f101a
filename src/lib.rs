//! # lattice-bs: Binomial Lattices for European Options
//!
//! A Rust library for pricing European options and their Greeks (delta,
//! gamma, theta) on recombining binomial lattices that approximate the
//! Black-Scholes model, with refinements that reduce discretization error.
//!
//! ## Key Features
//!
//! - **Single backward pass**: call and put induced together, Greeks read
//!   from the nodes at depths 0, 1 and 2
//! - **Pluggable terminal layer**: payoff leaves or Black-Scholes leaves
//!   share one induction routine
//! - **Refined estimators**: average binomial, BBS and Richardson-extrapolated BBSR
//! - **Closed-form reference**: Black-Scholes with continuous dividend yield
//! - **Convergence sweeps**: parallel estimator grids with error summaries
//!
//! ## Quick Start
//!
//! ```rust
//! use lattice_bs::{bbsr_price_and_greeks, price_and_greeks, MarketParams};
//!
//! let market = MarketParams {
//!     s0: 41.0,       // Spot price
//!     k: 40.0,        // Strike
//!     t: 1.0,         // Maturity
//!     sigma: 0.3,     // Volatility
//!     q: 0.01,        // Dividend yield
//!     r: 0.03,        // Risk-free rate
//!     t_start: 0.0,   // Valuation time
//! };
//!
//! let tree = price_and_greeks(&market, 100, Some("PUT")).expect("valid inputs");
//! let bbsr = bbsr_price_and_greeks(&market, 100, Some("PUT")).expect("valid inputs");
//! println!("binomial {:.4}  bbsr {:.4}  delta {:.4}", tree.value, bbsr.value, bbsr.delta);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Each step multiplies the underlying by u = exp(σ√Δt) or d = 1/u with
//! risk-neutral probability p = (exp((r-q)Δt) - d)/(u - d). Values are
//! discounted back from the terminal layer with e^(-rΔt). Inputs whose p
//! falls outside [0, 1] are rejected as arbitrage-inconsistent.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod market;
pub mod analytics;
pub mod lattice;
pub mod sweep;
pub mod output;

// Re-export commonly used types for convenience
pub use error::{LatticeError, LatticeResult};
pub use lattice::estimators::{
    average_price_and_greeks, bbs_price_and_greeks, bbsr_price_and_greeks, binomial_values,
    price_and_greeks, Estimator,
};
pub use lattice::greeks::PricingResult;
pub use market::{MarketParams, OptionType};
