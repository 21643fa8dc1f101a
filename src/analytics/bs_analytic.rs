// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the risk-neutral measure with continuous dividend yield q:
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! Every function takes the valuation time `t` and the maturity `maturity`
//! and works with the time to expiry τ = maturity - t. Theta is reported as
//! ∂V/∂t, the same sign as the lattice's finite-difference slope.

use crate::lattice::greeks::PricingResult;
use crate::market::OptionType;
use crate::math_utils::{norm_cdf, norm_pdf};

fn d1_d2(s: f64, k: f64, tau: f64, sigma: f64, r: f64, q: f64) -> (f64, f64) {
    let vol_sqrt_tau = sigma * tau.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * tau) / vol_sqrt_tau;
    (d1, d1 - vol_sqrt_tau)
}

/// Black-Scholes European price for either side
///
/// # Parameters
/// - `t`: Valuation time
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `maturity`: Expiry time (τ = maturity - t)
/// - `sigma`: Volatility
/// - `r`: Risk-free rate
/// - `q`: Continuous dividend yield
#[allow(clippy::too_many_arguments)]
pub fn bs_price(
    t: f64,
    s: f64,
    k: f64,
    maturity: f64,
    sigma: f64,
    r: f64,
    q: f64,
    option_type: OptionType,
) -> f64 {
    match option_type {
        OptionType::Call => bs_call_price(t, s, k, maturity, sigma, r, q),
        OptionType::Put => bs_put_price(t, s, k, maturity, sigma, r, q),
    }
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C = S*e^(-qτ)*Φ(d₁) - K*e^(-rτ)*Φ(d₂)
/// d₁ = [ln(S/K) + (r - q + σ²/2)τ] / (σ√τ)
/// d₂ = d₁ - σ√τ
/// ```
pub fn bs_call_price(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, d2) = d1_d2(s, k, tau, sigma, r, q);
    s * (-q * tau).exp() * norm_cdf(d1) - k * (-r * tau).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P = K*e^(-rτ)*Φ(-d₂) - S*e^(-qτ)*Φ(-d₁)
/// ```
pub fn bs_put_price(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, d2) = d1_d2(s, k, tau, sigma, r, q);
    k * (-r * tau).exp() * norm_cdf(-d2) - s * (-q * tau).exp() * norm_cdf(-d1)
}

/// Black-Scholes Delta (∂V/∂S) for European call
///
/// # Formula
/// ```text
/// Δ = e^(-qτ) * Φ(d₁)
/// ```
pub fn bs_call_delta(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, _) = d1_d2(s, k, tau, sigma, r, q);
    (-q * tau).exp() * norm_cdf(d1)
}

/// Black-Scholes Delta (∂V/∂S) for European put
///
/// # Formula
/// ```text
/// Δ = -e^(-qτ) * Φ(-d₁)
/// ```
pub fn bs_put_delta(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, _) = d1_d2(s, k, tau, sigma, r, q);
    -(-q * tau).exp() * norm_cdf(-d1)
}

/// Black-Scholes Gamma (∂²V/∂S²), same for calls and puts
///
/// # Formula
/// ```text
/// Γ = e^(-qτ) * φ(d₁) / (S * σ * √τ)
/// ```
pub fn bs_gamma(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, _) = d1_d2(s, k, tau, sigma, r, q);
    (-q * tau).exp() * norm_pdf(d1) / (s * sigma * tau.sqrt())
}

/// Black-Scholes Theta (∂V/∂t) for European call
///
/// # Formula
/// ```text
/// Θ = -S*e^(-qτ)*φ(d₁)*σ/(2√τ) - r*K*e^(-rτ)*Φ(d₂) + q*S*e^(-qτ)*Φ(d₁)
/// ```
pub fn bs_call_theta(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, d2) = d1_d2(s, k, tau, sigma, r, q);
    let carry = s * (-q * tau).exp();
    (-carry * norm_pdf(d1) * sigma) / (2.0 * tau.sqrt()) - r * k * (-r * tau).exp() * norm_cdf(d2)
        + q * carry * norm_cdf(d1)
}

/// Black-Scholes Theta (∂V/∂t) for European put
///
/// # Formula
/// ```text
/// Θ = -S*e^(-qτ)*φ(d₁)*σ/(2√τ) + r*K*e^(-rτ)*Φ(-d₂) - q*S*e^(-qτ)*Φ(-d₁)
/// ```
pub fn bs_put_theta(t: f64, s: f64, k: f64, maturity: f64, sigma: f64, r: f64, q: f64) -> f64 {
    let tau = maturity - t;
    let (d1, d2) = d1_d2(s, k, tau, sigma, r, q);
    let carry = s * (-q * tau).exp();
    (-carry * norm_pdf(d1) * sigma) / (2.0 * tau.sqrt()) + r * k * (-r * tau).exp() * norm_cdf(-d2)
        - q * carry * norm_cdf(-d1)
}

/// Closed-form value and Greeks bundled like a lattice result
#[allow(clippy::too_many_arguments)]
pub fn bs_greeks(
    t: f64,
    s: f64,
    k: f64,
    maturity: f64,
    sigma: f64,
    r: f64,
    q: f64,
    option_type: OptionType,
) -> PricingResult {
    let gamma = bs_gamma(t, s, k, maturity, sigma, r, q);
    match option_type {
        OptionType::Call => PricingResult {
            value: bs_call_price(t, s, k, maturity, sigma, r, q),
            delta: bs_call_delta(t, s, k, maturity, sigma, r, q),
            gamma,
            theta: bs_call_theta(t, s, k, maturity, sigma, r, q),
        },
        OptionType::Put => PricingResult {
            value: bs_put_price(t, s, k, maturity, sigma, r, q),
            delta: bs_put_delta(t, s, k, maturity, sigma, r, q),
            gamma,
            theta: bs_put_theta(t, s, k, maturity, sigma, r, q),
        },
    }
}
