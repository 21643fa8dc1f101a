// src/market.rs
//! Market inputs shared by every pricing call
//!
//! `MarketParams` is immutable input: each estimator borrows it and derives
//! its own lattice from it. `OptionType` selects which side of a call/put
//! computation is reported.

use crate::error::{validation::*, LatticeError, LatticeResult};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Resolve an optional, case-insensitive option type string
    ///
    /// Missing or unrecognized values fall back to `Call`. The fallback is
    /// never silent: a `tracing` warning is emitted for each case. Use
    /// `str::parse::<OptionType>()` to reject unknown values instead.
    pub fn resolve(option_type: Option<&str>) -> OptionType {
        match option_type {
            None => {
                tracing::warn!("No option type indicated, assuming CALL.");
                OptionType::Call
            }
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(option_type = %raw, "Unrecognized option type, assuming CALL.");
                OptionType::Call
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }
}

impl FromStr for OptionType {
    type Err = LatticeError;

    fn from_str(s: &str) -> LatticeResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CALL" => Ok(OptionType::Call),
            "PUT" => Ok(OptionType::Put),
            _ => Err(LatticeError::UnrecognizedOptionType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParams {
    pub s0: f64,      // Spot price
    pub k: f64,       // Strike price
    pub t: f64,       // Maturity
    pub sigma: f64,   // Volatility
    pub q: f64,       // Continuous dividend yield
    pub r: f64,       // Risk-free rate
    pub t_start: f64, // Valuation start time (BBS leaves only)
}

impl MarketParams {
    /// Validate the market inputs
    pub fn validate(&self) -> LatticeResult<()> {
        validate_positive("s0", self.s0)?;
        validate_finite("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("k", self.k)?;
        validate_positive("t", self.t)?;
        validate_finite("t", self.t)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_finite("q", self.q)?;
        validate_finite("r", self.r)?;
        validate_finite("t_start", self.t_start)?;
        Ok(())
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        MarketParams {
            s0: 41.0,
            k: 40.0,
            t: 1.0,
            sigma: 0.3,
            q: 0.01,
            r: 0.03,
            t_start: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_but_exact() {
        assert_eq!("call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("Put".parse::<OptionType>(), Ok(OptionType::Put));
        assert!(" PUT ".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(
            err,
            LatticeError::UnrecognizedOptionType {
                value: "straddle".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_defaults_to_call() {
        assert_eq!(OptionType::resolve(None), OptionType::Call);
        assert_eq!(OptionType::resolve(Some("digital")), OptionType::Call);
        assert_eq!(OptionType::resolve(Some("put")), OptionType::Put);
    }

    #[test]
    fn test_market_validation() {
        assert!(MarketParams::default().validate().is_ok());

        let zero_vol = MarketParams {
            sigma: 0.0,
            ..Default::default()
        };
        assert!(zero_vol.validate().is_ok());

        for bad in [
            MarketParams { s0: 0.0, ..Default::default() },
            MarketParams { s0: f64::INFINITY, ..Default::default() },
            MarketParams { k: -40.0, ..Default::default() },
            MarketParams { k: f64::INFINITY, ..Default::default() },
            MarketParams { t: 0.0, ..Default::default() },
            MarketParams { sigma: -0.3, ..Default::default() },
            MarketParams { r: f64::NAN, ..Default::default() },
        ] {
            assert!(matches!(
                bad.validate(),
                Err(LatticeError::InvalidParameters { .. })
            ));
        }
    }
}
