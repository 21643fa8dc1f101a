// src/error.rs
use std::fmt;

/// Error types for the lattice-bs library
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Invalid market parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Step count below the floor a computation needs
    InsufficientSteps {
        method: String,
        steps: usize,
        minimum: usize,
    },

    /// Risk-neutral probability outside [0, 1] for the chosen step size
    ArbitrageViolation { p_rn: f64, dt: f64 },

    /// Option type string that is neither CALL nor PUT
    UnrecognizedOptionType { value: String },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatticeError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            LatticeError::InsufficientSteps {
                method,
                steps,
                minimum,
            } => {
                write!(
                    f,
                    "{} needs at least {} steps, got {}",
                    method, minimum, steps
                )
            }
            LatticeError::ArbitrageViolation { p_rn, dt } => {
                write!(f,
                    "Risk-neutral probability p = {:.6} lies outside [0, 1] at Δt = {:.6}. Lattice is not arbitrage-free.",
                    p_rn, dt
                )
            }
            LatticeError::UnrecognizedOptionType { value } => {
                write!(f, "Unrecognized option type '{}': expected CALL or PUT", value)
            }
            LatticeError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for LatticeError {}

/// Result type alias for lattice-bs operations
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Validation utilities
pub mod validation {
    use super::{LatticeError, LatticeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> LatticeResult<()> {
        // NaN fails the comparison, so check it explicitly
        if value.is_nan() || value <= 0.0 {
            Err(LatticeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> LatticeResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(LatticeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> LatticeResult<()> {
        if !value.is_finite() {
            Err(LatticeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a step count against the floor of `method`
    pub fn validate_steps(method: &str, steps: usize, minimum: usize) -> LatticeResult<()> {
        if steps < minimum {
            Err(LatticeError::InsufficientSteps {
                method: method.to_string(),
                steps,
                minimum,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a risk-neutral probability
    pub fn validate_probability(p_rn: f64, dt: f64) -> LatticeResult<()> {
        if !p_rn.is_finite() || !(0.0..=1.0).contains(&p_rn) {
            Err(LatticeError::ArbitrageViolation { p_rn, dt })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("s0", 41.0).is_ok());
        assert!(validate_positive("s0", 0.0).is_err());
        assert!(validate_positive("s0", -1.0).is_err());
        assert!(validate_positive("s0", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sigma", 0.0).is_ok());
        assert!(validate_non_negative("sigma", 0.3).is_ok());
        assert!(validate_non_negative("sigma", -0.1).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_steps() {
        assert!(validate_steps("binomial", 2, 2).is_ok());
        assert_eq!(
            validate_steps("binomial", 1, 2),
            Err(LatticeError::InsufficientSteps {
                method: "binomial".to_string(),
                steps: 1,
                minimum: 2,
            })
        );
    }

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability(0.0, 0.01).is_ok());
        assert!(validate_probability(0.5, 0.01).is_ok());
        assert!(validate_probability(1.0, 0.01).is_ok());
        assert!(validate_probability(1.2, 0.01).is_err());
        assert!(validate_probability(-0.01, 0.01).is_err());
        assert!(validate_probability(f64::NAN, 0.01).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = LatticeError::InvalidParameters {
            parameter: "k".to_string(),
            value: -40.0,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("k"));
        assert!(display.contains("-40"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_arbitrage_violation_display() {
        let error = LatticeError::ArbitrageViolation { p_rn: 1.25, dt: 0.5 };

        let display = format!("{}", error);
        assert!(display.contains("1.25"));
        assert!(display.contains("0.5"));
        assert!(display.contains("arbitrage"));
    }
}
