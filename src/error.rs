// src/error.rs
use thiserror::Error;

/// Error types for the bsm-greeks library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Parameter outside its admissible domain, rejected before any formula runs
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Boundary input the closed forms cannot evaluate (σ = 0, T = 0, S = 0)
    #[error("Singular input '{parameter}': {reason}")]
    SingularInput { parameter: String, reason: String },

    /// Option type tag outside {Call, Put}
    #[error("Unrecognized option type '{tag}': expected one of c, p, call, put")]
    UnrecognizedOptionType { tag: String },

    /// Invalid sweep or configuration settings
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

impl PricingError {
    /// Short machine-readable label for the error kind, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidParameter { .. } => "invalid_parameter",
            PricingError::SingularInput { .. } => "singular_input",
            PricingError::UnrecognizedOptionType { .. } => "unrecognized_option_type",
            PricingError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }

    pub(crate) fn singular(parameter: &str, reason: impl Into<String>) -> Self {
        PricingError::SingularInput {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for bsm-greeks operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        if value <= 0.0 {
            Err(PricingError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricingResult<()> {
        if value < 0.0 {
            Err(PricingError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is strictly non-zero; zero is a singular boundary
    pub fn validate_non_singular(name: &str, value: f64, reason: &str) -> PricingResult<()> {
        if value == 0.0 {
            Err(PricingError::singular(name, reason))
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
        assert!(validate_positive("strike", 50.0).is_ok());
        assert!(validate_positive("strike", 0.0).is_err());
        assert!(validate_positive("strike", -0.1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("volatility", 0.0).is_ok());
        assert!(validate_non_negative("volatility", 0.3).is_ok());
        assert!(validate_non_negative("volatility", -1e-12).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_non_singular() {
        let err = validate_non_singular("volatility", 0.0, "division by zero").unwrap_err();
        assert_eq!(err.kind(), "singular_input");
        assert!(validate_non_singular("volatility", 0.2, "division by zero").is_ok());
    }

    #[test]
    fn test_error_display() {
        let error = PricingError::InvalidParameter {
            parameter: "strike".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("strike"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_unrecognized_option_type_display() {
        let error = PricingError::UnrecognizedOptionType {
            tag: "x".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'x'"));
        assert_eq!(error.kind(), "unrecognized_option_type");
    }
}
