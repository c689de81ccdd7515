//! Model inputs for the Black-Scholes engine
//!
//! `ModelParameters` carries the five market inputs (S, K, r, T, σ) plus the
//! option type. It is a plain `Copy` value: every engine call receives it
//! explicitly, and sweeps derive per-sample copies through [`ModelParameters::with_spot`].

use crate::error::{validation::*, PricingError, PricingResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day-count denominator for converting calendar days to a year fraction (ACT/365 Fixed)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    /// Accepts the single-letter tags `c`/`p` as well as `call`/`put`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            _ => Err(PricingError::UnrecognizedOptionType { tag: s.to_string() }),
        }
    }
}

/// Black-Scholes model inputs for a single European option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Annualized continuously-compounded risk-free rate (r)
    pub risk_free_rate: f64,
    /// Year fraction until expiry (T)
    pub time_to_expiry: f64,
    /// Annualized volatility (σ)
    pub volatility: f64,
    #[serde(default)]
    pub option_type: OptionType,
}

impl ModelParameters {
    /// Build a parameter set, rejecting inputs outside the model's domain.
    ///
    /// Only domain violations (`InvalidParameter`) are reported here. Boundary
    /// values such as `volatility == 0` are accepted and surface as
    /// `SingularInput` when a formula is evaluated.
    pub fn new(
        spot: f64,
        strike: f64,
        risk_free_rate: f64,
        time_to_expiry: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        let params = ModelParameters {
            spot,
            strike,
            risk_free_rate,
            time_to_expiry,
            volatility,
            option_type,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build a parameter set from a day count, using T = days / 365.
    pub fn from_days(
        spot: f64,
        strike: f64,
        risk_free_rate: f64,
        days_to_expiry: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        validate_finite("days_to_expiry", days_to_expiry)?;
        Self::new(
            spot,
            strike,
            risk_free_rate,
            days_to_expiry / DAYS_PER_YEAR,
            volatility,
            option_type,
        )
    }

    /// Check domain constraints: all fields finite, K > 0, T ≥ 0, σ ≥ 0, S ≥ 0.
    pub fn validate(&self) -> PricingResult<()> {
        validate_finite("spot", self.spot)?;
        validate_finite("strike", self.strike)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_finite("time_to_expiry", self.time_to_expiry)?;
        validate_finite("volatility", self.volatility)?;

        validate_positive("strike", self.strike)?;
        validate_non_negative("time_to_expiry", self.time_to_expiry)?;
        validate_non_negative("volatility", self.volatility)?;
        validate_non_negative("spot", self.spot)?;
        Ok(())
    }

    /// Copy of these parameters with a different spot
    pub fn with_spot(&self, spot: f64) -> Self {
        ModelParameters { spot, ..*self }
    }

    /// Copy of these parameters with a different option type
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        ModelParameters {
            option_type,
            ..*self
        }
    }
}

/// ACT/365 Fixed year fraction between a valuation date and an expiry date.
///
/// Returns `InvalidParameter` unless `expiry` is strictly after `valuation`.
pub fn year_fraction(valuation: NaiveDate, expiry: NaiveDate) -> PricingResult<f64> {
    let days = (expiry - valuation).num_days();
    if days <= 0 {
        return Err(PricingError::InvalidParameter {
            parameter: "expiry_date".to_string(),
            value: days as f64,
            constraint: format!("must be after valuation date {}", valuation),
        });
    }
    Ok(days as f64 / DAYS_PER_YEAR)
}
