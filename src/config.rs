//! Default model inputs and sweep settings
//!
//! Handles loading configuration from a TOML file and `BSM_*` environment
//! variables. Precedence, highest first: CLI arguments (applied by the
//! binary), environment, file, built-in defaults.

use crate::error::PricingError;
use crate::params::{ModelParameters, OptionType};
use crate::sweep::SweepConfig;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name} = '{value}' is invalid: {reason}")]
    EnvError {
        name: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Invalid(#[from] PricingError),
}

/// Model inputs used when the caller does not supply them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParameterDefaults {
    pub spot: f64,
    pub strike: f64,
    pub risk_free_rate: f64,
    pub days_to_expiry: f64,
    pub volatility: f64,
    #[serde(deserialize_with = "deserialize_option_type")]
    pub option_type: OptionType,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            spot: 30.0,
            strike: 50.0,
            risk_free_rate: 0.30,
            days_to_expiry: 200.0,
            volatility: 0.30,
            option_type: OptionType::Call,
        }
    }
}

impl ParameterDefaults {
    pub fn to_parameters(&self) -> Result<ModelParameters, PricingError> {
        ModelParameters::from_days(
            self.spot,
            self.strike,
            self.risk_free_rate,
            self.days_to_expiry,
            self.volatility,
            self.option_type,
        )
    }
}

fn deserialize_option_type<'de, D>(deserializer: D) -> Result<OptionType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OptionType::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricerConfig {
    pub defaults: ParameterDefaults,
    pub sweep: SweepConfig,
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricerConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BSM_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply `BSM_*` overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = &mut self.defaults;
        for (name, slot) in [
            ("BSM_SPOT", &mut d.spot),
            ("BSM_STRIKE", &mut d.strike),
            ("BSM_RATE", &mut d.risk_free_rate),
            ("BSM_DAYS", &mut d.days_to_expiry),
            ("BSM_VOLATILITY", &mut d.volatility),
        ] {
            if let Some(value) = lookup(name) {
                *slot = value.trim().parse().map_err(|e: std::num::ParseFloatError| {
                    ConfigError::EnvError {
                        name: name.to_string(),
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }

        if let Some(value) = lookup("BSM_OPTION_TYPE") {
            d.option_type = value.parse().map_err(|e: PricingError| ConfigError::EnvError {
                name: "BSM_OPTION_TYPE".to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(value) = lookup("BSM_PARALLEL") {
            self.sweep.parallel = parse_flag(&value).ok_or_else(|| ConfigError::EnvError {
                name: "BSM_PARALLEL".to_string(),
                value: value.clone(),
                reason: "expected one of 1, true, yes, 0, false, no".to_string(),
            })?;
        }

        self.validate()?;
        Ok(())
    }

    /// Build configuration from file (if any) and environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sweep.validate()?;
        Ok(())
    }
}
