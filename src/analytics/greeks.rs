// src/analytics/greeks.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six quantities produced per evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Greek {
    Price,
    Delta,
    Gamma,
    Vega,
    Theta,
    Rho,
}

impl Greek {
    /// All quantities, in report column order
    pub const ALL: [Greek; 6] = [
        Greek::Price,
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Greek::Price => "price",
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price and first/second-order sensitivities of one option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

impl GreekResult {
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Price => self.price,
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        Greek::ALL.iter().all(|g| self.get(*g).is_finite())
    }
}
