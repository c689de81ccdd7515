//! # bsm-greeks: Black-Scholes Prices and Greeks
//!
//! Closed-form pricing of European calls and puts under the Black-Scholes
//! model, together with Delta, Gamma, Vega, Theta and Rho, and spot sweeps
//! that re-evaluate all six quantities over a grid of underlying prices for
//! charting.
//!
//! ## Key Features
//!
//! - **Pure engine**: every operation is a deterministic function of [`ModelParameters`]
//! - **Typed errors**: invalid and singular inputs are reported, never returned as NaN
//! - **Failure-isolating sweeps**: a bad sample is flagged at its index, the rest stay valid
//! - **Reports**: CSV, JSON and plain-text output for quotes and sweeps
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_greeks::analytics::bs_analytic;
//! use bsm_greeks::params::{ModelParameters, OptionType};
//! use bsm_greeks::sweep::{run_sweep, SweepConfig};
//!
//! // 200 days to expiry, T = 200/365
//! let params = ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, OptionType::Call)
//!     .expect("valid parameters");
//!
//! let greeks = bs_analytic::greeks(&params).expect("non-singular inputs");
//! println!("price {:.4}, delta {:.4}", greeks.price, greeks.delta);
//!
//! // Spot axis 0..=80; the S = 0 sample is flagged invalid
//! let sweep = run_sweep(&params, &SweepConfig::default()).expect("valid axis");
//! assert_eq!(sweep.len(), 81);
//! assert!(!sweep.is_valid(0));
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod math_utils;
pub mod params;
pub mod report;
pub mod sweep;

// Re-export commonly used types for convenience
pub use analytics::{Greek, GreekResult};
pub use error::{PricingError, PricingResult};
pub use params::{ModelParameters, OptionType};
