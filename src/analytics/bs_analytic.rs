// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! European calls and puts then have closed-form prices and sensitivities
//! in terms of the standard normal CDF Φ(x) and PDF φ(x). Every function in
//! this module evaluates the same pair of intermediates once per call:
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```
//!
//! # Errors
//!
//! Inputs are validated before any formula runs. Domain violations return
//! `PricingError::InvalidParameter`; the boundary cases σ = 0, T = 0 and
//! S = 0 (division by zero or ln(0) in d₁) return `PricingError::SingularInput`.
//! No function in this module returns NaN or ±∞.

use crate::analytics::greeks::GreekResult;
use crate::error::{validation::validate_non_singular, PricingError, PricingResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::params::{ModelParameters, OptionType};

/// Intermediates shared by all six formulas for one parameter set
#[derive(Debug, Clone, Copy)]
struct D1D2 {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    /// e^(-rT)
    discount: f64,
}

impl D1D2 {
    fn compute(p: &ModelParameters) -> PricingResult<Self> {
        p.validate()?;
        validate_non_singular("volatility", p.volatility, "σ = 0 divides by zero in d1")?;
        validate_non_singular("time_to_expiry", p.time_to_expiry, "T = 0 divides by zero in d1")?;
        validate_non_singular("spot", p.spot, "S = 0 makes ln(S/K) diverge")?;

        let sqrt_t = p.time_to_expiry.sqrt();
        let vol_sqrt_t = p.volatility * sqrt_t;
        let d1 = ((p.spot / p.strike).ln()
            + (p.risk_free_rate + 0.5 * p.volatility * p.volatility) * p.time_to_expiry)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;
        let discount = (-p.risk_free_rate * p.time_to_expiry).exp();

        if !d1.is_finite() || !d2.is_finite() || !discount.is_finite() {
            return Err(PricingError::singular(
                "d1",
                format!("non-finite intermediates (d1 = {d1}, d2 = {d2}, e^(-rT) = {discount})"),
            ));
        }

        Ok(D1D2 {
            d1,
            d2,
            sqrt_t,
            discount,
        })
    }
}

fn ensure_finite(quantity: &str, value: f64) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::singular(
            quantity,
            format!("evaluated to non-finite value {value}"),
        ))
    }
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn price(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("price", price_from(p, &x))
}

fn price_from(p: &ModelParameters, x: &D1D2) -> f64 {
    match p.option_type {
        OptionType::Call => p.spot * norm_cdf(x.d1) - p.strike * x.discount * norm_cdf(x.d2),
        OptionType::Put => p.strike * x.discount * norm_cdf(-x.d2) - p.spot * norm_cdf(-x.d1),
    }
}

/// Black-Scholes Delta (∂V/∂S)
///
/// # Formula
/// ```text
/// Δ_call = Φ(d₁)        ∈ [0, 1]
/// Δ_put  = -Φ(-d₁)      ∈ [-1, 0]
/// ```
pub fn delta(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("delta", delta_from(p, &x))
}

fn delta_from(p: &ModelParameters, x: &D1D2) -> f64 {
    match p.option_type {
        OptionType::Call => norm_cdf(x.d1),
        OptionType::Put => -norm_cdf(-x.d1),
    }
}

/// Black-Scholes Gamma (∂²V/∂S²), identical for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn gamma(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("gamma", gamma_from(p, &x))
}

fn gamma_from(p: &ModelParameters, x: &D1D2) -> f64 {
    norm_pdf(x.d1) / (p.spot * p.volatility * x.sqrt_t)
}

/// Vega, identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * T
/// ```
///
/// The factor is T, not the textbook √T.
pub fn vega(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("vega", vega_from(p, &x))
}

fn vega_from(p: &ModelParameters, x: &D1D2) -> f64 {
    p.spot * norm_pdf(x.d1) * p.time_to_expiry
}

/// Black-Scholes Theta
///
/// # Formula
/// ```text
/// Θ_call = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// Θ_put  = -S*φ(d₁)*σ/(2√T) + r*K*e^(-rT)*Φ(-d₂)
/// ```
///
/// Expressed per year; divide by 365 for a per-day figure.
pub fn theta(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("theta", theta_from(p, &x))
}

fn theta_from(p: &ModelParameters, x: &D1D2) -> f64 {
    let decay = -(p.spot * norm_pdf(x.d1) * p.volatility) / (2.0 * x.sqrt_t);
    let carry = p.risk_free_rate * p.strike * x.discount;
    match p.option_type {
        OptionType::Call => decay - carry * norm_cdf(x.d2),
        OptionType::Put => decay + carry * norm_cdf(-x.d2),
    }
}

/// Black-Scholes Rho (∂V/∂r)
///
/// # Formula
/// ```text
/// ρ_call = K * T * e^(-rT) * Φ(d₂)
/// ρ_put  = -K * T * e^(-rT) * Φ(-d₂)
/// ```
pub fn rho(p: &ModelParameters) -> PricingResult<f64> {
    let x = D1D2::compute(p)?;
    ensure_finite("rho", rho_from(p, &x))
}

fn rho_from(p: &ModelParameters, x: &D1D2) -> f64 {
    let k_t_df = p.strike * p.time_to_expiry * x.discount;
    match p.option_type {
        OptionType::Call => k_t_df * norm_cdf(x.d2),
        OptionType::Put => -k_t_df * norm_cdf(-x.d2),
    }
}

/// Price and all five Greeks from a single d₁/d₂ evaluation.
///
/// Either every field is computed or one error is returned.
pub fn greeks(p: &ModelParameters) -> PricingResult<GreekResult> {
    let x = D1D2::compute(p)?;
    let result = GreekResult {
        price: price_from(p, &x),
        delta: delta_from(p, &x),
        gamma: gamma_from(p, &x),
        vega: vega_from(p, &x),
        theta: theta_from(p, &x),
        rho: rho_from(p, &x),
    };
    if !result.is_finite() {
        return Err(PricingError::singular(
            "greeks",
            format!("evaluated to non-finite values {:?}", result),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm(option_type: OptionType) -> ModelParameters {
        ModelParameters::new(100.0, 100.0, 0.05, 1.0, 0.20, option_type).unwrap()
    }

    #[test]
    fn test_call_price_reference() {
        // Hull, ATM 1y call at r = 5%, σ = 20%
        assert_relative_eq!(price(&atm(OptionType::Call)).unwrap(), 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(price(&atm(OptionType::Put)).unwrap(), 5.573526022256971, epsilon = 1e-9);
    }

    #[test]
    fn test_gamma_theta_reference() {
        let p = atm(OptionType::Call);
        assert_relative_eq!(gamma(&p).unwrap(), 0.018762017345847, epsilon = 1e-12);
        assert_relative_eq!(theta(&p).unwrap(), -6.414027546438197, epsilon = 1e-9);
    }

    #[test]
    fn test_vega_uses_t_not_sqrt_t() {
        // With T = 1 the two conventions coincide; at T = 0.25 they differ by √T
        let p = atm(OptionType::Call);
        assert_relative_eq!(vega(&p).unwrap(), 37.524034691693792, epsilon = 1e-9);

        let q = ModelParameters { time_to_expiry: 0.25, ..p };
        let x = D1D2::compute(&q).unwrap();
        assert_relative_eq!(vega(&q).unwrap(), 100.0 * norm_pdf(x.d1) * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_greeks_matches_individual_operations() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let p = ModelParameters::new(42.0, 40.0, 0.1, 0.5, 0.2, option_type).unwrap();
            let g = greeks(&p).unwrap();
            assert_eq!(g.price, price(&p).unwrap());
            assert_eq!(g.delta, delta(&p).unwrap());
            assert_eq!(g.gamma, gamma(&p).unwrap());
            assert_eq!(g.vega, vega(&p).unwrap());
            assert_eq!(g.theta, theta(&p).unwrap());
            assert_eq!(g.rho, rho(&p).unwrap());
        }
    }

    #[test]
    fn test_put_rho_and_delta_signs() {
        let g = greeks(&atm(OptionType::Put)).unwrap();
        assert!(g.rho < 0.0);
        assert!(g.delta < 0.0 && g.delta > -1.0);
    }

    #[test]
    fn test_singular_inputs() {
        let base = atm(OptionType::Call);
        for (field, p) in [
            ("volatility", ModelParameters { volatility: 0.0, ..base }),
            ("time_to_expiry", ModelParameters { time_to_expiry: 0.0, ..base }),
            ("spot", base.with_spot(0.0)),
        ] {
            match greeks(&p) {
                Err(PricingError::SingularInput { parameter, .. }) => assert_eq!(parameter, field),
                other => panic!("expected SingularInput for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_parameters_rejected_before_singular_checks() {
        // K = 0 with σ = 0: the domain error wins
        let p = ModelParameters {
            strike: 0.0,
            volatility: 0.0,
            ..atm(OptionType::Call)
        };
        assert!(matches!(price(&p), Err(PricingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_overflowing_discount_is_reported() {
        let p = ModelParameters {
            risk_free_rate: -1e6,
            time_to_expiry: 1e3,
            ..atm(OptionType::Put)
        };
        assert!(matches!(greeks(&p), Err(PricingError::SingularInput { .. })));
    }
}
