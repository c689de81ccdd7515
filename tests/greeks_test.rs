// tests/greeks_test.rs
use approx::assert_relative_eq;
use bsm_greeks::analytics::bs_analytic;
use bsm_greeks::params::{ModelParameters, OptionType};
use bsm_greeks::PricingError;

fn dashboard_defaults(option_type: OptionType) -> ModelParameters {
    // S = 30, K = 50, r = 0.30, 200 days to expiry, σ = 0.30
    ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, option_type)
        .expect("Valid parameters")
}

#[test]
fn test_dashboard_defaults_call() {
    let g = bs_analytic::greeks(&dashboard_defaults(OptionType::Call)).unwrap();

    println!("\nCall greeks at defaults: {:?}", g);

    assert_relative_eq!(g.price, 0.20127087931972198, max_relative = 1e-9);
    assert_relative_eq!(g.delta, 0.07366555225206928, max_relative = 1e-9);
    assert_relative_eq!(g.gamma, 0.02095857873979588, max_relative = 1e-9);
    assert_relative_eq!(g.vega, 2.2952568360928014, max_relative = 1e-9);
    assert_relative_eq!(g.theta, -1.45143114543444, max_relative = 1e-9);
    assert_relative_eq!(g.rho, 1.100655171639647, max_relative = 1e-9);

    assert!(g.delta > 0.0 && g.delta < 1.0);
    assert!(g.gamma > 0.0);
    assert!(g.vega > 0.0);
}

#[test]
fn test_dashboard_defaults_put() {
    let call = dashboard_defaults(OptionType::Call);
    let put = dashboard_defaults(OptionType::Put);

    assert_relative_eq!(bs_analytic::price(&put).unwrap(), 12.622097850339024, max_relative = 1e-9);

    // Gamma and vega do not depend on the option type
    assert_eq!(bs_analytic::gamma(&put).unwrap(), bs_analytic::gamma(&call).unwrap());
    assert_eq!(bs_analytic::vega(&put).unwrap(), bs_analytic::vega(&call).unwrap());
}

#[test]
fn test_bs_call_atm_reference() {
    let p = ModelParameters::new(100.0, 100.0, 0.05, 1.0, 0.20, OptionType::Call).unwrap();

    let analytic_gamma = bs_analytic::gamma(&p).unwrap();
    let expected_gamma = 0.018762017345847;
    let rel_error = (analytic_gamma - expected_gamma).abs() / expected_gamma;
    assert!(rel_error < 1e-9, "Relative error for Gamma exceeds tolerance: {}", rel_error);

    let analytic_rho = bs_analytic::rho(&p).unwrap();
    assert_relative_eq!(analytic_rho, 53.232481545376345, max_relative = 1e-9);
}

#[test]
fn test_zero_volatility_is_singular() {
    let p = ModelParameters {
        volatility: 0.0,
        ..dashboard_defaults(OptionType::Call)
    };
    for result in [
        bs_analytic::price(&p),
        bs_analytic::delta(&p),
        bs_analytic::gamma(&p),
        bs_analytic::vega(&p),
        bs_analytic::theta(&p),
        bs_analytic::rho(&p),
    ] {
        match result {
            Err(PricingError::SingularInput { parameter, .. }) => assert_eq!(parameter, "volatility"),
            other => panic!("expected SingularInput, got {:?}", other),
        }
    }
}

#[test]
fn test_zero_strike_is_invalid() {
    let p = ModelParameters {
        strike: 0.0,
        ..dashboard_defaults(OptionType::Put)
    };
    match bs_analytic::greeks(&p) {
        Err(PricingError::InvalidParameter { parameter, value, .. }) => {
            assert_eq!(parameter, "strike");
            assert_eq!(value, 0.0);
        }
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_negative_expiry_invalid_but_zero_expiry_singular() {
    let base = dashboard_defaults(OptionType::Call);
    assert!(matches!(
        bs_analytic::price(&ModelParameters { time_to_expiry: -0.1, ..base }),
        Err(PricingError::InvalidParameter { .. })
    ));
    assert!(matches!(
        bs_analytic::price(&ModelParameters { time_to_expiry: 0.0, ..base }),
        Err(PricingError::SingularInput { .. })
    ));
}

#[test]
fn test_nan_input_never_leaks() {
    let p = ModelParameters {
        risk_free_rate: f64::NAN,
        ..dashboard_defaults(OptionType::Call)
    };
    assert!(matches!(bs_analytic::greeks(&p), Err(PricingError::InvalidParameter { .. })));
}

#[test]
fn test_negative_rate_is_priced() {
    let p = ModelParameters {
        risk_free_rate: -0.01,
        ..dashboard_defaults(OptionType::Call)
    };
    let g = bs_analytic::greeks(&p).unwrap();
    assert!(g.price > 0.0);
    assert!(g.rho > 0.0);
}
