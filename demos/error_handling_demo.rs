// demos/error_handling_demo.rs
use bsm_greeks::analytics::bs_analytic;
use bsm_greeks::params::{ModelParameters, OptionType};
use bsm_greeks::sweep::{run_sweep, SweepConfig};
use bsm_greeks::PricingError;

fn main() {
    println!("Error Handling Demo for bsm-greeks");
    println!("==================================\n");

    let base = ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, OptionType::Call)
        .expect("Valid parameters");

    // Test 1: zero strike is outside the model's domain
    println!("1. Testing zero strike...");
    match ModelParameters::new(30.0, 0.0, 0.30, 0.5, 0.30, OptionType::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: zero volatility is singular, not invalid
    println!("\n2. Testing zero volatility...");
    let flat = ModelParameters {
        volatility: 0.0,
        ..base
    };
    match bs_analytic::price(&flat) {
        Err(e @ PricingError::SingularInput { .. }) => println!("   ✓ Caught error: {}", e),
        other => println!("   Unexpected result: {:?}", other),
    }

    // Test 3: unknown option type tag
    println!("\n3. Testing unknown option type tag...");
    match "straddle".parse::<OptionType>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: invalid sweep configuration fails the whole sweep
    println!("\n4. Testing invalid sweep step...");
    let bad_cfg = SweepConfig {
        step: -1.0,
        ..Default::default()
    };
    match run_sweep(&base, &bad_cfg) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: a singular sample does not abort the sweep
    println!("\n5. Testing sweep through S = 0...");
    match run_sweep(&base, &SweepConfig::default()) {
        Ok(sweep) => {
            println!(
                "   ✓ {} samples, {} invalid",
                sweep.len(),
                sweep.failure_count()
            );
            for f in sweep.failures() {
                println!("     [{}] S = {} -> {} ({})", f.index, f.spot, f.error.kind(), f.error);
            }
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    println!("\n✓ Error handling demo complete!");
}
