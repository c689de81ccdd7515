// demos/demo.rs
use bsm_greeks::analytics::bs_analytic;
use bsm_greeks::params::{ModelParameters, OptionType};
use bsm_greeks::report;
use bsm_greeks::sweep::{run_sweep, SweepConfig};
use bsm_greeks::Greek;
use std::fs::File;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let csv_path = args.get(1).map(String::as_str);

    // S = 30, K = 50, r = 30%, 200 days, σ = 30%
    let call = ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, OptionType::Call)
        .expect("Valid parameters");
    let put = call.with_option_type(OptionType::Put);

    println!("Black-Scholes Greeks Demo");
    println!("=========================\n");

    for params in [call, put] {
        let g = bs_analytic::greeks(&params).expect("Non-singular inputs");
        println!("{} option:", params.option_type);
        for greek in Greek::ALL {
            println!("  {:<6} {:>12.6}", greek, g.get(greek));
        }
        println!();
    }

    let parity_lhs = bs_analytic::price(&call).unwrap() - bs_analytic::price(&put).unwrap();
    let parity_rhs = call.spot - call.strike * (-call.risk_free_rate * call.time_to_expiry).exp();
    println!("Put-call parity: C - P = {:.10}, S - K·e^(-rT) = {:.10}\n", parity_lhs, parity_rhs);

    let sweep = run_sweep(&call, &SweepConfig::default()).expect("Valid sweep configuration");
    println!(
        "Spot sweep: {} samples on [{}, {}], {} invalid",
        sweep.len(),
        sweep.axis()[0],
        sweep.axis()[sweep.len() - 1],
        sweep.failure_count()
    );
    for f in sweep.failures() {
        println!("  index {} (S = {}): {}", f.index, f.spot, f.error);
    }

    let delta = sweep.series(Greek::Delta);
    for i in (0..sweep.len()).step_by(10) {
        match delta[i] {
            Some(d) => println!("  S = {:>5}  delta = {:.4}", sweep.axis()[i], d),
            None => println!("  S = {:>5}  delta = n/a", sweep.axis()[i]),
        }
    }

    if let Some(path) = csv_path {
        let file = File::create(path).expect("Could not create output file");
        report::write_sweep_csv(file, &sweep).expect("Could not write sweep");
        println!("\nSweep written to {}", path);
    }
}
