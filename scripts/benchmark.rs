// scripts/benchmark.rs
use bsm_greeks::analytics::bs_analytic;
use bsm_greeks::math_utils::Timer;
use bsm_greeks::params::{ModelParameters, OptionType};
use bsm_greeks::sweep::{run_sweep, SweepConfig};
use std::env;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    samples: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    invalid: usize,
}

fn base_params() -> ModelParameters {
    ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, OptionType::Call)
        .expect("valid benchmark parameters")
}

fn run_point_benchmark(evaluations: usize) -> BenchmarkResult {
    let params = base_params();
    let mut checksum = 0.0;

    let mut timer = Timer::new();
    timer.start();
    for i in 0..evaluations {
        let p = params.with_spot(1.0 + (i % 100) as f64);
        if let Ok(g) = bs_analytic::greeks(&p) {
            checksum += g.price;
        }
    }
    let time_ms = timer.elapsed_ms();
    std::hint::black_box(checksum);

    BenchmarkResult {
        name: "greeks (single point)".to_string(),
        samples: evaluations,
        time_ms,
        throughput_per_sec: evaluations as f64 / (time_ms / 1000.0),
        invalid: 0,
    }
}

fn run_sweep_benchmarks() -> Vec<BenchmarkResult> {
    let params = base_params();
    let mut results = Vec::new();

    for &step in &[1.0, 0.01, 0.0001] {
        for parallel in [false, true] {
            let cfg = SweepConfig {
                step,
                parallel,
                ..Default::default()
            };

            let mut timer = Timer::new();
            timer.start();
            let sweep = run_sweep(&params, &cfg).expect("valid sweep configuration");
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: format!(
                    "sweep step={} ({})",
                    step,
                    if parallel { "parallel" } else { "sequential" }
                ),
                samples: sweep.len(),
                time_ms,
                throughput_per_sec: sweep.len() as f64 / (time_ms / 1000.0),
                invalid: sweep.failure_count(),
            });
        }
    }

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(filename)?;
    wtr.write_record([
        "benchmark",
        "samples",
        "time_ms",
        "throughput_per_sec",
        "invalid",
        "os",
        "cpu_cores",
        "rayon_threads",
        "rust_version",
    ])?;
    for r in results {
        wtr.write_record([
            r.name.clone(),
            r.samples.to_string(),
            format!("{:.3}", r.time_ms),
            format!("{:.0}", r.throughput_per_sec),
            r.invalid.to_string(),
            system_info.os.clone(),
            system_info.cpu_cores.to_string(),
            system_info.rayon_threads.to_string(),
            system_info.rust_version.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() {
    println!("bsm-greeks Performance Benchmark");
    println!("================================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut all_results = vec![run_point_benchmark(1_000_000)];
    all_results.extend(run_sweep_benchmarks());

    println!("{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<36} {:>10} {:>12} {:>14} {:>6}",
        "Benchmark", "Samples", "Time (ms)", "Evals/sec", "Bad"
    );
    println!("{:-<80}", "");
    for r in &all_results {
        println!(
            "{:<36} {:>10} {:>12.2} {:>14.0} {:>6}",
            r.name, r.samples, r.time_ms, r.throughput_per_sec, r.invalid
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nFailed to write {}: {}", filename, e),
    }
}
