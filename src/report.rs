// src/report.rs
//! Serialisation of quotes and sweeps for downstream consumers
//!
//! Sweeps are written as CSV (one row per axis point), JSON (parallel
//! arrays with `null` at invalid samples) or a plain-text table. Invalid
//! samples are always present in the output with their error, never dropped.

use crate::analytics::bs_analytic;
use crate::analytics::greeks::{Greek, GreekResult};
use crate::error::PricingResult;
use crate::params::{ModelParameters, OptionType};
use crate::sweep::{GreekSeries, SweepResult};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Call and put prices plus the Greeks of the selected option type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub parameters: ModelParameters,
    pub call_price: f64,
    pub put_price: f64,
    pub greeks: GreekResult,
}

impl Quote {
    pub fn compute(params: &ModelParameters) -> PricingResult<Self> {
        let call_price = bs_analytic::price(&params.with_option_type(OptionType::Call))?;
        let put_price = bs_analytic::price(&params.with_option_type(OptionType::Put))?;
        let greeks = bs_analytic::greeks(params)?;
        Ok(Quote {
            parameters: *params,
            call_price,
            put_price,
            greeks,
        })
    }
}

pub fn write_quote_json<W: Write>(writer: W, quote: &Quote) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(writer, quote)?;
    Ok(())
}

pub fn render_quote_table(quote: &Quote) -> String {
    let p = &quote.parameters;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "S = {}  K = {}  r = {}  T = {:.6}  σ = {}",
        p.spot, p.strike, p.risk_free_rate, p.time_to_expiry, p.volatility
    );
    let _ = writeln!(out, "{:<12}{:>14.3}", "Call Price", quote.call_price);
    let _ = writeln!(out, "{:<12}{:>14.3}", "Put Price", quote.put_price);
    for greek in &Greek::ALL[1..] {
        let label = format!("{} {}", capitalize(greek.as_str()), p.option_type);
        let _ = writeln!(out, "{:<12}{:>14.3}", label, quote.greeks.get(*greek));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn header() -> Vec<&'static str> {
    let mut cols = vec!["spot", "valid"];
    cols.extend(Greek::ALL.iter().map(|g| g.as_str()));
    cols.push("error");
    cols
}

/// Write one CSV row per axis point; numeric cells are empty for invalid samples
pub fn write_sweep_csv<W: Write>(writer: W, sweep: &SweepResult) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header())?;

    for (spot, outcome) in sweep.axis().iter().zip(sweep.outcomes()) {
        let mut row = vec![spot.to_string()];
        match outcome {
            Ok(g) => {
                row.push("true".to_string());
                row.extend(Greek::ALL.iter().map(|k| g.get(*k).to_string()));
                row.push(String::new());
            }
            Err(e) => {
                row.push("false".to_string());
                row.extend(Greek::ALL.iter().map(|_| String::new()));
                row.push(e.to_string());
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct FailureRecord {
    index: usize,
    spot: f64,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct SweepReport<'a> {
    option_type: OptionType,
    axis: &'a [f64],
    valid: Vec<bool>,
    #[serde(flatten)]
    series: GreekSeries,
    failures: Vec<FailureRecord>,
}

pub fn write_sweep_json<W: Write>(
    writer: W,
    params: &ModelParameters,
    sweep: &SweepResult,
) -> Result<(), ReportError> {
    let report = SweepReport {
        option_type: params.option_type,
        axis: sweep.axis(),
        valid: sweep.valid_mask(),
        series: sweep.columns(),
        failures: sweep
            .failures()
            .map(|f| FailureRecord {
                index: f.index,
                spot: f.spot,
                kind: f.error.kind(),
                message: f.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

pub fn render_sweep_table(sweep: &SweepResult) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>10}", "spot");
    for greek in Greek::ALL {
        let _ = write!(out, "{:>14}", greek.as_str());
    }
    out.push('\n');

    for (spot, outcome) in sweep.axis().iter().zip(sweep.outcomes()) {
        let _ = write!(out, "{:>10.2}", spot);
        match outcome {
            Ok(g) => {
                for greek in Greek::ALL {
                    let _ = write!(out, "{:>14.6}", g.get(greek));
                }
            }
            Err(e) => {
                let _ = write!(out, "  invalid: {}", e);
            }
        }
        out.push('\n');
    }
    out
}
