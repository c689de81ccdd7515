//! bsm - Black-Scholes quotes and spot sweeps from the command line
//!
//! # Commands
//!
//! - `bsm quote` - Call and put prices plus the Greeks of the selected type
//! - `bsm sweep` - Price and Greek series over a spot axis (CSV, JSON or table)
//!
//! Inputs not given on the command line come from `--config` (TOML), then
//! `BSM_*` environment variables, then built-in defaults.

use bsm_greeks::config::{ConfigError, PricerConfig};
use bsm_greeks::params::{year_fraction, ModelParameters, OptionType, DAYS_PER_YEAR};
use bsm_greeks::report::{self, Quote, ReportError};
use bsm_greeks::sweep::{run_sweep, SweepConfig};
use bsm_greeks::PricingError;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, CliError>;

/// Black-Scholes option prices and Greeks
#[derive(Parser)]
#[command(name = "bsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one option and report its Greeks
    Quote {
        #[command(flatten)]
        inputs: ModelInputs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = QuoteFormat::Table)]
        format: QuoteFormat,
    },

    /// Evaluate price and Greeks over a grid of spot prices
    Sweep {
        #[command(flatten)]
        inputs: ModelInputs,

        #[command(flatten)]
        axis: SweepFlags,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SweepFormat::Csv)]
        format: SweepFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct ModelInputs {
    /// Underlying asset price (S)
    #[arg(short = 's', long)]
    spot: Option<f64>,

    /// Strike price (K)
    #[arg(short = 'k', long)]
    strike: Option<f64>,

    /// Risk-free rate (r), continuously compounded
    #[arg(short = 'r', long)]
    rate: Option<f64>,

    /// Calendar days to expiry; T = days / 365
    #[arg(short = 'd', long, conflicts_with = "expiry_date")]
    days: Option<f64>,

    /// Expiry date (YYYY-MM-DD), used instead of --days
    #[arg(long)]
    expiry_date: Option<NaiveDate>,

    /// Valuation date for --expiry-date (YYYY-MM-DD, defaults to today)
    #[arg(long, requires = "expiry_date")]
    valuation_date: Option<NaiveDate>,

    /// Volatility (σ)
    #[arg(long)]
    volatility: Option<f64>,

    /// Option type: c, p, call or put
    #[arg(short = 't', long)]
    option_type: Option<String>,
}

impl ModelInputs {
    /// Merge with configured defaults (CLI takes precedence)
    fn resolve(&self, config: &PricerConfig) -> Result<ModelParameters> {
        let d = &config.defaults;
        let option_type = match &self.option_type {
            Some(tag) => tag.parse::<OptionType>()?,
            None => d.option_type,
        };

        let time_to_expiry = match self.expiry_date {
            Some(expiry) => {
                let valuation = self
                    .valuation_date
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                year_fraction(valuation, expiry)?
            }
            None => self.days.unwrap_or(d.days_to_expiry) / DAYS_PER_YEAR,
        };

        let params = ModelParameters::new(
            self.spot.unwrap_or(d.spot),
            self.strike.unwrap_or(d.strike),
            self.rate.unwrap_or(d.risk_free_rate),
            time_to_expiry,
            self.volatility.unwrap_or(d.volatility),
            option_type,
        )?;
        debug!(?params, "resolved model parameters");
        Ok(params)
    }
}

#[derive(Args, Debug, Default)]
struct SweepFlags {
    /// First spot on the axis
    #[arg(long)]
    start: Option<f64>,

    /// Axis ends at floor(spot) + extension
    #[arg(long)]
    extension: Option<f64>,

    /// Axis step
    #[arg(long)]
    step: Option<f64>,

    /// Spot the axis is built around (defaults to --spot)
    #[arg(long)]
    anchor: Option<f64>,

    /// Evaluate samples in parallel
    #[arg(long)]
    parallel: bool,
}

impl SweepFlags {
    /// Overlay the flags that were given onto configured sweep settings
    fn apply(&self, sweep: &mut SweepConfig) {
        if let Some(v) = self.start {
            sweep.start = v;
        }
        if let Some(v) = self.extension {
            sweep.extension_above_spot = v;
        }
        if let Some(v) = self.step {
            sweep.step = v;
        }
        if self.anchor.is_some() {
            sweep.anchor_spot = self.anchor;
        }
        sweep.parallel |= self.parallel;
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QuoteFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SweepFormat {
    Csv,
    Json,
    Table,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut config = PricerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Quote { inputs, format } => {
            let params = inputs.resolve(&config)?;
            let quote = Quote::compute(&params)?;
            let stdout = io::stdout();
            match format {
                QuoteFormat::Table => print!("{}", report::render_quote_table(&quote)),
                QuoteFormat::Json => {
                    report::write_quote_json(stdout.lock(), &quote)?;
                    println!();
                }
            }
        }
        Commands::Sweep {
            inputs,
            axis,
            format,
            output,
        } => {
            let params = inputs.resolve(&config)?;
            axis.apply(&mut config.sweep);

            let sweep = run_sweep(&params, &config.sweep)?;
            info!(
                samples = sweep.len(),
                invalid = sweep.failure_count(),
                "sweep complete"
            );

            let mut out = open_output(output.as_ref())?;
            match format {
                SweepFormat::Csv => report::write_sweep_csv(&mut out, &sweep)?,
                SweepFormat::Json => {
                    report::write_sweep_json(&mut out, &params, &sweep)?;
                    writeln!(out)?;
                }
                SweepFormat::Table => write!(out, "{}", report::render_sweep_table(&sweep))?,
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
