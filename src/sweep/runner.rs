// src/sweep/runner.rs
//! Spot sweeps for charting price and Greek curves
//!
//! A sweep holds every parameter fixed except the spot, rebuilds the
//! parameter set at each axis point and evaluates the full Greek set there.
//!
//! # Failure isolation
//!
//! Only an unbuildable axis fails the sweep as a whole. Each sample keeps its
//! own `Result`, so a singular point (the default axis always starts at
//! S = 0, where ln(S/K) diverges) is reported at its index while every other
//! sample carries valid values.
//!
//! # Ordering
//!
//! With `parallel` enabled samples are evaluated on the rayon pool; results
//! are still collected in axis order.

use crate::analytics::bs_analytic;
use crate::analytics::greeks::{Greek, GreekResult};
use crate::error::{validation::*, PricingError, PricingResult};
use crate::params::ModelParameters;
use crate::sweep::axis::{SpotAxis, DEFAULT_EXTENSION};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Axis and execution settings for a spot sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First spot on the axis
    pub start: f64,
    /// Axis ends at `floor(anchor) + extension_above_spot`
    pub extension_above_spot: f64,
    pub step: f64,
    /// Spot the axis is built around; `None` uses the parameters' own spot
    pub anchor_spot: Option<f64>,
    /// Evaluate samples on the rayon thread pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            start: 0.0,
            extension_above_spot: DEFAULT_EXTENSION,
            step: 1.0,
            anchor_spot: None,
            parallel: false,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> PricingResult<()> {
        validate_finite("start", self.start)?;
        validate_non_negative("start", self.start)?;
        validate_finite("extension_above_spot", self.extension_above_spot)?;
        validate_non_negative("extension_above_spot", self.extension_above_spot)?;
        validate_finite("step", self.step)?;
        if self.step <= 0.0 {
            return Err(PricingError::InvalidConfiguration {
                field: "step".to_string(),
                reason: format!("must be positive, got {}", self.step),
            });
        }
        if let Some(anchor) = self.anchor_spot {
            validate_finite("anchor_spot", anchor)?;
            validate_non_negative("anchor_spot", anchor)?;
        }
        Ok(())
    }

    /// Build the axis for a sweep around `params`
    pub fn axis_for(&self, params: &ModelParameters) -> PricingResult<SpotAxis> {
        self.validate()?;
        let anchor = self.anchor_spot.unwrap_or(params.spot);
        SpotAxis::anchored(self.start, anchor, self.extension_above_spot, self.step)
    }
}

/// The six output sequences of a sweep; `None` marks an invalid sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreekSeries {
    pub price: Vec<Option<f64>>,
    pub delta: Vec<Option<f64>>,
    pub gamma: Vec<Option<f64>>,
    pub vega: Vec<Option<f64>>,
    pub theta: Vec<Option<f64>>,
    pub rho: Vec<Option<f64>>,
}

impl GreekSeries {
    pub fn get(&self, greek: Greek) -> &[Option<f64>] {
        match greek {
            Greek::Price => &self.price,
            Greek::Delta => &self.delta,
            Greek::Gamma => &self.gamma,
            Greek::Vega => &self.vega,
            Greek::Theta => &self.theta,
            Greek::Rho => &self.rho,
        }
    }
}

/// One failed sample of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFailure<'a> {
    pub index: usize,
    pub spot: f64,
    pub error: &'a PricingError,
}

/// Output of [`run_sweep`]: the axis and one outcome per axis point
#[derive(Debug, Clone)]
pub struct SweepResult {
    axis: Vec<f64>,
    outcomes: Vec<PricingResult<GreekResult>>,
}

impl SweepResult {
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    pub fn outcomes(&self) -> &[PricingResult<GreekResult>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        matches!(self.outcomes.get(index), Some(Ok(_)))
    }

    /// Per-index validity flags, aligned with the axis
    pub fn valid_mask(&self) -> Vec<bool> {
        self.outcomes.iter().map(|o| o.is_ok()).collect()
    }

    /// Values of one quantity along the axis
    pub fn series(&self, greek: Greek) -> Vec<Option<f64>> {
        self.outcomes
            .iter()
            .map(|o| o.as_ref().ok().map(|g| g.get(greek)))
            .collect()
    }

    pub fn columns(&self) -> GreekSeries {
        GreekSeries {
            price: self.series(Greek::Price),
            delta: self.series(Greek::Delta),
            gamma: self.series(Greek::Gamma),
            vega: self.series(Greek::Vega),
            theta: self.series(Greek::Theta),
            rho: self.series(Greek::Rho),
        }
    }

    /// Failed samples with their index, spot and error
    pub fn failures(&self) -> impl Iterator<Item = SampleFailure<'_>> {
        self.axis
            .iter()
            .zip(&self.outcomes)
            .enumerate()
            .filter_map(|(index, (&spot, outcome))| {
                outcome.as_ref().err().map(|error| SampleFailure { index, spot, error })
            })
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }
}

/// Evaluate price and Greeks at every point of the configured spot axis.
///
/// # Errors
///
/// Returns an error only when the axis cannot be built (bad config or a
/// negative/non-finite anchor spot). Per-sample failures are kept in the
/// result instead.
pub fn run_sweep(params: &ModelParameters, config: &SweepConfig) -> PricingResult<SweepResult> {
    let axis = config.axis_for(params)?;
    Ok(evaluate_axis(params, axis, config.parallel))
}

/// Evaluate price and Greeks at every point of a pre-built axis
pub fn evaluate_axis(params: &ModelParameters, axis: SpotAxis, parallel: bool) -> SweepResult {
    let axis = axis.into_vec();
    debug!(
        samples = axis.len(),
        first = ?axis.first(),
        last = ?axis.last(),
        parallel,
        option_type = %params.option_type,
        "running spot sweep"
    );

    let evaluate = |&s: &f64| bs_analytic::greeks(&params.with_spot(s));
    let outcomes: Vec<PricingResult<GreekResult>> = if parallel {
        axis.par_iter().map(evaluate).collect()
    } else {
        axis.iter().map(evaluate).collect()
    };

    let result = SweepResult { axis, outcomes };

    let failed = result.failure_count();
    if failed > 0 {
        for f in result.failures() {
            trace!(index = f.index, spot = f.spot, error = %f.error, "sweep sample invalid");
        }
        warn!(
            failed,
            total = result.len(),
            "spot sweep contains invalid samples"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OptionType;

    fn params() -> ModelParameters {
        ModelParameters::from_days(30.0, 50.0, 0.30, 200.0, 0.30, OptionType::Call).unwrap()
    }

    #[test]
    fn test_default_sweep_marks_zero_spot_invalid() {
        let result = run_sweep(&params(), &SweepConfig::default()).unwrap();
        assert_eq!(result.len(), 81);
        assert!(!result.is_valid(0));
        assert!((1..result.len()).all(|i| result.is_valid(i)));

        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 0);
        assert_eq!(failures[0].spot, 0.0);
        assert!(matches!(failures[0].error, PricingError::SingularInput { .. }));
    }

    #[test]
    fn test_columns_are_aligned() {
        let result = run_sweep(&params(), &SweepConfig::default()).unwrap();
        let cols = result.columns();
        for greek in Greek::ALL {
            assert_eq!(cols.get(greek).len(), result.len());
            assert_eq!(cols.get(greek)[0], None);
        }
        assert_eq!(result.valid_mask().len(), result.len());
    }

    #[test]
    fn test_anchor_spot_overrides_params_spot() {
        let config = SweepConfig {
            anchor_spot: Some(10.0),
            ..Default::default()
        };
        let result = run_sweep(&params(), &config).unwrap();
        assert_eq!(*result.axis().last().unwrap(), 60.0);
    }

    #[test]
    fn test_invalid_config_fails_whole_sweep() {
        let config = SweepConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            run_sweep(&params(), &config),
            Err(PricingError::InvalidConfiguration { .. })
        ));
        assert!(run_sweep(&params().with_spot(-1.0), &SweepConfig::default()).is_err());
    }

    #[test]
    fn test_unresolvable_step_fails_whole_sweep() {
        let config = SweepConfig {
            start: 1e16,
            step: 0.5,
            ..Default::default()
        };
        let spot = params().with_spot(1e16);
        assert!(matches!(
            run_sweep(&spot, &config),
            Err(PricingError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_default_config_builds_default_axis() {
        let axis = SweepConfig::default().axis_for(&params()).unwrap();
        assert_eq!(axis, SpotAxis::around_spot(30.0).unwrap());
    }

    #[test]
    fn test_invalid_base_parameters_fail_every_sample() {
        let bad = ModelParameters {
            strike: 0.0,
            ..params()
        };
        let result = run_sweep(&bad, &SweepConfig::default()).unwrap();
        assert_eq!(result.failure_count(), result.len());
    }
}
