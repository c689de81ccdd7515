// src/sweep/axis.rs
use crate::error::{validation::*, PricingError, PricingResult};

/// Upper bound on samples in one axis
pub const MAX_AXIS_SAMPLES: usize = 1_000_000;

/// Distance above `floor(spot)` covered by the default chart axis
pub const DEFAULT_EXTENSION: f64 = 50.0;

/// Strictly increasing, evenly spaced grid of spot prices
#[derive(Debug, Clone, PartialEq)]
pub struct SpotAxis {
    points: Vec<f64>,
}

impl SpotAxis {
    /// Grid `start, start + step, ...` up to and including `end`.
    ///
    /// Each sample is computed as `start + i * step` so the last point does
    /// not drift from accumulated rounding.
    pub fn new(start: f64, end: f64, step: f64) -> PricingResult<Self> {
        validate_finite("start", start)?;
        validate_finite("end", end)?;
        validate_finite("step", step)?;
        validate_non_negative("start", start)?;

        if step <= 0.0 {
            return Err(PricingError::InvalidConfiguration {
                field: "step".to_string(),
                reason: format!("must be positive, got {}", step),
            });
        }
        if end < start {
            return Err(PricingError::InvalidConfiguration {
                field: "end".to_string(),
                reason: format!("axis end {} is below start {}", end, start),
            });
        }

        // Tolerate end landing a few ulps short of a grid point
        let span = (end - start) / step;
        let last = (span + 1e-9).floor();
        if last >= MAX_AXIS_SAMPLES as f64 {
            return Err(PricingError::InvalidConfiguration {
                field: "step".to_string(),
                reason: format!(
                    "axis would hold {} samples, exceeds maximum allowed ({})",
                    last + 1.0,
                    MAX_AXIS_SAMPLES
                ),
            });
        }

        let n = last as usize + 1;
        let points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();

        // A step below the float spacing at this magnitude rounds neighbours together
        if let Some(i) = points.windows(2).position(|w| w[0] >= w[1]) {
            return Err(PricingError::InvalidConfiguration {
                field: "step".to_string(),
                reason: format!(
                    "step {} is below float resolution near {}; samples {} and {} coincide",
                    step,
                    points[i],
                    i,
                    i + 1
                ),
            });
        }
        Ok(SpotAxis { points })
    }

    /// Grid from `start` to `floor(anchor) + extension` at `step`
    pub fn anchored(start: f64, anchor: f64, extension: f64, step: f64) -> PricingResult<Self> {
        validate_finite("spot", anchor)?;
        validate_non_negative("spot", anchor)?;
        Self::new(start, anchor.floor() + extension, step)
    }

    /// Unit-step integer axis `0..=floor(spot) + 50`
    pub fn around_spot(spot: f64) -> PricingResult<Self> {
        Self::anchored(0.0, spot, DEFAULT_EXTENSION, 1.0)
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}
