pub mod axis;
pub mod runner;

pub use axis::SpotAxis;
pub use runner::{evaluate_axis, run_sweep, GreekSeries, SampleFailure, SweepConfig, SweepResult};
