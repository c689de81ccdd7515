pub mod bs_analytic;
pub mod greeks;

pub use greeks::{Greek, GreekResult};
