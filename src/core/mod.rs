pub mod allocator;
pub mod engine;
pub mod nutrition;
pub mod pipeline;
pub mod stomach;
pub mod strategy;

pub use crate::domain::model::{
    AllocationResult, DetectedItem, EnrichedItem, Goal, Plan, StrategyResponse,
};
pub use crate::domain::ports::{ItemDetector, PlannerSettings, Storage};
pub use crate::utils::error::Result;

// Decimal rounding used throughout the pipeline so outputs are reproducible
// bit-for-bit across runs.

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
