pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, ManualDetector, SampleDetector};
pub use config::{CliConfig, ResolvedSettings};
pub use core::engine::StrategyEngine;
pub use core::pipeline::{plan_strategy, PlanRequest};
pub use domain::model::StrategyResponse;
pub use utils::error::{PlannerError, Result};
