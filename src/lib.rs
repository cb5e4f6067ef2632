pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, StoreKind};

pub use adapters::{HttpGenerator, HttpPlanStore, LocalPlanStore};
pub use crate::core::{engine::PlanEngine, pipeline::GenPipeline};
pub use domain::model::{Language, LearningPlan, PlanOutcome, PlanRequest, Week};
pub use utils::error::{PlanError, Result};
