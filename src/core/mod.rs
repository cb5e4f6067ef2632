pub mod engine;
pub mod markdown;
pub mod pipeline;
pub mod prompt;

pub use crate::domain::model::{
    GenerationReply, Language, LearningPlan, PlanOutcome, PlanRecord, PlanRequest, Week,
};
pub use crate::domain::ports::{ConfigProvider, Generator, Pipeline, PlanStore};
pub use crate::utils::error::Result;
