pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{Language, PlanRequest};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

/// 計畫存儲後端的選擇
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    Http,
    Local,
    None,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "learnpath")]
#[command(about = "Generate a personalized 4-week learning path with an AI service")]
pub struct CliConfig {
    /// Audience role the plan is written for
    #[arg(long, default_value = "Front-End Engineer (early-career)")]
    pub role: String,

    /// The learner's goal, in one sentence
    #[arg(
        long,
        default_value = "Become proficient in TypeScript, accessibility (WCAG), and testing; ship a feature end-to-end."
    )]
    pub goal: String,

    /// Available hours per week (1-40 suggested, not enforced)
    #[arg(long, default_value = "4")]
    pub hours: u32,

    /// Output language for the generated plan
    #[arg(long, value_enum, default_value = "english")]
    pub language: Language,

    #[arg(long, default_value = "http://localhost:3000/api/generate")]
    pub generation_endpoint: String,

    #[arg(long, default_value = "gemini-2.0-flash")]
    pub model: String,

    /// Where generated plans are persisted
    #[arg(long, value_enum, default_value = "local")]
    pub store: StoreKind,

    #[arg(long, default_value = "http://localhost:3000/api/plans")]
    pub store_endpoint: String,

    #[arg(long, default_value = "./plans")]
    pub output_path: String,

    /// Print the composed instruction text and exit without calling the service
    #[arg(long)]
    pub print_prompt: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase memory and timing stats")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn request(&self) -> PlanRequest {
        PlanRequest {
            role: self.role.clone(),
            goal: self.goal.clone(),
            hours: self.hours,
            language: self.language,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn generation_endpoint(&self) -> &str {
        &self.generation_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn store_endpoint(&self) -> &str {
        &self.store_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn persist_plans(&self) -> bool {
        self.store != StoreKind::None
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("role", &self.role)?;
        validate_non_empty_string("goal", &self.goal)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("generation_endpoint", &self.generation_endpoint)?;
        if self.store == StoreKind::Http {
            validate_url("store_endpoint", &self.store_endpoint)?;
        }
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
