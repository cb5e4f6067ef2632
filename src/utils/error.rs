use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Server key missing. Add GEMINI_API_KEY to the generation service environment")]
    MissingServerKey,

    #[error("Generation failed: {message}")]
    GenerationError { message: String },

    #[error("Plan store error: {message}")]
    StoreError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    Persistence,
    Data,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlanError::MissingServerKey
            | PlanError::ConfigValidationError { .. }
            | PlanError::InvalidConfigValueError { .. }
            | PlanError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlanError::GenerationError { .. } | PlanError::ApiError(_) => ErrorCategory::Upstream,
            PlanError::StoreError { .. } => ErrorCategory::Persistence,
            PlanError::SerializationError(_) => ErrorCategory::Data,
            PlanError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 缺少伺服器金鑰屬於環境問題，沒有它整個流程無法進行
            PlanError::MissingServerKey => ErrorSeverity::Critical,
            PlanError::ConfigValidationError { .. }
            | PlanError::InvalidConfigValueError { .. }
            | PlanError::MissingConfigError { .. } => ErrorSeverity::High,
            PlanError::GenerationError { .. } | PlanError::ApiError(_) => ErrorSeverity::Medium,
            // 存儲失敗由管道就地回退，不會中斷流程
            PlanError::StoreError { .. } => ErrorSeverity::Low,
            PlanError::SerializationError(_) | PlanError::IoError(_) => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlanError::MissingServerKey => {
                "Set GEMINI_API_KEY in the generation service environment and retry".to_string()
            }
            PlanError::GenerationError { .. } => {
                "Check the generation service status and retry the request".to_string()
            }
            PlanError::ApiError(_) => {
                "Check network connectivity and the configured endpoint URL".to_string()
            }
            PlanError::StoreError { .. } => {
                "The plan store is unreachable; the generated plan was still displayed".to_string()
            }
            PlanError::ConfigValidationError { field, .. }
            | PlanError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
            PlanError::MissingConfigError { field } => {
                format!("Provide the '{}' setting via CLI flag or config file", field)
            }
            PlanError::SerializationError(_) => {
                "The payload shape was unexpected; inspect the service response".to_string()
            }
            PlanError::IoError(_) => {
                "Check file permissions and that the output path exists".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlanError::MissingServerKey => self.to_string(),
            PlanError::GenerationError { message } => message.clone(),
            PlanError::ApiError(_) => "Could not reach the generation service".to_string(),
            PlanError::StoreError { .. } => "Could not save the plan".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
