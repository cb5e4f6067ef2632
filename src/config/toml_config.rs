use crate::domain::model::{Language, PlanRequest};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::{validate_path, validate_required_field, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub generation: GenerationConfig,
    pub store: StoreConfig,
    pub request: Option<RequestConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub mode: String,
    pub endpoint: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub role: Option<String>,
    pub goal: Option<String>,
    pub hours: Option<u32>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("generation.endpoint", &self.generation.endpoint)?;

        let valid_modes = ["http", "local", "none"];
        if !valid_modes.contains(&self.store.mode.as_str()) {
            return Err(PlanError::InvalidConfigValueError {
                field: "store.mode".to_string(),
                value: self.store.mode.clone(),
                reason: format!("Unsupported mode. Valid modes: {}", valid_modes.join(", ")),
            });
        }

        // http 模式必須給出存儲端點
        if self.store.mode == "http" {
            let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
            validate_url("store.endpoint", endpoint)?;
        }

        validate_path("store.output_path", self.output_path())?;

        Ok(())
    }

    /// 組出請求，缺的欄位補上內建預設值
    pub fn to_request(&self) -> PlanRequest {
        let request = self.request.clone().unwrap_or(RequestConfig {
            role: None,
            goal: None,
            hours: None,
            language: None,
        });
        PlanRequest {
            role: request
                .role
                .unwrap_or_else(|| "Front-End Engineer (early-career)".to_string()),
            goal: request.goal.unwrap_or_else(|| {
                "Become proficient in TypeScript, accessibility (WCAG), and testing; \
                 ship a feature end-to-end."
                    .to_string()
            }),
            hours: request.hours.unwrap_or(4),
            language: request.language.unwrap_or(Language::English),
        }
    }

    pub fn model(&self) -> &str {
        self.generation
            .model
            .as_deref()
            .unwrap_or(crate::adapters::generation::DEFAULT_MODEL)
    }

    pub fn store_mode(&self) -> &str {
        &self.store.mode
    }

    pub fn output_path(&self) -> &str {
        self.store.output_path.as_deref().unwrap_or("./plans")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn generation_endpoint(&self) -> &str {
        &self.generation.endpoint
    }

    fn model(&self) -> &str {
        self.model()
    }

    fn store_endpoint(&self) -> &str {
        self.store.endpoint.as_deref().unwrap_or("")
    }

    fn output_path(&self) -> &str {
        self.output_path()
    }

    fn persist_plans(&self) -> bool {
        self.store.mode != "none"
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
