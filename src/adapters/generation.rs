use crate::domain::model::{GenerationReply, LearningPlan};
use crate::domain::ports::Generator;
use crate::utils::error::{PlanError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

// 固定採樣參數，不開放給使用者調整
const TEMPERATURE: f32 = 0.6;
const TOP_K: u32 = 32;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// 文字生成服務的 HTTP 客戶端。
///
/// 送出 `{prompt, model, generationConfig}`，取回 `{text, plan?}`。
/// 不重試；非成功回應直接轉成錯誤往上拋
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpGenerator {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    #[serde(rename = "generationConfig")]
    generation_config: SamplingConfig,
}

#[derive(Debug, Serialize)]
struct SamplingConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl SamplingConfig {
    fn fixed() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: String,
    plan: Option<LearningPlan>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    code: Option<String>,
}

impl Generator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationReply> {
        let body = GenerateRequest {
            prompt,
            model: &self.model,
            generation_config: SamplingConfig::fixed(),
        };

        tracing::debug!("📡 POST {} (model: {})", self.endpoint, self.model);
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            // 錯誤本文解析不出來就退回通用訊息
            let error_body: ErrorBody = response.json().await.unwrap_or_default();

            if error_body.code.as_deref() == Some("MISSING_ENV") {
                return Err(PlanError::MissingServerKey);
            }

            let message = error_body
                .message
                .or(error_body.error)
                .unwrap_or_else(|| "Failed to generate content".to_string());
            tracing::debug!("📡 Generation service returned {}: {}", status, message);
            return Err(PlanError::GenerationError { message });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(GenerationReply {
            text: parsed.text,
            plan: parsed.plan,
        })
    }
}
