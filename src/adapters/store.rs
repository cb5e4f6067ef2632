use crate::domain::model::{LearningPlan, PlanRecord};
use crate::domain::ports::PlanStore;
use crate::utils::error::{PlanError, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// 遠端計畫存儲：POST 建立取得 planId，GET /{planId} 回讀
pub struct HttpPlanStore {
    client: Client,
    endpoint: String,
}

impl HttpPlanStore {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    fn read_url(&self, plan_id: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), plan_id)
    }
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(rename = "planId")]
    plan_id: String,
}

#[derive(Debug, Deserialize)]
struct ReadResponse {
    plan: LearningPlan,
}

impl PlanStore for HttpPlanStore {
    async fn create(&self, record: &PlanRecord) -> Result<String> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;

        if !response.status().is_success() {
            return Err(PlanError::StoreError {
                message: format!("create failed with status {}", response.status()),
            });
        }

        let created: CreateResponse = response.json().await?;
        Ok(created.plan_id)
    }

    async fn read(&self, plan_id: &str) -> Result<LearningPlan> {
        let response = self.client.get(self.read_url(plan_id)).send().await?;

        if !response.status().is_success() {
            return Err(PlanError::StoreError {
                message: format!("read of {} failed with status {}", plan_id, response.status()),
            });
        }

        let body: ReadResponse = response.json().await?;
        Ok(body.plan)
    }
}

/// 本地檔案存儲：一份計畫一個 JSON 檔，id 由建立時間戳加序號組成
pub struct LocalPlanStore {
    base_path: String,
    sequence: AtomicU64,
}

impl LocalPlanStore {
    pub fn new(base_path: String) -> Self {
        Self {
            base_path,
            sequence: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("plan-{}-{}", Utc::now().format("%Y%m%d%H%M%S"), seq)
    }

    fn file_path(&self, plan_id: &str) -> std::path::PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", plan_id))
    }
}

impl PlanStore for LocalPlanStore {
    async fn create(&self, record: &PlanRecord) -> Result<String> {
        let plan_id = self.next_id();
        let full_path = self.file_path(&plan_id);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&full_path, json)?;
        tracing::debug!("💾 Wrote plan to {}", full_path.display());

        Ok(plan_id)
    }

    async fn read(&self, plan_id: &str) -> Result<LearningPlan> {
        let data = std::fs::read_to_string(self.file_path(plan_id))?;
        let record: PlanRecord = serde_json::from_str(&data)?;
        Ok(record.plan)
    }
}
