use crate::domain::model::{GenerationReply, LearningPlan, PlanOutcome, PlanRecord, PlanRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部文字生成服務
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GenerationReply>> + Send;
}

/// 外部計畫存儲：create 回傳不透明 id，read 以 id 取回
pub trait PlanStore: Send + Sync {
    fn create(
        &self,
        record: &PlanRecord,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
    fn read(&self, plan_id: &str)
        -> impl std::future::Future<Output = Result<LearningPlan>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn generation_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn store_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn persist_plans(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn compose(&self, request: &PlanRequest) -> String;
    async fn generate(&self, prompt: &str) -> Result<GenerationReply>;
    async fn finalize(&self, request: &PlanRequest, reply: GenerationReply)
        -> Result<PlanOutcome>;
}
