use crate::core::Pipeline;
use crate::domain::model::{PlanOutcome, PlanRequest};
use crate::utils::error::Result;
use crate::utils::monitor::PipelineMonitor;

pub struct PlanEngine<P: Pipeline> {
    pipeline: P,
    monitor: PipelineMonitor,
}

impl<P: Pipeline> PlanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: PipelineMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行三個階段：compose → generate → finalize。
    /// 生成與持久化是串行的，任何時候只有一個請求在途
    pub async fn run(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        println!("Starting plan generation...");

        let prompt = self.pipeline.compose(request);
        println!("Composed prompt ({} chars)", prompt.len());
        self.monitor.log_stats("Compose");

        println!("Calling generation service...");
        let reply = self.pipeline.generate(&prompt).await?;
        println!("Received {} chars of generated text", reply.text.len());
        self.monitor.log_stats("Generate");

        let outcome = self.pipeline.finalize(request, reply).await?;
        match &outcome {
            PlanOutcome::Structured { plan, plan_id, .. } => {
                println!("Structured plan ready ({} weeks)", plan.weeks.len());
                if let Some(id) = plan_id {
                    println!("Saved as: {}", id);
                }
            }
            PlanOutcome::RawText { .. } => {
                println!("No structured plan, falling back to raw text");
            }
        }
        self.monitor.log_stats("Finalize");
        self.monitor.log_final_stats();

        Ok(outcome)
    }
}
