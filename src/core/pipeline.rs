use crate::core::prompt::build_prompt;
use crate::core::{
    ConfigProvider, GenerationReply, Generator, LearningPlan, Pipeline, PlanOutcome, PlanRecord,
    PlanRequest, PlanStore,
};
use crate::utils::error::Result;

/// 標準生成管道：組 prompt、呼叫生成服務、整理並持久化結果。
///
/// 持久化與回讀失敗都就地回退到未存儲的計畫，絕不讓整次操作失敗。
pub struct GenPipeline<G: Generator, S: PlanStore, C: ConfigProvider> {
    generator: G,
    store: S,
    config: C,
}

impl<G: Generator, S: PlanStore, C: ConfigProvider> GenPipeline<G, S, C> {
    pub fn new(generator: G, store: S, config: C) -> Self {
        Self {
            generator,
            store,
            config,
        }
    }
}

/// 補齊缺省欄位之外，讓 weeks 依週次穩定遞增排序。
/// 週次是否連續、是否剛好四週都不在此驗證
fn normalize(mut plan: LearningPlan) -> LearningPlan {
    plan.weeks.sort_by_key(|w| w.week);
    plan
}

#[async_trait::async_trait]
impl<G: Generator, S: PlanStore, C: ConfigProvider> Pipeline for GenPipeline<G, S, C> {
    fn compose(&self, request: &PlanRequest) -> String {
        build_prompt(request)
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationReply> {
        tracing::debug!("📡 Calling generation service ({} prompt chars)", prompt.len());
        let reply = self.generator.generate(prompt).await?;
        tracing::debug!(
            "📡 Generation returned {} chars, structured plan: {}",
            reply.text.len(),
            reply.plan.is_some()
        );
        Ok(reply)
    }

    async fn finalize(
        &self,
        request: &PlanRequest,
        reply: GenerationReply,
    ) -> Result<PlanOutcome> {
        let GenerationReply { text, plan } = reply;

        // 至少要有一週才算候選的結構化計畫
        let Some(plan) = plan.filter(|p| !p.weeks.is_empty()) else {
            tracing::info!("📄 No structured plan in reply, displaying raw text");
            return Ok(PlanOutcome::RawText { text });
        };

        let plan = normalize(plan);

        if !self.config.persist_plans() {
            return Ok(PlanOutcome::Structured {
                plan,
                plan_id: None,
                raw_text: text,
            });
        }

        // 存入後以 id 回讀，顯示的是存儲回來的正式版本；
        // 任一步失敗就改用剛生成的未存儲計畫
        let record = PlanRecord::new(request, &plan);
        match self.store.create(&record).await {
            Ok(plan_id) => match self.store.read(&plan_id).await {
                Ok(stored) => {
                    tracing::info!("💾 Plan saved and re-read as {}", plan_id);
                    Ok(PlanOutcome::Structured {
                        plan: stored,
                        plan_id: Some(plan_id),
                        raw_text: text,
                    })
                }
                Err(e) => {
                    tracing::warn!("💾 Re-read of plan {} failed: {}", plan_id, e);
                    Ok(PlanOutcome::Structured {
                        plan,
                        plan_id: Some(plan_id),
                        raw_text: text,
                    })
                }
            },
            Err(e) => {
                tracing::warn!("💾 Plan store create failed: {}", e);
                Ok(PlanOutcome::Structured {
                    plan,
                    plan_id: None,
                    raw_text: text,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Language, Week};
    use crate::utils::error::PlanError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockGenerator {
        reply: GenerationReply,
    }

    impl Generator for MockGenerator {
        async fn generate(&self, _prompt: &str) -> Result<GenerationReply> {
            Ok(self.reply.clone())
        }
    }

    #[derive(Clone)]
    struct MockStore {
        create_calls: Arc<AtomicUsize>,
        read_calls: Arc<AtomicUsize>,
        fail_create: bool,
        fail_read: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                create_calls: Arc::new(AtomicUsize::new(0)),
                read_calls: Arc::new(AtomicUsize::new(0)),
                fail_create: false,
                fail_read: false,
            }
        }

        fn created(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn reads(&self) -> usize {
            self.read_calls.load(Ordering::SeqCst)
        }
    }

    impl PlanStore for MockStore {
        async fn create(&self, _record: &PlanRecord) -> Result<String> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(PlanError::StoreError {
                    message: "create rejected".to_string(),
                });
            }
            Ok("plan-42".to_string())
        }

        async fn read(&self, plan_id: &str) -> Result<LearningPlan> {
            self.read_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_read {
                return Err(PlanError::StoreError {
                    message: format!("read of {} failed", plan_id),
                });
            }
            // 回讀的副本帶上標記，用來證明顯示的是存儲路徑的版本
            Ok(LearningPlan {
                accessibility: "from-store".to_string(),
                weeks: vec![sample_week(1)],
                ..Default::default()
            })
        }
    }

    struct MockConfig {
        persist: bool,
    }

    impl ConfigProvider for MockConfig {
        fn generation_endpoint(&self) -> &str {
            "http://localhost/generate"
        }

        fn model(&self) -> &str {
            "gemini-2.0-flash"
        }

        fn store_endpoint(&self) -> &str {
            "http://localhost/plans"
        }

        fn output_path(&self) -> &str {
            "./plans"
        }

        fn persist_plans(&self) -> bool {
            self.persist
        }
    }

    fn sample_week(n: u32) -> Week {
        Week {
            week: n,
            theme: format!("Theme {}", n),
            items: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            task: "build something".to_string(),
        }
    }

    fn sample_plan() -> LearningPlan {
        LearningPlan {
            skills: vec!["Skill".to_string()],
            weeks: vec![sample_week(1), sample_week(2)],
            accessibility: "generated".to_string(),
            ..Default::default()
        }
    }

    fn request() -> PlanRequest {
        PlanRequest {
            role: "Engineer".to_string(),
            goal: "Learn".to_string(),
            hours: 4,
            language: Language::English,
        }
    }

    fn pipeline(
        plan: Option<LearningPlan>,
        store: MockStore,
        persist: bool,
    ) -> GenPipeline<MockGenerator, MockStore, MockConfig> {
        GenPipeline::new(
            MockGenerator {
                reply: GenerationReply {
                    text: "## Top Skills".to_string(),
                    plan,
                },
            },
            store,
            MockConfig { persist },
        )
    }

    #[tokio::test]
    async fn test_structured_plan_is_persisted_and_reread() {
        let store = MockStore::new();
        let p = pipeline(Some(sample_plan()), store.clone(), true);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        assert_eq!(store.created(), 1);
        assert_eq!(store.reads(), 1);
        match outcome {
            PlanOutcome::Structured { plan, plan_id, .. } => {
                // 顯示的是回讀的副本，不是剛生成的那個物件
                assert_eq!(plan.accessibility, "from-store");
                assert_eq!(plan_id.as_deref(), Some("plan-42"));
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_absent_plan_never_touches_the_store() {
        let store = MockStore::new();
        let p = pipeline(None, store.clone(), true);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        assert_eq!(store.created(), 0);
        assert_eq!(store.reads(), 0);
        assert_eq!(
            outcome,
            PlanOutcome::RawText {
                text: "## Top Skills".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_plan_with_no_weeks_falls_back_to_raw_text() {
        let store = MockStore::new();
        let empty = LearningPlan {
            skills: vec!["Skill".to_string()],
            ..Default::default()
        };
        let p = pipeline(Some(empty), store.clone(), true);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        assert_eq!(store.created(), 0);
        assert!(matches!(outcome, PlanOutcome::RawText { .. }));
    }

    #[tokio::test]
    async fn test_create_failure_falls_back_to_generated_plan() {
        let mut store = MockStore::new();
        store.fail_create = true;
        let p = pipeline(Some(sample_plan()), store.clone(), true);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        assert_eq!(store.created(), 1);
        assert_eq!(store.reads(), 0);
        match outcome {
            PlanOutcome::Structured { plan, plan_id, .. } => {
                assert_eq!(plan.accessibility, "generated");
                assert!(plan_id.is_none());
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reread_failure_keeps_id_but_uses_generated_plan() {
        let mut store = MockStore::new();
        store.fail_read = true;
        let p = pipeline(Some(sample_plan()), store.clone(), true);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        match outcome {
            PlanOutcome::Structured { plan, plan_id, .. } => {
                assert_eq!(plan.accessibility, "generated");
                assert_eq!(plan_id.as_deref(), Some("plan-42"));
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_persistence_disabled_skips_the_store() {
        let store = MockStore::new();
        let p = pipeline(Some(sample_plan()), store.clone(), false);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        assert_eq!(store.created(), 0);
        match outcome {
            PlanOutcome::Structured { plan_id, .. } => assert!(plan_id.is_none()),
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_weeks_are_sorted_ascending() {
        let store = MockStore::new();
        let shuffled = LearningPlan {
            weeks: vec![sample_week(3), sample_week(1), sample_week(2)],
            ..Default::default()
        };
        let p = pipeline(Some(shuffled), store, false);

        let reply = p.generate("prompt").await.unwrap();
        let outcome = p.finalize(&request(), reply).await.unwrap();

        match outcome {
            PlanOutcome::Structured { plan, .. } => {
                let order: Vec<u32> = plan.weeks.iter().map(|w| w.week).collect();
                assert_eq!(order, vec![1, 2, 3]);
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_delegates_to_the_prompt_template() {
        let p = pipeline(None, MockStore::new(), false);
        let prompt = p.compose(&request());
        assert!(prompt.contains("Audience: Engineer."));
        assert!(prompt.contains("4-week learning path"));
    }
}
