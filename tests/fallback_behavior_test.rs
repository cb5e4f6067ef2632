use anyhow::Result;
use httpmock::prelude::*;
use learnpath::config::toml_config::TomlConfig;
use learnpath::domain::model::PlanOutcome;
use learnpath::utils::error::PlanError;
use learnpath::{GenPipeline, HttpGenerator, HttpPlanStore, PlanEngine};

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let config_content = format!(
        r#"
[service]
name = "learnpath-test"
description = "Fallback behavior tests"
version = "1.0.0"

[generation]
endpoint = "{}"

[store]
mode = "http"
endpoint = "{}"
"#,
        server.url("/api/generate"),
        server.url("/api/plans"),
    );
    Ok(TomlConfig::from_toml_str(&config_content)?)
}

fn engine_for(
    server: &MockServer,
    config: TomlConfig,
) -> PlanEngine<GenPipeline<HttpGenerator, HttpPlanStore, TomlConfig>> {
    let generator =
        HttpGenerator::new(server.url("/api/generate"), "gemini-2.0-flash".to_string());
    let store = HttpPlanStore::new(server.url("/api/plans"));
    PlanEngine::new(GenPipeline::new(generator, store, config))
}

#[tokio::test]
async fn test_missing_plan_skips_store_and_displays_raw_text() -> Result<()> {
    let server = MockServer::start();

    let generate_mock = server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "text": "## Learning Path\nFree-form markdown only"
            }));
    });

    // 不應該有任何存儲呼叫
    let plans_mock = server.mock(|when, then| {
        when.method(POST).path("/api/plans");
        then.status(200).json_body(serde_json::json!({"planId": "x"}));
    });

    let config = config_for(&server)?;
    let request = config.to_request();
    let engine = engine_for(&server, config);

    let outcome = engine.run(&request).await?;

    generate_mock.assert();
    plans_mock.assert_hits(0);
    assert_eq!(
        outcome,
        PlanOutcome::RawText {
            text: "## Learning Path\nFree-form markdown only".to_string()
        }
    );

    println!("✅ Raw-text fallback left the plan store untouched");
    Ok(())
}

#[tokio::test]
async fn test_store_failure_degrades_to_unpersisted_plan() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "text": "raw",
                "plan": {
                    "weeks": [{"week": 1, "theme": "Resilience", "items": ["a"], "task": "t"}]
                }
            }));
    });

    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/api/plans");
        then.status(503);
    });

    let config = config_for(&server)?;
    let request = config.to_request();
    let engine = engine_for(&server, config);

    // 存儲失敗不可讓整次操作失敗
    let outcome = engine.run(&request).await?;
    create_mock.assert();

    match outcome {
        PlanOutcome::Structured { plan, plan_id, .. } => {
            assert_eq!(plan.weeks[0].theme, "Resilience");
            assert!(plan_id.is_none());
        }
        other => panic!("expected structured outcome, got {:?}", other),
    }

    println!("✅ Store failure fell back to the generated plan");
    Ok(())
}

#[tokio::test]
async fn test_reread_failure_degrades_but_keeps_plan_id() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "text": "raw",
                "plan": {
                    "weeks": [{"week": 1, "theme": "Resilience", "items": ["a"], "task": "t"}]
                }
            }));
    });

    server.mock(|when, then| {
        when.method(POST).path("/api/plans");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"planId": "orphan-1"}));
    });

    let read_mock = server.mock(|when, then| {
        when.method(GET).path("/api/plans/orphan-1");
        then.status(500);
    });

    let config = config_for(&server)?;
    let request = config.to_request();
    let engine = engine_for(&server, config);

    let outcome = engine.run(&request).await?;
    read_mock.assert();

    match outcome {
        PlanOutcome::Structured { plan, plan_id, .. } => {
            assert_eq!(plan.weeks[0].theme, "Resilience");
            assert_eq!(plan_id.as_deref(), Some("orphan-1"));
        }
        other => panic!("expected structured outcome, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_missing_env_surfaces_the_server_key_message() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "error": "no key configured",
                "code": "MISSING_ENV"
            }));
    });

    let config = config_for(&server)?;
    let request = config.to_request();
    let engine = engine_for(&server, config);

    let err = engine.run(&request).await.unwrap_err();

    assert!(matches!(err, PlanError::MissingServerKey));
    assert!(err.user_friendly_message().contains("Server key missing"));
    assert_ne!(err.user_friendly_message(), "Failed to generate content");

    println!("✅ MISSING_ENV produced the configuration-specific message");
    Ok(())
}

#[tokio::test]
async fn test_other_upstream_errors_surface_the_service_message() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(429)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "rate limited, slow down"}));
    });

    let config = config_for(&server)?;
    let request = config.to_request();
    let engine = engine_for(&server, config);

    let err = engine.run(&request).await.unwrap_err();

    match err {
        PlanError::GenerationError { ref message } => {
            assert_eq!(message, "rate limited, slow down")
        }
        ref other => panic!("expected generation error, got {:?}", other),
    }

    Ok(())
}
