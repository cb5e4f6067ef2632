use clap::Parser;
use learnpath::core::prompt;
use learnpath::domain::model::{PlanOutcome, PlanRequest};
use learnpath::domain::ports::PlanStore;
use learnpath::utils::error::ErrorSeverity;
use learnpath::utils::{display, logger, validation::Validate};
use learnpath::{
    CliConfig, GenPipeline, HttpGenerator, HttpPlanStore, LocalPlanStore, PlanEngine, StoreKind,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting learnpath CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let request = config.request();

    // 小時數超出建議範圍只提醒，不阻擋
    if !(1..=40).contains(&request.hours) {
        tracing::warn!(
            "⏱ {} hours/week is outside the suggested 1-40 range",
            request.hours
        );
    }

    // 只輸出指令文字，不呼叫服務
    if config.print_prompt {
        println!("{}", prompt::build_prompt(&request));
        return Ok(());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 Pipeline monitoring enabled");
    }

    let generator = HttpGenerator::new(config.generation_endpoint.clone(), config.model.clone());

    // 依選擇的存儲後端組裝管道並執行
    let outcome = match config.store {
        StoreKind::Http => {
            let store = HttpPlanStore::new(config.store_endpoint.clone());
            run(generator, store, config.clone(), &request, monitor_enabled).await
        }
        StoreKind::Local | StoreKind::None => {
            let store = LocalPlanStore::new(config.output_path.clone());
            run(generator, store, config.clone(), &request, monitor_enabled).await
        }
    };

    match outcome {
        Ok(PlanOutcome::Structured { plan, plan_id, .. }) => {
            display::print_plan(&plan, plan_id.as_deref());
            println!();
            println!("✅ Learning path generated successfully!");
        }
        Ok(PlanOutcome::RawText { text }) => {
            // 觀察到的行為：純文字回退原樣顯示
            display::print_raw(&text);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Plan generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<S: PlanStore>(
    generator: HttpGenerator,
    store: S,
    config: CliConfig,
    request: &PlanRequest,
    monitor_enabled: bool,
) -> learnpath::Result<PlanOutcome> {
    let pipeline = GenPipeline::new(generator, store, config);
    let engine = PlanEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run(request).await
}
