use clap::Parser;
use learnpath::config::toml_config::TomlConfig;
use learnpath::core::prompt;
use learnpath::domain::model::{PlanOutcome, PlanRequest};
use learnpath::domain::ports::{ConfigProvider, PlanStore};
use learnpath::utils::error::ErrorSeverity;
use learnpath::utils::{display, logger, validation::Validate};
use learnpath::{GenPipeline, HttpGenerator, HttpPlanStore, LocalPlanStore, PlanEngine};

#[derive(Parser)]
#[command(name = "toml-plan")]
#[command(about = "Learning path generator driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "learnpath.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Print the composed instruction text and exit
    #[arg(long)]
    print_prompt: bool,

    /// Dry run - show what would be requested without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based learning path generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let request = config.to_request();

    if args.print_prompt {
        println!("{}", prompt::build_prompt(&request));
        return Ok(());
    }

    // 顯示配置摘要
    display_config_summary(&config, &request, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No service will be called");
        perform_dry_run(&config, &request);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 Pipeline monitoring enabled");
    }

    let generator = HttpGenerator::new(
        config.generation_endpoint().to_string(),
        config.model().to_string(),
    );

    let outcome = match config.store_mode() {
        "http" => {
            let store = HttpPlanStore::new(config.store_endpoint().to_string());
            run(generator, store, config.clone(), &request, monitor_enabled).await
        }
        _ => {
            let store = LocalPlanStore::new(config.output_path().to_string());
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
            display::print_raw(&text);
        }
        Err(e) => {
            tracing::error!(
                "❌ Plan generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
    config: TomlConfig,
    request: &PlanRequest,
    monitor_enabled: bool,
) -> learnpath::Result<PlanOutcome> {
    let pipeline = GenPipeline::new(generator, store, config);
    let engine = PlanEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run(request).await
}

fn display_config_summary(config: &TomlConfig, request: &PlanRequest, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Service: {} v{}",
        config.service.name, config.service.version
    );
    println!("  Generation: {}", config.generation_endpoint());
    println!("  Model: {}", config.model());
    println!("  Store: {}", config.store_mode());
    if config.store_mode() == "local" {
        println!("  Output: {}", config.output_path());
    }
    println!("  Audience: {}", request.role);
    println!("  Hours/week: {}", request.hours);
    println!("  Language: {}", request.language);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig, request: &PlanRequest) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Generation Request:");
    println!("  Endpoint: {}", config.generation_endpoint());
    println!("  Model: {}", config.model());
    let composed = prompt::build_prompt(request);
    println!("  Prompt length: {} chars", composed.len());

    println!();
    println!("💾 Persistence:");
    match config.store_mode() {
        "http" => println!("  Plans will be saved via {}", config.store_endpoint()),
        "local" => println!("  Plans will be written under {}", config.output_path()),
        _ => println!("  Persistence disabled; generated plans are display-only"),
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
