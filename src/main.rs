use airfare_insights::config::cli::{QueryArgs, ServeArgs};
use airfare_insights::config::{Cli, Command, LogFormat, LocalStorage, TomlConfig};
use airfare_insights::core::ConfigProvider;
use airfare_insights::utils::error::{AirfareError, ErrorSeverity};
use airfare_insights::utils::{logger, validation::Validate};
use airfare_insights::web::{self, AppState, PageContext, SvgChartRenderer};
use airfare_insights::{EtlEngine, Route, RoutePricePipeline};
use clap::Parser;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "airfare-insights.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 載入 TOML 配置
    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    if let Some(token) = &cli.token {
        config = config.with_token(token.clone());
    }

    // 初始化日誌
    match (&cli.command, config.log_format()) {
        (Command::Serve(_), LogFormat::Json) => logger::init_json_logger(),
        _ => logger::init_cli_logger(cli.verbose),
    }
    tracing::info!("Starting airfare-insights");

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match cli.command {
        Command::Serve(args) => run_server(config, args).await,
        Command::Query(args) => run_query(config, args).await,
    }
}

fn load_config(path: &str) -> Result<TomlConfig, AirfareError> {
    if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
        // 沒有設定檔時使用預設值，token 需由參數或環境變數提供
        return Ok(TomlConfig::default());
    }
    TomlConfig::from_file(path)
}

async fn run_server(config: TomlConfig, args: ServeArgs) -> anyhow::Result<()> {
    let addr = args.addr.unwrap_or_else(|| config.server_addr());
    let request_timeout = Duration::from_secs(config.request_timeout_seconds());
    let page = PageContext {
        airports: config.airports().to_vec(),
        default_route: config.default_route(),
        currency: config.currency().to_string(),
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RoutePricePipeline::new(storage, config)?;
    let state = AppState::new(EtlEngine::new(pipeline), page, SvgChartRenderer::default());

    let router = web::create_router(state, request_timeout);
    web::serve(addr, router).await?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn run_query(config: TomlConfig, args: QueryArgs) -> anyhow::Result<()> {
    let defaults = config.default_route();
    let route = Route::new(
        args.origin.unwrap_or(defaults.origin),
        args.destination.unwrap_or(defaults.destination),
    );
    let config = match args.output {
        Some(output) => config.with_output_path(output),
        None => config,
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RoutePricePipeline::new(storage, config)?;
    let currency = pipeline.currency().to_string();
    let engine = EtlEngine::new(pipeline);

    match engine.run(&route).await {
        Ok((report, output)) => {
            let summary = &report.summary;
            println!("✈️  Route: {}", route);
            println!("  Observations:   {}", report.series.len());
            println!("  Average Price:  ${:.2} {}", summary.average_price, currency);
            println!("  Cheapest:       ${} on {}", summary.cheapest_price, summary.cheapest_date);
            println!("  Most Expensive: ${} on {}", summary.expensive_price, summary.expensive_date);
            println!("📁 Output saved to: {}", output);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Query failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("Error: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
