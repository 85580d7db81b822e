use clap::Parser;
use style_convert::config::Command;
use style_convert::utils::error::{ErrorSeverity, StyleError};
use style_convert::utils::{logger, validation::Validate};
use style_convert::{
    AnalyticsManager, AppConfig, CliConfig, ConversionEngine, CssLayout, InputSource,
    LocalConverter, OutputFormat, TracingAnalytics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), StyleError> {
    config.validate()?;

    // 載入 TOML 配置（可選）
    let app_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    app_config.validate()?;

    let analytics = AnalyticsManager::new(TracingAnalytics, app_config.analytics_config());
    analytics.init();
    analytics.pageview("/");

    let engine = ConversionEngine::new(LocalConverter, analytics);
    let input = InputSource::from_arg(config.command.input())
        .read_to_string()
        .await?;

    let output = match &config.command {
        Command::ToObject { pretty, .. } => {
            let format = if *pretty {
                OutputFormat::Pretty
            } else {
                app_config.output_format()
            };
            engine.css_to_object(&input, format)?
        }
        Command::ToCss { multiline, .. } => {
            let layout = if *multiline {
                CssLayout::Multiline
            } else {
                app_config.css_layout()
            };
            engine.object_to_css(&input, layout).await?
        }
    };

    println!("{}", output);
    Ok(())
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(error: &StyleError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
