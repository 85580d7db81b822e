use anyhow::Result;
use style_convert::utils::error::{ErrorCategory, ErrorSeverity};
use style_convert::utils::validation::Validate;
use style_convert::{
    AnalyticsManager, AppConfig, ConversionEngine, ConversionErrorKind, CssLayout,
    LocalConverter, OutputFormat, StyleError, TracingAnalytics,
};
use tempfile::TempDir;

fn engine(config: &AppConfig) -> ConversionEngine<LocalConverter, TracingAnalytics> {
    let analytics = AnalyticsManager::new(TracingAnalytics, config.analytics_config());
    analytics.init();
    ConversionEngine::new(LocalConverter, analytics)
}

/// 從 TOML 檔案載入輸出格式設定
#[tokio::test]
async fn test_config_file_drives_output_format() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("style-convert.toml");
    tokio::fs::write(
        &config_path,
        r#"
[output]
pretty = true
multiline_css = true

[analytics]
enabled = false
"#,
    )
    .await?;

    let config = AppConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.output_format(), OutputFormat::Pretty);
    assert_eq!(config.css_layout(), CssLayout::Multiline);

    let engine = engine(&config);
    assert!(!engine.analytics().is_initialized());

    let object = engine.css_to_object("font-size: 12px; color: red", config.output_format())?;
    assert_eq!(object, "{\n  \"fontSize\": \"12px\",\n  \"color\": \"red\"\n}");

    let css = engine.object_to_css(&object, config.css_layout()).await?;
    assert_eq!(css, "font-size: 12px;\ncolor: red;");
    Ok(())
}

#[tokio::test]
async fn test_blank_input_short_circuits() -> Result<()> {
    let engine = engine(&AppConfig::default());

    assert_eq!(engine.css_to_object("", OutputFormat::Compact)?, "");
    assert_eq!(engine.css_to_object(" \n ", OutputFormat::Pretty)?, "");
    assert_eq!(engine.object_to_css("", CssLayout::Inline).await?, "");
    Ok(())
}

#[tokio::test]
async fn test_conversion_errors_surface_as_input_errors() {
    let engine = engine(&AppConfig::default());

    let err = engine
        .object_to_css("{ color: 'red'", CssLayout::Inline)
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
    assert_eq!(err.severity(), ErrorSeverity::High);
    match err {
        StyleError::ConversionError(e) => {
            assert_eq!(e.kind(), ConversionErrorKind::UnbalancedDelimiters)
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = engine
        .css_to_object("color: red; font size: 1px", OutputFormat::Compact)
        .unwrap_err();
    assert!(matches!(err, StyleError::ConversionError(ref e) if e.kind() == ConversionErrorKind::InvalidIdentifier));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = AppConfig::from_file("/no/such/style-convert.toml").unwrap_err();
    assert!(matches!(err, StyleError::IoError(_)));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}
