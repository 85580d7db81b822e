use crate::domain::model::AnalyticsConfig;
use crate::domain::model::{CssLayout, OutputFormat};
use crate::utils::error::{Result, StyleError};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ANALYTICS_ENABLED_ENV: &str = "STYLE_CONVERT_ANALYTICS_ENABLED";
pub const ANALYTICS_TRACKING_ID_ENV: &str = "STYLE_CONVERT_ANALYTICS_TRACKING_ID";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: Option<OutputConfig>,
    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
    pub multiline_css: Option<bool>,
}

/// 從環境變數建立 `[analytics]` 設定
impl AnalyticsConfig {
    /// ENABLED 必須為 "true"
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            enabled: lookup(ANALYTICS_ENABLED_ENV).as_deref() == Some("true"),
            tracking_id: lookup(ANALYTICS_TRACKING_ID_ENV).filter(|id| !id.trim().is_empty()),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StyleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_env_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| StyleError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRACKING_ID})，找不到的保留原樣
    fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StyleError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_format(&self) -> OutputFormat {
        let pretty = self.output.as_ref().and_then(|o| o.pretty).unwrap_or(false);
        OutputFormat::from_pretty(pretty)
    }

    pub fn css_layout(&self) -> CssLayout {
        let multiline = self
            .output
            .as_ref()
            .and_then(|o| o.multiline_css)
            .unwrap_or(false);
        CssLayout::from_multiline(multiline)
    }

    /// `[analytics]` 區段優先，否則退回環境變數
    pub fn analytics_config(&self) -> AnalyticsConfig {
        self.analytics.clone().unwrap_or_else(AnalyticsConfig::from_env)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(analytics) = &self.analytics {
            if analytics.enabled {
                let tracking_id =
                    validate_required_field("analytics.tracking_id", &analytics.tracking_id)?;
                validate_non_empty_string("analytics.tracking_id", tracking_id)?;
            }
        }
        Ok(())
    }
}
