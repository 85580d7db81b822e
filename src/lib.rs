pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::InputSource, CliConfig};

pub use adapters::TracingAnalytics;
pub use config::toml_config::AppConfig;
pub use crate::core::analytics::AnalyticsManager;
pub use crate::core::engine::ConversionEngine;
pub use crate::core::forward::transform;
pub use crate::core::normalize::{camelize, kebabize};
pub use crate::core::reverse::{parse_object, render_css, reverse, reverse_with};
pub use crate::core::LocalConverter;
pub use domain::error::{ConversionError, ConversionErrorKind};
pub use domain::model::{
    AnalyticsConfig, CssLayout, Declaration, OutputFormat, ReverseOutput, StyleMapping,
};
pub use utils::error::{Result, StyleError};
