use crate::domain::error::ConversionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Conversion failed: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StyleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StyleError::ConversionError(_) => ErrorCategory::Input,
            StyleError::ConfigError { .. }
            | StyleError::InvalidConfigValueError { .. }
            | StyleError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StyleError::IoError(_) | StyleError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StyleError::ConversionError(e) => format!(
                "Fix the input near offset {} (`{}`) and try again",
                e.offset(),
                e.fragment()
            ),
            StyleError::IoError(_) => "Check that the input file exists and is readable".to_string(),
            StyleError::SerializationError(_) => {
                "The converted style could not be serialized; please report this input".to_string()
            }
            StyleError::ConfigError { .. } => "Make sure the config file is valid TOML".to_string(),
            StyleError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the config file", field)
            }
            StyleError::MissingConfigError { field } => {
                format!("Add '{}' to the config file or environment", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StyleError::ConversionError(e) => format!("Could not convert the input: {}", e),
            StyleError::IoError(e) => format!("Could not read the input: {}", e),
            StyleError::SerializationError(e) => format!("Could not serialize the result: {}", e),
            StyleError::ConfigError { message } => format!("Configuration problem: {}", message),
            StyleError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            StyleError::MissingConfigError { field } => {
                format!("Configuration value '{}' is missing", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;
