#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "style-convert")]
#[command(about = "Convert between CSS declarations and inline style objects")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// CSS declarations -> inline style object
    ToObject {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,

        /// Indent the object output
        #[arg(long)]
        pretty: bool,
    },
    /// Inline style object -> CSS declarations
    ToCss {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,

        /// One declaration per line
        #[arg(long)]
        multiline: bool,
    },
}

#[cfg(feature = "cli")]
impl Command {
    pub fn input(&self) -> Option<&str> {
        match self {
            Command::ToObject { input, .. } | Command::ToCss { input, .. } => input.as_deref(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(path) = self.command.input() {
            validate_path("input", path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_to_object() {
        let config =
            CliConfig::try_parse_from(["style-convert", "-v", "to-object", "--pretty", "-i", "a.css"])
                .unwrap();

        assert!(config.verbose);
        assert!(matches!(
            config.command,
            Command::ToObject { pretty: true, .. }
        ));
        assert_eq!(config.command.input(), Some("a.css"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_to_css_with_global_config() {
        let config = CliConfig::try_parse_from([
            "style-convert",
            "to-css",
            "--multiline",
            "--config",
            "style.toml",
        ])
        .unwrap();

        assert_eq!(config.config.as_deref(), Some("style.toml"));
        assert!(matches!(config.command, Command::ToCss { multiline: true, input: None }));
    }

    #[test]
    fn test_empty_input_path_rejected() {
        let config = CliConfig::try_parse_from(["style-convert", "to-css", "--input", ""]).unwrap();
        assert!(config.validate().is_err());
    }
}
