use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base name of the optional config file looked up in the working directory
/// (`annual-commits.toml`, `.yaml`, `.json`, ...).
pub const CONFIG_FILE: &str = "annual-commits";
pub const ENV_PREFIX: &str = "ANNUAL_COMMITS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Commits at or after this hour count as late-night work.
    pub late_start_hour: u32,
    /// Commits before this hour count as early-morning work.
    pub early_end_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: String,
    pub html_file: String,
    pub template: Option<String>,
    pub top_developers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                late_start_hour: 20,
                early_end_hour: 6,
            },
            output: OutputConfig {
                default_format: "console".to_string(),
                html_file: "commit-report.html".to_string(),
                template: None,
                top_developers: 10,
            },
        }
    }
}

impl Config {
    /// Layers built-in defaults, an optional config file and
    /// `ANNUAL_COMMITS__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.late_start_hour > 23 {
            return Err(ReportError::InvalidConfig(format!(
                "analysis.late_start_hour must be within 0..=23, got {}",
                self.analysis.late_start_hour
            )));
        }
        if self.analysis.early_end_hour > 24 {
            return Err(ReportError::InvalidConfig(format!(
                "analysis.early_end_hour must be within 0..=24, got {}",
                self.analysis.early_end_hour
            )));
        }
        Ok(())
    }
}
