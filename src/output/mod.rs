use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::analysis::AnnualReport;
use crate::error::{ReportError, Result};

pub mod console;
pub mod html;
pub mod reporter;

pub use reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::Usage(format!("Wrong report type: {}", other))),
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Html => ".html",
        OutputFormat::Json => ".json",
        OutputFormat::Console => return path.to_string(),
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

pub trait OutputGenerator {
    fn generate(&self, report: &AnnualReport) -> Result<String>;
}
