use super::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::console::ConsoleGenerator;
use super::html::HtmlGenerator;

enum Generator {
    Console(ConsoleGenerator),
    Html(HtmlGenerator),
    Json,
}

/// Renders an `AnnualReport` in the chosen format and delivers it.
///
/// Templates are loaded by `new`, before any repository work, so a broken
/// template fails the run early. HTML is written to `output_path`; console
/// and JSON output go to stdout.
pub struct Reporter {
    format: OutputFormat,
    output_path: PathBuf,
    generator: Generator,
}

impl Reporter {
    pub fn new(
        format: OutputFormat,
        output_path: &str,
        template_override: Option<&Path>,
        top_developers: usize,
    ) -> Result<Self> {
        let output_path = PathBuf::from(super::add_file_extension(output_path, &format));
        let generator = match format {
            OutputFormat::Console => Generator::Console(ConsoleGenerator::new()),
            OutputFormat::Html => {
                Generator::Html(HtmlGenerator::new(template_override, top_developers)?)
            }
            OutputFormat::Json => Generator::Json,
        };

        Ok(Self {
            format,
            output_path,
            generator,
        })
    }

    pub fn render(&self, report: &AnnualReport) -> Result<String> {
        match &self.generator {
            Generator::Console(generator) => generator.generate(report),
            Generator::Html(generator) => generator.generate(report),
            Generator::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    pub fn generate_report(&self, report: &AnnualReport) -> Result<()> {
        let content = self.render(report)?;

        match self.format {
            OutputFormat::Html => {
                fs::write(&self.output_path, content).map_err(|source| {
                    ReportError::OutputWrite {
                        path: self.output_path.clone(),
                        source,
                    }
                })?;
                info!("Report saved to {}", self.output_path.display());
            }
            OutputFormat::Console | OutputFormat::Json => println!("{}", content),
        }

        Ok(())
    }
}
