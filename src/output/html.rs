use super::*;
use chrono::Local;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.html"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "src/output/assets/"]
#[include = "*.css"]
struct Assets;

pub const REPORT_TEMPLATE: &str = "report.html";

pub struct HtmlGenerator {
    tera: Tera,
    top_developers: usize,
}

impl HtmlGenerator {
    /// Loads the embedded template, or `template_override` from disk.
    pub fn new(template_override: Option<&Path>, top_developers: usize) -> Result<Self> {
        let mut tera = Tera::default();

        let template = match template_override {
            Some(path) => std::fs::read_to_string(path).map_err(|source| {
                ReportError::TemplateRead {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            None => Self::embedded_text::<Templates>(REPORT_TEMPLATE)?,
        };

        tera.add_raw_template(REPORT_TEMPLATE, &template)?;
        tera.register_filter("short_id", Self::short_id_filter);

        Ok(Self {
            tera,
            top_developers,
        })
    }

    fn embedded_text<E: RustEmbed>(name: &str) -> Result<String> {
        let file = E::get(name).ok_or_else(|| ReportError::TemplateMissing(name.to_string()))?;
        Ok(String::from_utf8_lossy(&file.data).into_owned())
    }

    fn short_id_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let id = value.as_str().unwrap_or("");
        Ok(Value::String(id.chars().take(8).collect()))
    }

    fn prepare_template_context(&self, report: &AnnualReport) -> Result<Context> {
        let mut context = Context::new();

        context.insert("css_content", &Self::embedded_text::<Assets>("styles.css")?);
        context.insert(
            "generated_date",
            &Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string(),
        );
        context.insert("report", report);
        context.insert("year", &report.year);

        let top_developers: Vec<_> = report.developers.iter().take(self.top_developers).collect();
        context.insert("top_developers", &top_developers);

        Ok(context)
    }
}

impl OutputGenerator for HtmlGenerator {
    fn generate(&self, report: &AnnualReport) -> Result<String> {
        let context = self.prepare_template_context(report)?;
        let html = self.tera.render(REPORT_TEMPLATE, &context)?;
        Ok(html)
    }
}
