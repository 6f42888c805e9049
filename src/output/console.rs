use super::*;
use colored::*;

/// Bordered two-column table with a rule between every row.
pub struct ConsoleGenerator;

impl ConsoleGenerator {
    pub fn new() -> Self {
        Self
    }

    fn render_table(rows: &[(&str, String)]) -> String {
        let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
        let rule = format!("+{}+{}+", "-".repeat(key_width + 2), "-".repeat(value_width + 2));

        let mut table = String::new();
        table.push_str(&rule);
        table.push('\n');
        for (key, value) in rows {
            table.push_str(&format!(
                "| {:<kw$} | {:<vw$} |\n",
                key,
                value,
                kw = key_width,
                vw = value_width
            ));
            table.push_str(&rule);
            table.push('\n');
        }
        table
    }
}

impl Default for ConsoleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputGenerator for ConsoleGenerator {
    fn generate(&self, report: &AnnualReport) -> Result<String> {
        let title = format!("Commit report {}", report.year);
        Ok(format!(
            "{}\n{}",
            title.bright_cyan().bold(),
            Self::render_table(&report.summary_rows())
        ))
    }
}
