//! Output formatting for parse reports.

use serde::Serialize;
use switchline_core::{Bindings, BoundField, Diagnostics, Origin, Parsed};

/// Supported output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// What `parse` prints for one bound command line.
#[derive(Debug, Serialize)]
pub struct ParseReport<'a> {
    pub command: &'a str,
    pub parameters: &'a [String],
    pub values: &'a Bindings,
    pub diagnostics: &'a Diagnostics,
}

impl<'a> ParseReport<'a> {
    pub fn new(command: &'a str, parsed: &'a Parsed) -> Self {
        Self {
            command,
            parameters: &parsed.parameters,
            values: &parsed.bindings,
            diagnostics: &parsed.diagnostics,
        }
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ParseReport<'_>, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn report_to_table(report: &ParseReport<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("Command: {}\n", report.command));
    push_fields(&mut out, "Arguments", &report.values.arguments);
    push_fields(&mut out, "Switches", &report.values.switches);

    let diagnostics = report.diagnostics;
    if !diagnostics.unmatched_parameters.is_empty() {
        out.push_str(&format!(
            "\nUnmatched parameters: {}\n",
            diagnostics.unmatched_parameters.join(" ")
        ));
    }

    out
}

fn push_fields(out: &mut String, title: &str, fields: &[BoundField]) {
    if fields.is_empty() {
        return;
    }

    out.push_str(&format!("\n{title}:\n"));
    let max_name = fields.iter().map(|f| f.name.len()).max().unwrap_or(4);
    let max_value = fields
        .iter()
        .map(|f| f.value.to_string().len())
        .max()
        .unwrap_or(5);

    for field in fields {
        let origin = match field.origin {
            Origin::Input => "input",
            Origin::Default => "default",
        };
        out.push_str(&format!(
            "  {:<max_name$}  {:<max_value$}  ({origin})\n",
            field.name,
            field.value.to_string(),
        ));
    }
}
