//! Output formatting for traces.

use crate::trace::{Trace, TraceItem};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a trace in the requested output format.
pub fn format_trace(trace: &Trace, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(trace)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(trace).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(trace_to_table(trace)),
    }
}

fn trace_to_table(trace: &Trace) -> String {
    let rows: Vec<(String, String, String)> = trace.iter().map(table_row).collect();
    let kind_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);
    let name_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(6).max(6);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<kind_width$}  {:<name_width$}  VALUE\n",
        "KIND", "OPTION"
    ));
    for (kind, name, value) in &rows {
        out.push_str(format!("{kind:<kind_width$}  {name:<name_width$}  {value}").trim_end());
        out.push('\n');
    }
    out
}

fn table_row(item: &TraceItem) -> (String, String, String) {
    match item {
        TraceItem::Plain { token } => ("plain".to_string(), String::new(), token.clone()),
        TraceItem::Option(parsed) => {
            let value = parsed.value.clone().unwrap_or_default();
            (parsed.kind().to_string(), parsed.name.to_string(), value)
        }
        TraceItem::Error(err) => {
            let detail = match err.candidates() {
                [] => err.message(),
                _ => err.candidates().join(", "),
            };
            (
                format!("error:{}", err.kind()),
                err.option().to_string(),
                detail,
            )
        }
        TraceItem::EndOfOptions => ("end_of_options".to_string(), "--".to_string(), String::new()),
    }
}
