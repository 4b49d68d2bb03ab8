// crates/swt-cli/src/output.rs
//
// Output formatting utilities for the swt CLI.
// Supports table and JSON output modes.

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    #[default]
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render rows in the requested format.
pub fn render<T: Tabled + Serialize>(format: OutputFormat, rows: &[T]) -> String {
    match format {
        OutputFormat::Table => format_table(rows),
        OutputFormat::Json => format_json(&rows),
    }
}

/// One scored bottom node.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PredictionRow {
    #[tabled(rename = "Bottom node")]
    pub node: String,
    #[tabled(rename = "P(negative)")]
    pub negative: f64,
    #[tabled(rename = "P(positive)")]
    pub positive: f64,
}

/// One grid-search candidate.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CandidateRow {
    #[tabled(rename = "Weight function")]
    pub weight_function: String,
    #[tabled(rename = "Top space")]
    pub top_space: String,
    #[tabled(rename = "Validation AUC")]
    pub auc: f64,
}
