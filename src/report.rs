//! Output rendering for detection status and verification reports
//!
//! Rendering never changes what was computed, only how it is shown.

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::measure_text_width;
use declarative::ReportRow;

use crate::detect::CacheStatus;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    #[default]
    Table,
    /// Compact JSON
    Json,
    /// Block-style YAML
    Yaml,
}

/// Render detection status as key/value pairs
pub fn render_status(status: &CacheStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let rows = vec![
                vec!["page_cache".to_string(), status.page_cache.to_string()],
                vec![
                    "page_cache_plugin".to_string(),
                    status.page_cache_plugin.clone(),
                ],
            ];
            Ok(table(&["key", "value"], &rows))
        }
        OutputFormat::Json => {
            serde_json::to_string(status).context("Failed to encode status as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(status).context("Failed to encode status as YAML")
        }
    }
}

/// Render verification rows with columns setting, actual, expected
pub fn render_rows(rows: &[ReportRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![r.setting.clone(), r.actual.clone(), r.expected.clone()])
                .collect();
            Ok(table(&["setting", "actual", "expected"], &cells))
        }
        OutputFormat::Json => serde_json::to_string(rows).context("Failed to encode rows as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(rows).context("Failed to encode rows as YAML"),
    }
}

/// Bordered ASCII table; no trailing newline
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let border = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", parts.join("+"))
    };

    let line = |cells: &[&str]| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - measure_text_width(cell);
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("|{}|", parts.join("|"))
    };

    let mut out = vec![border.clone(), line(headers), border.clone()];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(line(&cells));
    }
    out.push(border);
    out.join("\n")
}
