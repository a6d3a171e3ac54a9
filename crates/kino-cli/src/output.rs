//! Output formatting for CLI

use kino_abr::BitrateEstimate;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

/// One variant's estimate
#[derive(Debug, Serialize, Tabled)]
pub struct EstimateRow {
    #[tabled(rename = "Variant")]
    pub variant: String,
    #[tabled(rename = "Nominal (bps)", display_with = "display_bps")]
    pub nominal_bps: Option<u64>,
    #[tabled(rename = "Estimate (bps)", display_with = "display_bps")]
    pub estimate_bps: BitrateEstimate,
}

fn display_bps(value: &Option<u64>) -> String {
    match value {
        Some(bps) => bps.to_string(),
        None => "unknown".to_string(),
    }
}

/// Format estimate rows based on selected format
pub fn format_estimates(title: &str, rows: &[EstimateRow], format: &str) -> String {
    match OutputFormat::from(format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Text => {
            let mut out = format!("{}:", title);
            for row in rows {
                out.push_str(&format!(
                    "\n  {}: {} (nominal {})",
                    row.variant,
                    display_bps(&row.estimate_bps),
                    display_bps(&row.nominal_bps)
                ));
            }
            out
        }
    }
}
