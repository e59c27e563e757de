use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Rejection;
use crate::pipeline::{BatchResult, BatchSummary};
use crate::startup::{Recommendation, ScoredRecord};

use super::formatter::{format_scored_table, format_tsv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, optionally coloured table
    Table,
    /// Tab-separated values, no header
    Tsv,
    /// Comma-separated values with a header row
    Csv,
    /// JSON document with summary, startups and rejections
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Per-startup line of a report, rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub investment_score: u8,
    pub rank: u32,
    /// Rounded to 1 decimal
    pub runway_months: f64,
    /// Rounded to 2 decimals
    pub ltv_cac: f64,
    pub mrr: u64,
    pub valuation: u64,
    pub recommendation: Recommendation,
}

impl From<&ScoredRecord> for ReportRow {
    fn from(scored: &ScoredRecord) -> Self {
        Self {
            name: scored.name().to_string(),
            investment_score: scored.investment_score(),
            rank: scored.rank,
            runway_months: round_to(scored.metrics.runway_months, 1),
            ltv_cac: round_to(scored.metrics.ltv_cac, 2),
            mrr: scored.metrics.mrr.trunc() as u64,
            valuation: scored.valuation.amount.trunc() as u64,
            recommendation: scored.recommendation,
        }
    }
}

pub fn report_rows(result: &BatchResult) -> Vec<ReportRow> {
    result.scored.iter().map(ReportRow::from).collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: BatchSummary,
    startups: Vec<ReportRow>,
    rejected: &'a [Rejection],
}

/// Render a batch in the requested format.
pub fn render(result: &BatchResult, format: OutputFormat, use_colors: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_scored_table(&result.scored, use_colors)),
        OutputFormat::Tsv => Ok(format_tsv(&report_rows(result))),
        OutputFormat::Csv => format_csv(&report_rows(result)),
        OutputFormat::Json => {
            let report = JsonReport {
                summary: result.summary(),
                startups: report_rows(result),
                rejected: &result.rejected,
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
        }
    }
}

/// Report rows as CSV with a header row
pub fn format_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record([
            "name",
            "investment_score",
            "rank",
            "runway_months",
            "ltv_cac",
            "mrr",
            "valuation",
            "recommendation",
        ])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Default report location: `<dir>/capnalyx_report_<YYYYmmdd_HHMMSS>.<ext>`
pub fn default_report_path<Tz>(dir: &Path, format: OutputFormat, now: DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dir.join(format!(
        "capnalyx_report_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Write report contents atomically.
///
/// Uses atomic-write-file so a reader never sees a half-written report.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write report")?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n").context("Failed to write report")?;
    }
    file.commit().context("Failed to save report")?;

    tracing::info!("wrote report to {}", path.display());
    Ok(())
}
