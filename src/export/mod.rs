pub mod excel;

use crate::error::{MedCheckError, Result};
use medcheck_common::MatchResult;
use serde::Serialize;
use std::path::Path;

/// 照合結果の出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    #[default]
    Excel,
}

impl ExportFormat {
    /// 拡張子から判定
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use json, csv, or excel", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// CSV出力の1行
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Entered")]
    entered: &'a str,
    #[serde(rename = "Closest Match")]
    closest_match: &'a str,
    #[serde(rename = "Match Score")]
    score: f64,
    #[serde(rename = "Status")]
    status: &'a str,
}

fn export_csv(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    for r in results {
        writer.serialize(CsvRow {
            entered: &r.entered,
            closest_match: r.closest_match_display(),
            score: r.score,
            status: r.status.label(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn export_json(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 照合結果をファイルに出力
///
/// 形式の指定がなければ拡張子から判定し、判定できなければExcel。
pub fn export_results(
    results: &[MatchResult],
    output_path: &Path,
    format: Option<ExportFormat>,
) -> Result<ExportFormat> {
    let format = format
        .or_else(|| ExportFormat::from_path(output_path))
        .unwrap_or_default();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(MedCheckError::FileNotFound(parent.display().to_string()));
        }
    }

    match format {
        ExportFormat::Json => export_json(results, output_path)?,
        ExportFormat::Csv => export_csv(results, output_path)?,
        ExportFormat::Excel => excel::generate_excel(results, output_path)?,
    }

    tracing::debug!(path = %output_path.display(), %format, rows = results.len(), "結果を出力");
    Ok(format)
}
