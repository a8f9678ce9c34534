//! 検出履歴モジュール
//!
//! 追記専用のCSVファイル。列は固定:
//! `Time, Entered, Closest Match, Match Score, Status`
//!
//! 1回の検出結果はメモリ上でまとめてエンコードし、1回の書き込みで追記する。
//! `Status` 列のない古い形式は移行せずエラーにする。

use crate::error::{MedCheckError, Result};
use chrono::Local;
use medcheck_common::{MatchResult, MatchStatus};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

/// 履歴ファイルの列
pub const HISTORY_HEADERS: [&str; 5] = ["Time", "Entered", "Closest Match", "Match Score", "Status"];

/// Time列の書式（ローカル時刻）
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STATUS_COLUMN: &str = "Status";

/// 履歴の1行
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub time: String,
    pub entered: String,
    pub closest_match: String,
    /// 数値として読めない場合はNone
    pub score: Option<f64>,
    /// 書き込まれたラベルそのまま
    pub status: String,
}

impl HistoryRow {
    pub fn match_status(&self) -> Option<MatchStatus> {
        MatchStatus::parse_label(&self.status)
    }

    /// 要確認の行（Possible Mismatch / Mismatch）
    pub fn is_flagged(&self) -> bool {
        self.match_status().is_some_and(|s| s.is_flagged())
    }
}

/// 履歴ファイル
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 現在時刻で追記
    pub fn append(&self, results: &[MatchResult]) -> Result<usize> {
        let stamp = Local::now().format(TIME_FORMAT).to_string();
        self.append_with_time(results, &stamp)
    }

    /// 指定した時刻文字列で追記（書き込んだ行数を返す）
    pub fn append_with_time(&self, results: &[MatchResult], time: &str) -> Result<usize> {
        if results.is_empty() {
            return Ok(0);
        }

        let needs_header = !self.has_content()?;
        let mut buffer = Vec::new();

        if !needs_header && !self.ends_with_newline()? {
            buffer.push(b'\n');
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(buffer);

        if needs_header {
            writer.write_record(HISTORY_HEADERS)?;
        }

        for result in results {
            let score = result.score.to_string();
            writer.write_record([
                time,
                result.entered.as_str(),
                result.closest_match_display(),
                score.as_str(),
                result.status.label(),
            ])?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|e| MedCheckError::Io(e.into_error()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buffer)?;

        tracing::debug!(path = %self.path.display(), rows = results.len(), "履歴に追記");
        Ok(results.len())
    }

    /// 履歴を読み込む（ファイルがなければ空）
    pub fn load(&self) -> Result<Vec<HistoryRow>> {
        if !self.has_content()? {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);

        let status_index = index_of(STATUS_COLUMN)
            .ok_or_else(|| MedCheckError::OutdatedHistory(self.path.display().to_string()))?;
        let time_index = index_of(HISTORY_HEADERS[0]);
        let entered_index = index_of(HISTORY_HEADERS[1]);
        let match_index = index_of(HISTORY_HEADERS[2]);
        let score_index = index_of(HISTORY_HEADERS[3]);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |index: Option<usize>| {
                index
                    .and_then(|i| record.get(i))
                    .unwrap_or_default()
                    .to_string()
            };

            rows.push(HistoryRow {
                time: field(time_index),
                entered: field(entered_index),
                closest_match: field(match_index),
                score: field(score_index).trim().parse::<f64>().ok(),
                status: field(Some(status_index)),
            });
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "履歴を読み込み");
        Ok(rows)
    }

    fn has_content(&self) -> Result<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() > 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn ends_with_newline(&self) -> Result<bool> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }
}

/// 要確認の行のみ
pub fn filter_flagged(rows: &[HistoryRow]) -> Vec<&HistoryRow> {
    rows.iter().filter(|r| r.is_flagged()).collect()
}
