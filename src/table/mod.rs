//! 表ファイル読み込みモジュール
//!
//! アップロードされた CSV / Excel / テキストを見出し行＋データ行の
//! 単純な表として読み込む。

mod csv;
mod excel;
mod text;

use crate::error::{MedCheckError, Result};
use medcheck_common::{find_column, NAME_COLUMN};
use std::path::Path;

/// 読み込み済みの表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 列名で位置を検索（大文字小文字を無視）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        find_column(&self.headers, name)
    }

    /// 列の値（空セルを除き、前後の空白を除去）
    pub fn column_values(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 対応するファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
    Text,
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "txt" => Ok(TableFormat::Text),
            e if SPREADSHEET_EXTENSIONS.contains(&e) => Ok(TableFormat::Spreadsheet),
            _ => Err(MedCheckError::UnsupportedFileType(path.display().to_string())),
        }
    }
}

/// テキストファイルを読み込む
///
/// UTF-8 でなければ Windows-1252（Excel が書き出す CSV に多い）として解釈する。
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(bytes))
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            tracing::debug!("UTF-8 ではないため Windows-1252 として読み込み");
            decoded.into_owned()
        }
    }
}

/// 表ファイルを読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(MedCheckError::FileNotFound(path.display().to_string()));
    }

    let format = TableFormat::from_path(path)?;
    let table = match format {
        TableFormat::Csv => csv::read_csv(path)?,
        TableFormat::Spreadsheet => excel::read_first_sheet(path)?,
        TableFormat::Text => text::read_lines(path, NAME_COLUMN)?,
    };

    if table.headers.is_empty() {
        return Err(MedCheckError::EmptyTable(path.display().to_string()));
    }

    tracing::debug!(
        path = %path.display(),
        ?format,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "表を読み込みました"
    );

    Ok(table)
}
