//! 医薬品名列の選択モジュール
//!
//! 明示指定 > 対話式選択 > 列名からの推定 の順で列を決める。

use crate::error::{MedCheckError, Result};
use crate::table::Table;
use dialoguer::Select;
use medcheck_common::guess_name_column;

/// 候補提示する最大編集距離
const SUGGESTION_MAX_DISTANCE: usize = 3;

/// 列の選び方
#[derive(Debug, Clone, Default)]
pub enum ColumnChoice {
    /// 列名を指定
    Named(String),
    /// 対話式で選択（推定列を初期値にする）
    Interactive,
    /// 列名から推定
    #[default]
    Guess,
}

impl ColumnChoice {
    /// コマンドライン引数から作成
    pub fn from_args(column: Option<String>, interactive: bool) -> Self {
        match (column, interactive) {
            (Some(name), _) => ColumnChoice::Named(name),
            (None, true) => ColumnChoice::Interactive,
            (None, false) => ColumnChoice::Guess,
        }
    }
}

/// 列を決定して位置を返す
pub fn resolve_column(table: &Table, choice: &ColumnChoice) -> Result<usize> {
    if table.headers.is_empty() {
        return Err(MedCheckError::EmptyTable("列がありません".into()));
    }

    let guessed = guess_name_column(&table.headers).unwrap_or(0);

    let index = match choice {
        ColumnChoice::Named(name) => table.column_index(name).ok_or_else(|| {
            MedCheckError::ColumnNotFound {
                name: name.clone(),
                suggestion: suggest_column(name, &table.headers),
            }
        })?,
        ColumnChoice::Interactive => select_column_interactive(table, guessed)?,
        ColumnChoice::Guess => guessed,
    };

    tracing::debug!(column = %table.headers[index], index, "医薬品名列を選択");
    Ok(index)
}

/// 最も近い列名（編集距離が SUGGESTION_MAX_DISTANCE 以内）
pub fn suggest_column(name: &str, headers: &[String]) -> Option<String> {
    let needle = name.trim().to_lowercase();
    headers
        .iter()
        .map(|h| (h, strsim::levenshtein(&needle, &h.trim().to_lowercase())))
        .filter(|(_, distance)| *distance <= SUGGESTION_MAX_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(h, _)| h.clone())
}

/// 対話式で列を選択
fn select_column_interactive(table: &Table, default: usize) -> Result<usize> {
    // プレビュー（先頭の値）つきの選択肢
    let items: Vec<String> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let preview: Vec<String> = table.column_values(i).into_iter().take(3).collect();
            if preview.is_empty() {
                header.clone()
            } else {
                format!("{}  (例: {})", header, preview.join(", "))
            }
        })
        .collect();

    Select::new()
        .with_prompt("医薬品名の列を選択してください")
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| MedCheckError::Prompt(e.to_string()))
}
