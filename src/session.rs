//! 検出セッション
//!
//! 参照データと履歴ファイルをセッション単位で保持し、明示的に受け渡す。
//! 参照データは検出実行中に差し替えない。

use crate::column_selector::{resolve_column, ColumnChoice};
use crate::error::Result;
use crate::history::HistoryLog;
use crate::table::load_table;
use medcheck_common::{match_batch, prepare_entered, split_manual_input, MatchResult, ReferenceSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// 参照データの出所
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSource {
    /// 組み込みリスト
    Builtin,
    /// 設定ファイルで指定された参照ファイル
    Configured(PathBuf),
    /// このセッションだけ使うアップロードファイル
    Uploaded { path: PathBuf, column: String },
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSource::Builtin => write!(f, "組み込みリスト"),
            ReferenceSource::Configured(path) => write!(f, "{}", path.display()),
            ReferenceSource::Uploaded { path, column } => {
                write!(f, "{} (列: {})", path.display(), column)
            }
        }
    }
}

/// 参照データを読み込む
///
/// アップロード指定があればそれを優先し、次に設定の参照ファイル、
/// どちらもなければ組み込みリストを使う。
pub fn load_reference(
    configured: Option<&Path>,
    upload: Option<(&Path, &ColumnChoice)>,
) -> Result<(ReferenceSet, ReferenceSource)> {
    if let Some((path, choice)) = upload {
        let table = load_table(path)?;
        let index = resolve_column(&table, choice)?;
        let reference = ReferenceSet::from_named_column(&table.headers, &table.rows, index)?;
        let source = ReferenceSource::Uploaded {
            path: path.to_path_buf(),
            column: table.headers[index].clone(),
        };
        tracing::info!(source = %source, entries = reference.len(), "参照データを差し替え");
        return Ok((reference, source));
    }

    if let Some(path) = configured {
        let table = load_table(path)?;
        let reference = ReferenceSet::from_table(&table.headers, &table.rows)?;
        tracing::debug!(path = %path.display(), entries = reference.len(), "設定の参照データを使用");
        return Ok((reference, ReferenceSource::Configured(path.to_path_buf())));
    }

    Ok((ReferenceSet::builtin(), ReferenceSource::Builtin))
}

/// 照合する名前を集める（ファイルの列 → 手入力の順、重複除去）
pub fn collect_entered(
    file: Option<(&Path, &ColumnChoice)>,
    manual: Option<&str>,
) -> Result<Vec<String>> {
    let file_values = match file {
        Some((path, choice)) => {
            let table = load_table(path)?;
            let index = resolve_column(&table, choice)?;
            table.column_values(index)
        }
        None => Vec::new(),
    };

    let manual_values = manual.map(split_manual_input).unwrap_or_default();
    Ok(prepare_entered(file_values, manual_values))
}

/// 検出結果
#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    /// 照合する名前がない（履歴も書かない）
    NothingToCheck,
    Checked {
        results: Vec<MatchResult>,
        /// 履歴に書いた行数
        logged: usize,
    },
}

/// 1セッション分の状態
#[derive(Debug, Clone)]
pub struct Session {
    reference: ReferenceSet,
    source: ReferenceSource,
    history: Option<HistoryLog>,
}

impl Session {
    pub fn new(reference: ReferenceSet, source: ReferenceSource) -> Self {
        Self {
            reference,
            source,
            history: None,
        }
    }

    /// 検出結果を履歴に追記する
    pub fn with_history(mut self, history: HistoryLog) -> Self {
        self.history = Some(history);
        self
    }

    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }

    pub fn source(&self) -> &ReferenceSource {
        &self.source
    }

    /// 照合を実行し、履歴があれば追記する
    pub fn detect(&self, entered: &[String]) -> Result<DetectOutcome> {
        if entered.is_empty() {
            return Ok(DetectOutcome::NothingToCheck);
        }

        let results = match_batch(entered, &self.reference);
        tracing::debug!(
            entered = entered.len(),
            reference = self.reference.len(),
            "照合完了"
        );

        let logged = match &self.history {
            Some(history) => history.append(&results)?,
            None => 0,
        };

        Ok(DetectOutcome::Checked { results, logged })
    }
}
