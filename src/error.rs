use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedCheckError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}（csv / xlsx / xls / xlsm / ods / txt）")]
    UnsupportedFileType(String),

    #[error("ファイルに列がありません: {0}")]
    EmptyTable(String),

    #[error("列 '{name}' が見つかりません{}", suggestion_hint(.suggestion))]
    ColumnNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("参照データには 'Medicine Name' 列が必要です")]
    MissingNameColumn,

    #[error("参照データが不正: {0}")]
    InvalidReference(String),

    #[error("履歴ファイル {0} は古い形式です（'Status' 列がありません）。ファイルを削除して再度検出を実行してください")]
    OutdatedHistory(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("表計算ファイル読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

impl From<medcheck_common::Error> for MedCheckError {
    fn from(err: medcheck_common::Error) -> Self {
        match err {
            medcheck_common::Error::MissingNameColumn => MedCheckError::MissingNameColumn,
            medcheck_common::Error::InvalidReference(msg) => MedCheckError::InvalidReference(msg),
        }
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!("（もしかして: '{}'）", s))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, MedCheckError>;
