//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Reference data must contain a 'Medicine Name' column")]
    MissingNameColumn,

    #[error("Invalid reference data: {0}")]
    InvalidReference(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_name_column() {
        let display = format!("{}", Error::MissingNameColumn);
        assert!(display.contains("'Medicine Name'"));
    }

    #[test]
    fn test_error_display_invalid_reference() {
        let error = Error::InvalidReference("列番号が範囲外です".to_string());
        assert_eq!(format!("{}", error), "Invalid reference data: 列番号が範囲外です");
    }
}
