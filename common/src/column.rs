//! 医薬品名列の推定
//!
//! アップロードされた表の列名から医薬品名が入っている列を推定する。
//! UIに依存しない純粋関数。

/// 医薬品名列とみなす列名（小文字・trim後に比較）
pub const NAME_COLUMN_CANDIDATES: &[&str] = &[
    "medicine",
    "medicine name",
    "drug",
    "brand",
    "name",
    "product",
];

/// 医薬品名列の位置を推定する
///
/// 候補名に一致する最初の列、なければ先頭列。列がなければNone。
pub fn guess_name_column<S: AsRef<str>>(columns: &[S]) -> Option<usize> {
    columns
        .iter()
        .position(|c| {
            let key = c.as_ref().trim().to_lowercase();
            NAME_COLUMN_CANDIDATES.contains(&key.as_str())
        })
        .or(if columns.is_empty() { None } else { Some(0) })
}

/// 列名で検索（大文字小文字・前後空白を無視）
pub fn find_column<S: AsRef<str>>(columns: &[S], name: &str) -> Option<usize> {
    let target = name.trim().to_lowercase();
    columns
        .iter()
        .position(|c| c.as_ref().trim().to_lowercase() == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_name_column_candidate() {
        assert_eq!(guess_name_column(&["Qty", "Drug", "Name"]), Some(1));
        assert_eq!(guess_name_column(&["id", " Medicine Name "]), Some(1));
        assert_eq!(guess_name_column(&["PRODUCT"]), Some(0));
    }

    #[test]
    fn test_guess_name_column_falls_back_to_first() {
        assert_eq!(guess_name_column(&["Qty", "Notes"]), Some(0));
    }

    #[test]
    fn test_guess_name_column_no_columns() {
        let columns: [&str; 0] = [];
        assert_eq!(guess_name_column(&columns), None);
    }

    #[test]
    fn test_find_column() {
        let columns = vec!["Medicine Name".to_string(), "Price".to_string()];
        assert_eq!(find_column(&columns, "price"), Some(1));
        assert_eq!(find_column(&columns, " medicine name"), Some(0));
        assert_eq!(find_column(&columns, "Company"), None);
    }
}
