//! エラーケーステスト
//!
//! 入力ファイルまわりのエラーハンドリングを検証

use medcheck::error::MedCheckError;
use medcheck::table::load_table;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイル
#[test]
fn test_load_nonexistent_file() {
    let result = load_table(Path::new("/nonexistent/path/12345.csv"));
    assert!(matches!(result, Err(MedCheckError::FileNotFound(_))));
}

/// 対応していない拡張子
#[test]
fn test_load_unsupported_type() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meds.pdf");
    std::fs::write(&path, "dummy").unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, MedCheckError::UnsupportedFileType(_)));
    assert!(err.to_string().contains("meds.pdf"));
}

/// 空のCSV
#[test]
fn test_load_empty_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    assert!(matches!(load_table(&path), Err(MedCheckError::EmptyTable(_))));
}

/// テキストファイルは1行1件
#[test]
fn test_load_text_lines() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("names.txt");
    std::fs::write(&path, "Paracetamol\n\n  Ibuprofen  \n").unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Medicine Name"]);
    assert_eq!(table.column_values(0), vec!["Paracetamol", "Ibuprofen"]);
}

/// セミコロン区切りのCSV
#[test]
fn test_load_semicolon_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meds.csv");
    std::fs::write(&path, "Name;Price\nCrocin;25\nDolo 650;30\n").unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Name", "Price"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.column_index("price"), Some(1));
}

/// 列名の候補がエラーメッセージに出る
#[test]
fn test_column_not_found_message() {
    let err = MedCheckError::ColumnNotFound {
        name: "Medicin".into(),
        suggestion: Some("Medicine".into()),
    };
    assert!(err.to_string().contains("Medicine"));

    let err = MedCheckError::ColumnNotFound {
        name: "Foo".into(),
        suggestion: None,
    };
    assert!(err.to_string().contains("Foo"));
}

/// UTF-8 でないCSV（Excelの書き出し等）は Windows-1252 として読む
#[test]
fn test_load_non_utf8_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"Medicine Name\nParac\xE9tamol\n").unwrap();

    let table = load_table(&path).unwrap();
    let values = table.column_values(0);
    assert_eq!(values, vec!["Parac\u{e9}tamol"]);
    assert!(!values[0].contains('\u{FFFD}'));
}

/// UTF-8 でないテキストも同様
#[test]
fn test_load_non_utf8_text() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("names.txt");
    std::fs::write(&path, b"Caf\xE9ine\n").unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.column_values(0), vec!["Caf\u{e9}ine"]);
}
