//! 検出セッションの統合テスト
//!
//! ファイル入力 → 照合 → 履歴追記 までを一通り通す

use medcheck::column_selector::ColumnChoice;
use medcheck::error::MedCheckError;
use medcheck::history::HistoryLog;
use medcheck::session::{collect_entered, load_reference, DetectOutcome, ReferenceSource, Session};
use medcheck_common::{MatchStatus, NO_MATCH};
use tempfile::tempdir;

#[test]
fn test_detect_from_csv_with_history() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("orders.csv");
    std::fs::write(&input, "Order,Drug,Qty\n1,Paracetmol,2\n2,ibuprofen,1\n3,PARACETMOL,4\n").unwrap();

    let entered = collect_entered(Some((input.as_path(), &ColumnChoice::Guess)), Some("Xyzzy")).unwrap();
    assert_eq!(entered, vec!["Paracetmol", "ibuprofen", "Xyzzy"]);

    let history_path = dir.path().join("logs").join("history.csv");
    let (reference, source) = load_reference(None, None).unwrap();
    let session = Session::new(reference, source).with_history(HistoryLog::new(&history_path));

    let (results, logged) = match session.detect(&entered).unwrap() {
        DetectOutcome::Checked { results, logged } => (results, logged),
        DetectOutcome::NothingToCheck => panic!("names were provided"),
    };

    assert_eq!(logged, 3);
    assert_eq!(results[0].closest_match.as_deref(), Some("Paracetamol"));
    assert_eq!(results[0].status, MatchStatus::Correct);
    assert_eq!(results[1].score, 100.0);
    assert_eq!(results[2].status, MatchStatus::Mismatch);

    let rows = HistoryLog::new(&history_path).load().unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_detect_nothing_writes_no_history() {
    let dir = tempdir().expect("Failed to create temp dir");
    let history_path = dir.path().join("history.csv");

    let entered = collect_entered(None, Some(" , ,")).unwrap();
    assert!(entered.is_empty());

    let (reference, source) = load_reference(None, None).unwrap();
    let session = Session::new(reference, source).with_history(HistoryLog::new(&history_path));
    assert_eq!(session.detect(&entered).unwrap(), DetectOutcome::NothingToCheck);
    assert!(!history_path.exists());
}

#[test]
fn test_uploaded_reference_replaces_builtin() {
    let dir = tempdir().expect("Failed to create temp dir");
    let upload = dir.path().join("meds.csv");
    std::fs::write(&upload, "Brand,Price\nDolo 650,30\nCrocin,25\n").unwrap();

    let configured = dir.path().join("unused.csv");
    let choice = ColumnChoice::Named("brand".to_string());
    let (reference, source) = load_reference(Some(configured.as_path()), Some((upload.as_path(), &choice))).unwrap();

    assert_eq!(reference.len(), 2);
    assert!(reference.has_prices());
    assert!(matches!(source, ReferenceSource::Uploaded { ref column, .. } if column == "Brand"));

    let session = Session::new(reference, source);
    match session.detect(&["Paracetamol".to_string()]).unwrap() {
        DetectOutcome::Checked { results, .. } => {
            assert_eq!(results[0].status, MatchStatus::Mismatch);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_configured_reference_requires_medicine_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meds.csv");
    std::fs::write(&path, "Brand\nCrocin\n").unwrap();

    let err = load_reference(Some(path.as_path()), None).unwrap_err();
    assert!(matches!(err, MedCheckError::MissingNameColumn));

    std::fs::write(&path, "Medicine Name,Company\nCrocin,GSK\n").unwrap();
    let (reference, source) = load_reference(Some(path.as_path()), None).unwrap();
    assert_eq!(reference.entries()[0].company.as_deref(), Some("GSK"));
    assert_eq!(source, ReferenceSource::Configured(path));
}

#[test]
fn test_empty_reference_gives_no_match() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meds.csv");
    std::fs::write(&path, "Medicine Name\n").unwrap();

    let (reference, source) = load_reference(Some(path.as_path()), None).unwrap();
    assert!(reference.is_empty());

    match Session::new(reference, source).detect(&["Aspirin".to_string()]).unwrap() {
        DetectOutcome::Checked { results, .. } => {
            assert_eq!(results[0].closest_match_display(), NO_MATCH);
            assert_eq!(results[0].score, 0.0);
            assert_eq!(results[0].status, MatchStatus::Mismatch);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_unknown_column_suggests() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("orders.csv");
    std::fs::write(&input, "Order,Medicine\n1,Paracetamol\n").unwrap();

    let choice = ColumnChoice::Named("Medicin".to_string());
    let err = collect_entered(Some((input.as_path(), &choice)), None).unwrap_err();
    match err {
        MedCheckError::ColumnNotFound { name, suggestion } => {
            assert_eq!(name, "Medicin");
            assert_eq!(suggestion.as_deref(), Some("Medicine"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
