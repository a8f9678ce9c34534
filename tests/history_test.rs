//! 履歴ファイルの統合テスト

use medcheck::error::MedCheckError;
use medcheck::history::{filter_flagged, HistoryLog, HISTORY_HEADERS};
use medcheck_common::{match_batch, MatchStatus, ReferenceSet};
use tempfile::tempdir;

fn sample_results() -> Vec<medcheck_common::MatchResult> {
    let names: Vec<String> = ["Paracetmol", "Ibuprofin", "Xyzzy"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    match_batch(&names, &ReferenceSet::builtin())
}

#[test]
fn test_history_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = HistoryLog::new(dir.path().join("history.csv"));

    let results = sample_results();
    let written = log.append_with_time(&results, "2026-01-18 10:00:00").unwrap();
    assert_eq!(written, 3);

    let rows = log.load().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].time, "2026-01-18 10:00:00");
    assert_eq!(rows[0].entered, "Paracetmol");
    assert_eq!(rows[0].closest_match, "Paracetamol");
    assert_eq!(rows[0].match_status(), Some(MatchStatus::Correct));
    assert_eq!(rows[1].status, "⚠️ Possible Mismatch");
    assert_eq!(rows[2].status, "❌ Mismatch");
}

#[test]
fn test_header_written_once() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history.csv");
    let log = HistoryLog::new(&path);

    log.append_with_time(&sample_results(), "2026-01-18 10:00:00").unwrap();
    log.append_with_time(&sample_results(), "2026-01-18 11:00:00").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let header = HISTORY_HEADERS.join(",");
    assert_eq!(content.matches(&header).count(), 1);
    assert!(content.starts_with(&header));
    assert_eq!(log.load().unwrap().len(), 6);
}

#[test]
fn test_append_after_missing_trailing_newline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history.csv");
    std::fs::write(
        &path,
        "Time,Entered,Closest Match,Match Score,Status\n2026-01-01 09:00:00,Foo,—,0,❌ Mismatch",
    )
    .unwrap();

    let log = HistoryLog::new(&path);
    log.append_with_time(&sample_results(), "2026-01-18 10:00:00").unwrap();

    let rows = log.load().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].entered, "Foo");
    assert_eq!(rows[1].entered, "Paracetmol");
}

#[test]
fn test_missing_history_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = HistoryLog::new(dir.path().join("none.csv"));
    assert!(log.load().unwrap().is_empty());
}

#[test]
fn test_outdated_history_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history.csv");
    std::fs::write(&path, "Time,Entered,Closest Match,Match Score\n2026-01-01,Foo,Bar,50\n").unwrap();

    let err = HistoryLog::new(&path).load().unwrap_err();
    assert!(matches!(err, MedCheckError::OutdatedHistory(_)));
}

#[test]
fn test_filter_flagged_includes_possible_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = HistoryLog::new(dir.path().join("history.csv"));
    log.append_with_time(&sample_results(), "2026-01-18 10:00:00").unwrap();

    let rows = log.load().unwrap();
    let flagged = filter_flagged(&rows);
    assert_eq!(flagged.len(), 2);
    assert!(flagged.iter().all(|r| r.entered != "Paracetmol"));
}

#[test]
fn test_empty_batch_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history.csv");
    let written = HistoryLog::new(&path).append_with_time(&[], "2026-01-18 10:00:00").unwrap();
    assert_eq!(written, 0);
    assert!(!path.exists());
}
