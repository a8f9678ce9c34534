use super::{read_text, Table};
use crate::error::Result;
use std::path::Path;

/// 区切り文字の候補
const DELIMITER_CANDIDATES: &[u8] = &[b',', b';', b'\t', b'|'];

/// 先頭数行で区切り文字を推定する
///
/// 1行目で2列以上になり、かつ列数が揃っている行が最も多い候補を採用。
/// 同点なら列数の多い方。
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();
    let mut best = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| {
                ::csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let first = counts.first().copied().unwrap_or(0);
        if first <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == first).count();
        let score = consistent * first;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

pub(super) fn read_csv(path: &Path) -> Result<Table> {
    let content = read_text(path)?;
    parse_csv(content.trim_start_matches('\u{feff}'))
}

pub(super) fn parse_csv(content: &str) -> Result<Table> {
    let delimiter = sniff_delimiter(content);
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}
