//! ターミナル表示
//!
//! 表と横棒グラフを文字列として組み立てる（出力は呼び出し側）。

use crate::history::HistoryRow;
use medcheck_common::analytics::{PricePoint, ResultSummary};
use medcheck_common::{MatchResult, ReferenceEntry, SearchHit};
use unicode_width::UnicodeWidthStr;

/// 横棒の最大幅（文字数）
const BAR_WIDTH: usize = 30;

const BAR_CHAR: char = '█';

/// 横棒を描画
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    BAR_CHAR.to_string().repeat(filled.clamp(1, width))
}

/// 表示幅（全角・絵文字は2桁）
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// 罫線なしの単純な表
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| pad(c, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        cells.resize(headers.len(), "");
        lines.push(render_row(cells));
    }

    lines.join("\n")
}

fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// 照合結果の表
pub fn format_results_table(results: &[MatchResult]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.entered.clone(),
                r.closest_match_display().to_string(),
                format_score(r.score),
                r.status.label().to_string(),
            ]
        })
        .collect();
    render_table(&["Entered", "Closest Match", "Match Score", "Status"], &rows)
}

/// 入力ごとのスコア横棒
pub fn format_score_bars(results: &[MatchResult]) -> String {
    let label_width = results
        .iter()
        .map(|r| display_width(&r.entered))
        .max()
        .unwrap_or(0);

    results
        .iter()
        .map(|r| {
            format!(
                "{}  {} {:>5}  {} ({})",
                pad(&r.entered, label_width),
                pad(&bar(r.score, 100.0, BAR_WIDTH), BAR_WIDTH),
                format_score(r.score),
                r.status.label(),
                r.closest_match_display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 区分別件数の1行サマリ
pub fn format_summary(summary: &ResultSummary) -> String {
    format!(
        "{}件中 ✅ {} / ⚠️ {} / ❌ {}",
        summary.total, summary.correct, summary.possible_mismatch, summary.mismatch
    )
}

/// ラベル別件数の横棒
pub fn format_count_bars(counts: &[(String, usize)]) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    let label_width = counts.iter().map(|(l, _)| display_width(l)).max().unwrap_or(0);

    counts
        .iter()
        .map(|(label, count)| {
            format!(
                "{}  {} {}",
                pad(label, label_width),
                pad(&bar(*count as f64, max, BAR_WIDTH), BAR_WIDTH),
                count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 価格の横棒
pub fn format_price_bars(points: &[PricePoint<'_>]) -> String {
    let max = points.iter().map(|p| p.price).fold(0.0, f64::max);
    let label_width = points.iter().map(|p| display_width(p.name)).max().unwrap_or(0);

    points
        .iter()
        .map(|p| {
            let company = p.company.map(|c| format!(" ({})", c)).unwrap_or_default();
            format!(
                "{}  {} {}{}",
                pad(p.name, label_width),
                pad(&bar(p.price, max, BAR_WIDTH), BAR_WIDTH),
                p.price,
                company
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// 参照データの表
pub fn format_reference_table(entries: &[ReferenceEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                opt(&e.company),
                opt(&e.category),
                e.price.map(|p| p.to_string()).unwrap_or_default(),
                opt(&e.packaging),
            ]
        })
        .collect();
    render_table(&["Medicine Name", "Company", "Category", "Price", "Packaging"], &rows)
}

/// あいまい検索の結果
pub fn format_search_hits(hits: &[SearchHit<'_>]) -> String {
    hits.iter()
        .map(|h| format!("✅ {} ({:.0}%)", h.entry.name, h.score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 履歴の表
pub fn format_history(rows: &[&HistoryRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.time.clone(),
                r.entered.clone(),
                r.closest_match.clone(),
                r.score.map(format_score).unwrap_or_default(),
                r.status.clone(),
            ]
        })
        .collect();
    render_table(&["Time", "Entered", "Closest Match", "Match Score", "Status"], &rows)
}
