//! Excel生成（共通ライブラリ）
//!
//! 照合結果シートと区分別集計シートを持つブックをバッファに生成

use crate::analytics::ResultSummary;
use crate::types::{MatchResult, MatchStatus};
use rust_xlsxwriter::*;

/// 結果シートの列見出し（履歴ファイルと同じ並び）
pub const RESULT_HEADERS: [&str; 4] = ["Entered", "Closest Match", "Match Score", "Status"];

const ENTERED_COL_WIDTH: f64 = 28.0;
const MATCH_COL_WIDTH: f64 = 28.0;
const SCORE_COL_WIDTH: f64 = 13.0;
const STATUS_COL_WIDTH: f64 = 22.0;

/// 区分ごとの文字色
fn status_color(status: MatchStatus) -> Color {
    match status {
        MatchStatus::Correct => Color::RGB(0x1E7B34),
        MatchStatus::PossibleMismatch => Color::RGB(0xB26A00),
        MatchStatus::Mismatch => Color::RGB(0xC62828),
    }
}

/// 照合結果をExcelバッファに生成
///
/// # Arguments
/// * `results` - 照合結果（入力順）
/// * `sheet_title` - 結果シート名
pub fn generate_results_buffer(results: &[MatchResult], sheet_title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF0F0F0))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let score_format = Format::new()
        .set_num_format("0.0")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 結果シート
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_title)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, width) in [ENTERED_COL_WIDTH, MATCH_COL_WIDTH, SCORE_COL_WIDTH, STATUS_COL_WIDTH]
            .into_iter()
            .enumerate()
        {
            worksheet.set_column_width(col as u16, width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }

        for (col, header) in RESULT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        for (i, result) in results.iter().enumerate() {
            let row = i as u32 + 1;
            let status_format = text_format.clone().set_font_color(status_color(result.status));

            worksheet.write_string_with_format(row, 0, &result.entered, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_string_with_format(row, 1, result.closest_match_display(), &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_number_with_format(row, 2, result.score, &score_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_string_with_format(row, 3, result.status.label(), &status_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        worksheet.set_freeze_panes(1, 0)
            .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

        if !results.is_empty() {
            worksheet.autofilter(0, 0, results.len() as u32, 3)
                .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
        }
    }

    // 集計シート
    {
        let summary = ResultSummary::from_results(results);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Summary")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        worksheet.set_column_width(0, STATUS_COL_WIDTH)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;

        worksheet.write_string_with_format(0, 0, "Status", &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        worksheet.write_string_with_format(0, 1, "Count", &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;

        let rows = [
            (MatchStatus::Correct, summary.correct),
            (MatchStatus::PossibleMismatch, summary.possible_mismatch),
            (MatchStatus::Mismatch, summary.mismatch),
        ];
        for (i, (status, count)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            let status_format = text_format.clone().set_font_color(status_color(*status));
            worksheet.write_string_with_format(row, 0, status.label(), &status_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet.write_number_with_format(row, 1, *count as f64, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        worksheet.write_string_with_format(4, 0, "Total", &header_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(4, 1, summary.total as f64, &header_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_results_buffer() {
        let results = vec![
            MatchResult {
                entered: "Parasetamol".to_string(),
                closest_match: Some("Paracetamol".to_string()),
                score: 90.9,
                status: MatchStatus::PossibleMismatch,
            },
            MatchResult::no_match("Xyz"),
        ];

        let buffer = generate_results_buffer(&results, "Results").unwrap();
        // xlsxはZIP形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_results_buffer_empty() {
        let buffer = generate_results_buffer(&[], "Results").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_invalid_sheet_name_is_error() {
        // シート名に使えない文字
        let result = generate_results_buffer(&[], "bad/name");
        assert!(result.is_err());
    }
}
