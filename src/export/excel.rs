//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::{MedCheckError, Result};
use medcheck_common::export::excel_core;
use medcheck_common::MatchResult;
use std::path::Path;

/// 結果シート名
const RESULTS_SHEET: &str = "Results";

pub fn generate_excel(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let buffer = excel_core::generate_results_buffer(results, RESULTS_SHEET)
        .map_err(MedCheckError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
