use super::{read_text, Table};
use crate::error::Result;
use std::path::Path;

/// 1行1件のテキストを1列の表として読み込む
pub(super) fn read_lines(path: &Path, column_name: &str) -> Result<Table> {
    let content = read_text(path)?;
    Ok(parse_lines(&content, column_name))
}

pub(super) fn parse_lines(content: &str, column_name: &str) -> Table {
    let rows = content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| vec![line.to_string()])
        .collect();

    Table {
        headers: vec![column_name.to_string()],
        rows,
    }
}
