//! 入力名リストの整形

use std::collections::HashSet;

/// カンマ区切りの手入力を分割（空要素は除外）
pub fn split_manual_input(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// ファイル由来の値と手入力を結合し、大文字小文字を無視して重複除去する
///
/// ファイルの値が先、手入力が後。最初に出現した表記を残す。
pub fn prepare_entered<I, J>(file_values: I, manual_values: J) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    J: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    file_values
        .into_iter()
        .chain(manual_values)
        .filter_map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            seen.insert(trimmed.to_lowercase())
                .then(|| trimmed.to_string())
        })
        .collect()
}
