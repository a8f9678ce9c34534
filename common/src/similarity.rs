//! 文字列類似度
//!
//! 挿入・削除のみの編集距離（Indel距離）を正規化した ratio と、
//! 語順の違いを吸収する token_sort_ratio を提供する。
//! スコアは 0〜100（100 = 完全一致）。

/// 照合用に正規化（前後の空白除去＋小文字化）
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// 最長共通部分列の長さ
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

/// Indel距離（置換は削除＋挿入の2手として数える）
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    a_chars.len() + b_chars.len() - 2 * lcs_length(&a_chars, &b_chars)
}

/// 正規化類似度 0〜100
///
/// 両方空なら100、片方のみ空なら0。
pub fn ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();

    if total == 0 {
        return 100.0;
    }

    let lcs = lcs_length(&a_chars, &b_chars);
    100.0 * (2 * lcs) as f64 / total as f64
}

/// 空白区切りのトークンをアルファベット順に並べ替えて連結
pub fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// 語順を無視した類似度 0〜100
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&token_sort(a), &token_sort(b))
}
