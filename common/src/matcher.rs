//! 照合・判定モジュール
//!
//! 入力名ごとに参照データベースで最も類似した名前を探し、
//! スコアの閾値で判定区分を決める。
//!
//! | スコア | 区分 |
//! |---|---|
//! | 95以上 | Correct |
//! | 70以上95未満 | Possible Mismatch |
//! | 70未満 / 一致候補なし | Mismatch |
//!
//! 閾値は既存の履歴と互換性を保つための固定値（設定不可）。

use crate::reference::ReferenceSet;
use crate::similarity::{normalize, ratio, token_sort};
use crate::types::{MatchResult, MatchStatus};

/// Correct判定の下限
pub const CORRECT_THRESHOLD: f64 = 95.0;

/// Possible Mismatch判定の下限
pub const POSSIBLE_MISMATCH_THRESHOLD: f64 = 70.0;

/// スコアから判定区分を決める
pub fn classify(score: f64) -> MatchStatus {
    if score >= CORRECT_THRESHOLD {
        MatchStatus::Correct
    } else if score >= POSSIBLE_MISMATCH_THRESHOLD {
        MatchStatus::PossibleMismatch
    } else {
        MatchStatus::Mismatch
    }
}

/// 最も類似した参照エントリの位置とスコア
///
/// スコアが厳密に上回った場合のみ更新するため、同点は参照順で先のものが残る。
pub fn best_match(entered: &str, reference: &ReferenceSet) -> Option<(usize, f64)> {
    let query = token_sort(&normalize(entered));
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in reference.token_sorted_names().iter().enumerate() {
        let score = ratio(&query, candidate);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best
}

/// 入力名1件を照合する
pub fn match_entry(entered: &str, reference: &ReferenceSet) -> MatchResult {
    match best_match(entered, reference) {
        Some((index, score)) => MatchResult {
            entered: entered.to_string(),
            closest_match: Some(reference.entries()[index].name.clone()),
            score,
            status: classify(score),
        },
        None => MatchResult::no_match(entered),
    }
}

/// 入力順を保ったまま全件照合する（重複も1件ずつ結果を返す）
pub fn match_batch(entered: &[String], reference: &ReferenceSet) -> Vec<MatchResult> {
    entered
        .iter()
        .map(|name| match_entry(name, reference))
        .collect()
}
