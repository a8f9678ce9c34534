//! 集計
//!
//! グラフ表示の元になる集計値を作る。描画はフロントエンド側で行う。

use crate::reference::ReferenceSet;
use crate::types::{MatchResult, MatchStatus};
use std::collections::HashMap;

/// 照合結果の区分別件数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSummary {
    pub total: usize,
    pub correct: usize,
    pub possible_mismatch: usize,
    pub mismatch: usize,
}

impl ResultSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.status {
                MatchStatus::Correct => summary.correct += 1,
                MatchStatus::PossibleMismatch => summary.possible_mismatch += 1,
                MatchStatus::Mismatch => summary.mismatch += 1,
            }
        }
        summary
    }
}

/// ラベル別の件数（件数降順、同数は出現順）
///
/// 履歴の Status 列をそのまま数える。古い表記も別ラベルとして残る。
pub fn status_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for label in labels {
        let count = counts.entry(label).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }

    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|label| (label.to_string(), counts[label]))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// 価格グラフ用の1点
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint<'a> {
    pub name: &'a str,
    pub price: f64,
    pub company: Option<&'a str>,
}

/// 価格を持つエントリを参照順に取り出す
pub fn price_points(reference: &ReferenceSet) -> Vec<PricePoint<'_>> {
    reference
        .entries()
        .iter()
        .filter_map(|e| {
            e.price.map(|price| PricePoint {
                name: &e.name,
                price,
                company: e.company.as_deref(),
            })
        })
        .collect()
}
