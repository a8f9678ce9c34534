//! 照合処理の型定義
//!
//! - ReferenceEntry: 参照データベースの1件（表示用の医薬品名＋付帯情報）
//! - MatchStatus: スコアから決まる判定区分
//! - MatchResult: 入力名1件ごとの照合結果

use serde::{Deserialize, Serialize};
use std::fmt;

/// 一致候補がない場合の表示値
pub const NO_MATCH: &str = "—";

/// 参照データベースのエントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    /// 医薬品名（表示用、元の表記のまま）
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub packaging: Option<String>,
}

impl ReferenceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 付帯情報つきで作成（組み込みリスト用）
    pub fn with_details(
        name: &str,
        price: f64,
        company: &str,
        category: &str,
        packaging: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            price: Some(price),
            company: Some(company.to_string()),
            category: Some(category.to_string()),
            packaging: Some(packaging.to_string()),
        }
    }
}

/// 判定区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Correct")]
    Correct,
    #[serde(rename = "Possible Mismatch")]
    PossibleMismatch,
    #[serde(rename = "Mismatch")]
    Mismatch,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [
        MatchStatus::Correct,
        MatchStatus::PossibleMismatch,
        MatchStatus::Mismatch,
    ];

    /// 区分名（絵文字なし）
    pub fn name(&self) -> &'static str {
        match self {
            MatchStatus::Correct => "Correct",
            MatchStatus::PossibleMismatch => "Possible Mismatch",
            MatchStatus::Mismatch => "Mismatch",
        }
    }

    /// 履歴ファイルに書き込むラベル
    ///
    /// 既存の履歴ファイルと同じ表記を維持すること。
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Correct => "✅ Correct",
            MatchStatus::PossibleMismatch => "⚠️ Possible Mismatch",
            MatchStatus::Mismatch => "❌ Mismatch",
        }
    }

    /// 要確認（Correct以外）かどうか
    pub fn is_flagged(&self) -> bool {
        !matches!(self, MatchStatus::Correct)
    }

    /// ラベルから区分を復元する（先頭の絵文字は任意）
    pub fn parse_label(label: &str) -> Option<Self> {
        let text = label
            .trim()
            .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
            .to_lowercase();

        match text.as_str() {
            "correct" => Some(MatchStatus::Correct),
            "possible mismatch" => Some(MatchStatus::PossibleMismatch),
            "mismatch" => Some(MatchStatus::Mismatch),
            _ => None,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 照合結果（作成後は変更しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 入力された名前（元の表記）
    pub entered: String,
    /// 最も近い参照名（表示用）。参照が空ならNone
    pub closest_match: Option<String>,
    /// 類似度 0〜100
    pub score: f64,
    pub status: MatchStatus,
}

impl MatchResult {
    /// 一致候補なしの結果
    pub fn no_match(entered: impl Into<String>) -> Self {
        Self {
            entered: entered.into(),
            closest_match: None,
            score: 0.0,
            status: MatchStatus::Mismatch,
        }
    }

    /// 表示・履歴用の最近傍名
    pub fn closest_match_display(&self) -> &str {
        self.closest_match.as_deref().unwrap_or(NO_MATCH)
    }
}
