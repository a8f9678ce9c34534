//! 参照データベース
//!
//! セッションごとに一度だけ構築し、照合中は変更しない。
//! 組み込みリスト、`Medicine Name` 列を持つ表、または任意の列を
//! 医薬品名として扱う表（アップロード）から作成する。

use crate::column::find_column;
use crate::error::{Error, Result};
use crate::similarity::{normalize, token_sort};
use crate::types::ReferenceEntry;

/// 医薬品名の必須列名
pub const NAME_COLUMN: &str = "Medicine Name";

const PRICE_COLUMN: &str = "Price";
const COMPANY_COLUMN: &str = "Company";
const CATEGORY_COLUMN: &str = "Category";
const PACKAGING_COLUMN: &str = "Packaging";

/// 照合用に正規化済みの参照データ
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    entries: Vec<ReferenceEntry>,
    /// 小文字化・trim済みの名前（検索用）
    normalized: Vec<String>,
    /// 正規化後にトークンを並べ替えた名前（照合用）
    token_sorted: Vec<String>,
}

impl ReferenceSet {
    /// エントリから作成（名前はtrimし、空の名前は除外）
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        let entries: Vec<ReferenceEntry> = entries
            .into_iter()
            .filter_map(|mut entry| {
                let trimmed = entry.name.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != entry.name.len() {
                    entry.name = trimmed.to_string();
                }
                Some(entry)
            })
            .collect();

        let normalized: Vec<String> = entries.iter().map(|e| normalize(&e.name)).collect();
        let token_sorted = normalized.iter().map(|n| token_sort(n)).collect();

        Self {
            entries,
            normalized,
            token_sorted,
        }
    }

    /// 組み込みの参照リスト
    pub fn builtin() -> Self {
        let rows = [
            ("Paracetamol", 15.0, "Cipla", "Allopathy", "Strip of 10 tablets"),
            ("Ibuprofen", 25.0, "Sun Pharma", "Allopathy", "Strip of 10 tablets"),
            ("Metformin", 35.0, "Torrent", "Allopathy", "Strip of 15 tablets"),
            ("Amoxicillin", 50.0, "Dr Reddy", "Allopathy", "Strip of 10 tablets"),
            ("Ciprofloxacin", 40.0, "Alkem", "Allopathy", "Strip of 10 tablets"),
            ("Cetirizine", 20.0, "Lupin", "Allopathy", "Strip of 15 tablets"),
            ("Omeprazole", 30.0, "Zydus", "Allopathy", "Strip of 10 capsules"),
            ("Atorvastatin", 60.0, "Sun Pharma", "Allopathy", "Strip of 10 tablets"),
            ("Azithromycin", 55.0, "Abbott", "Allopathy", "Strip of 6 tablets"),
            ("Amlodipine", 28.0, "Glenmark", "Allopathy", "Strip of 10 tablets"),
            ("Ashwagandha", 120.0, "Himalaya", "Ayurvedic", "Bottle of 60 capsules"),
            ("Triphala", 90.0, "Baidyanath", "Ayurvedic", "Bottle of 100 g powder"),
            ("Chyawanprash", 250.0, "Dabur", "Ayurvedic", "Bottle of 500 g"),
        ];

        Self::new(
            rows.iter()
                .map(|(name, price, company, category, packaging)| {
                    ReferenceEntry::with_details(name, *price, company, category, packaging)
                })
                .collect(),
        )
    }

    /// `Medicine Name` 列を必須とする表から作成
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self> {
        let name_index = headers
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .ok_or(Error::MissingNameColumn)?;
        Self::from_named_column(headers, rows, name_index)
    }

    /// 指定列を医薬品名として表から作成（アップロードを参照DBとして使う場合）
    pub fn from_named_column(
        headers: &[String],
        rows: &[Vec<String>],
        name_index: usize,
    ) -> Result<Self> {
        if name_index >= headers.len() {
            return Err(Error::InvalidReference(format!(
                "column index {} out of range ({} columns)",
                name_index,
                headers.len()
            )));
        }

        // 付帯情報の列（名前列と同じ列は使わない）
        let meta = |name: &str| find_column(headers, name).filter(|&i| i != name_index);
        let price_index = meta(PRICE_COLUMN);
        let company_index = meta(COMPANY_COLUMN);
        let category_index = meta(CATEGORY_COLUMN);
        let packaging_index = meta(PACKAGING_COLUMN);

        let cell = |row: &Vec<String>, index: Option<usize>| -> Option<String> {
            index
                .and_then(|i| row.get(i))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let entries = rows
            .iter()
            .map(|row| ReferenceEntry {
                name: row.get(name_index).cloned().unwrap_or_default(),
                price: cell(row, price_index).and_then(|p| p.parse::<f64>().ok()),
                company: cell(row, company_index),
                category: cell(row, category_index),
                packaging: cell(row, packaging_index),
            })
            .collect();

        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn normalized_names(&self) -> &[String] {
        &self.normalized
    }

    pub fn token_sorted_names(&self) -> &[String] {
        &self.token_sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 価格情報を持つエントリがあるか
    pub fn has_prices(&self) -> bool {
        self.entries.iter().any(|e| e.price.is_some())
    }
}
