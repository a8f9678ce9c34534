//! 参照データベースの検索
//!
//! - fuzzy_search: 単純ratioで60を超えるものをスコア降順
//! - substring_search: 正規化したクエリでの部分一致
//! - browse: クエリなし時の先頭一覧

use crate::reference::ReferenceSet;
use crate::similarity::{normalize, ratio};
use crate::types::ReferenceEntry;

/// あいまい検索でヒットとみなす下限（この値を超えること）
pub const SEARCH_SCORE_FLOOR: f64 = 60.0;

/// クエリなしで一覧表示する件数
pub const BROWSE_LIMIT: usize = 25;

/// 検索ヒット
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub entry: &'a ReferenceEntry,
    /// 参照データ内の位置
    pub index: usize,
    pub score: f64,
}

/// あいまい検索（スコア降順、同点は参照順）
pub fn fuzzy_search<'a>(query: &str, reference: &'a ReferenceSet) -> Vec<SearchHit<'a>> {
    let query = normalize(query);

    let mut hits: Vec<SearchHit<'a>> = reference
        .normalized_names()
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let score = ratio(&query, name);
            (score > SEARCH_SCORE_FLOOR).then(|| SearchHit {
                entry: &reference.entries()[index],
                index,
                score,
            })
        })
        .collect();

    // sort_byは安定ソート
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}

/// 部分一致検索
pub fn substring_search<'a>(query: &str, reference: &'a ReferenceSet) -> Vec<&'a ReferenceEntry> {
    let needle = normalize(query);
    reference
        .entries()
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// 先頭 BROWSE_LIMIT 件
pub fn browse(reference: &ReferenceSet) -> &[ReferenceEntry] {
    let entries = reference.entries();
    &entries[..entries.len().min(BROWSE_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(names: &[&str]) -> ReferenceSet {
        ReferenceSet::new(names.iter().map(|n| ReferenceEntry::new(*n)).collect())
    }

    #[test]
    fn test_fuzzy_search_filters_and_sorts() {
        let refs = ReferenceSet::builtin();
        let hits = fuzzy_search("Amoxicilin", &refs);

        assert!(!hits.is_empty());
        assert_eq!(hits[0].entry.name, "Amoxicillin");
        assert!(hits.iter().all(|h| h.score > SEARCH_SCORE_FLOOR));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_fuzzy_search_excludes_floor_score() {
        // "ab" vs "abc": 80, "ab" vs "axyz": 2/6 = 33
        let refs = reference(&["axyz", "abc"]);
        let hits = fuzzy_search("ab", &refs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
    }

    #[test]
    fn test_fuzzy_search_ties_keep_reference_order() {
        let refs = reference(&["abcy", "zzzz", "abcx"]);
        let hits = fuzzy_search("abc", &refs);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 2);
    }

    #[test]
    fn test_fuzzy_search_no_hits() {
        let refs = ReferenceSet::builtin();
        let hits = fuzzy_search("qqqqqqqq", &refs);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_fuzzy_search_floor_is_exclusive() {
        // "abc" / "abcdefg" はちょうど 60
        let refs = reference(&["abcdefg", "abcdef"]);
        let hits = fuzzy_search("abc", &refs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
    }

    #[test]
    fn test_substring_search_trims_query() {
        let refs = ReferenceSet::builtin();
        let found = substring_search("  metf ", &refs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Metformin");
    }

    #[test]
    fn test_substring_search_is_case_insensitive() {
        let refs = ReferenceSet::builtin();
        let found = substring_search("PRO", &refs);
        let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ibuprofen", "Ciprofloxacin"]);
    }

    #[test]
    fn test_browse_limits_rows() {
        let names: Vec<String> = (0..40).map(|i| format!("Medicine {}", i)).collect();
        let refs = ReferenceSet::new(names.iter().map(ReferenceEntry::new).collect());
        assert_eq!(browse(&refs).len(), BROWSE_LIMIT);
        assert_eq!(browse(&ReferenceSet::builtin()).len(), 13);
    }
}
