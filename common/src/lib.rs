//! Medicine Mismatch Detector Common Library
//!
//! CLIと他のフロントエンドで共有される型と照合ロジック（I/Oなし）

pub mod types;
pub mod error;
pub mod similarity;
pub mod matcher;
pub mod reference;
pub mod search;
pub mod column;
pub mod entries;
pub mod analytics;
#[cfg(feature = "excel")]
pub mod export;

pub use types::{MatchResult, MatchStatus, ReferenceEntry, NO_MATCH};
pub use error::{Error, Result};
pub use similarity::{normalize, ratio, token_sort, token_sort_ratio};
pub use matcher::{classify, match_batch, match_entry};
pub use reference::{ReferenceSet, NAME_COLUMN};
pub use search::{browse, fuzzy_search, substring_search, SearchHit};
pub use column::{find_column, guess_name_column};
pub use entries::{prepare_entered, split_manual_input};
