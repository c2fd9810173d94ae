//! Keyword Match Common Library
//!
//! 辞書テーブルのキーワードでテキストテーブルを一括照合するコア処理。
//! CLIから入出力アダプタを除いた部分。

pub mod batch;
pub mod csv;
pub mod error;
pub mod index;
pub mod merger;
pub mod pattern;
pub mod table;

pub use batch::{run_batch, BatchMatcher, BatchResult, MatchConfig, MatchStats};
pub use error::{Error, Result, TableRole};
pub use index::KeywordIndex;
pub use merger::{merge_row, MatchSchema, RowOutcome, DEFAULT_MATCH_PREFIX};
pub use pattern::{KeywordMatch, KeywordMatcher};
pub use table::{CellValue, Record, Table};
