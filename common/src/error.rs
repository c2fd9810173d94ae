//! エラー型定義

use thiserror::Error;

/// 照合対象のテーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// 辞書テーブル（キーワード側）
    Dictionary,
    /// テキストテーブル（解析対象側）
    Text,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRole::Dictionary => write!(f, "辞書"),
            TableRole::Text => write!(f, "テキスト"),
        }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("{role}テーブルに列 '{column}' がありません (利用可能な列: {})", .available.join(", "))]
    MissingColumn {
        role: TableRole,
        column: String,
        available: Vec<String>,
    },

    #[error("辞書に有効なキーワードがありません")]
    EmptyDictionary,

    #[error("パターンのコンパイルに失敗: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{row}行目の列数が不正です (期待: {expected}, 実際: {found})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("テーブルの列構成が照合器と一致しません (期待: {}, 実際: {})", .expected.join(", "), .found.join(", "))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("CSV解析エラー: {0}")]
    Csv(String),

    #[error("処理が中断されました ({processed}行処理済み)")]
    Cancelled { processed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
