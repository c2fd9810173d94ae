//! 行マージモジュール
//!
//! テキスト行に照合結果の列（`matched_keyword`, `matched_<属性>`）を付け足す。
//! マッチの有無に関わらず全行が同じ列構成になる。

use crate::index::KeywordIndex;
use crate::pattern::KeywordMatcher;
use crate::table::{unique_name, CellValue};
use std::collections::HashSet;

/// 照合列名のデフォルト接頭辞
pub const DEFAULT_MATCH_PREFIX: &str = "matched_";

/// 1行の照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Matched,
    Unmatched,
    /// 照合器が索引にないキーワードを返した（照合なし扱い）
    Inconsistent,
}

/// 結果テーブルの列構成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSchema {
    /// 元のテキストテーブルの列数
    text_width: usize,
    /// 照合列（先頭がキーワード列、以降は辞書属性の順）
    match_columns: Vec<String>,
    /// テキスト列 + 照合列
    columns: Vec<String>,
}

impl MatchSchema {
    /// テキストテーブルの列と辞書属性から列構成を決める
    ///
    /// 生成した列名が既存の列と衝突する場合は `.1`, `.2`, ... を付ける
    pub fn new(text_columns: &[String], attributes: &[String], prefix: &str) -> Self {
        let mut taken: HashSet<String> = text_columns.iter().cloned().collect();
        let mut match_columns = Vec::with_capacity(attributes.len() + 1);

        let candidates = std::iter::once(format!("{}keyword", prefix))
            .chain(attributes.iter().map(|attr| format!("{}{}", prefix, attr)));

        for candidate in candidates {
            let name = unique_name(&candidate, &taken);
            if name != candidate {
                tracing::debug!(from = %candidate, to = %name, "照合列名の衝突を回避");
            }
            taken.insert(name.clone());
            match_columns.push(name);
        }

        let columns = text_columns
            .iter()
            .cloned()
            .chain(match_columns.iter().cloned())
            .collect();

        Self {
            text_width: text_columns.len(),
            match_columns,
            columns,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn match_columns(&self) -> &[String] {
        &self.match_columns
    }

    /// キーワード列の名前
    pub fn keyword_column(&self) -> &str {
        &self.match_columns[0]
    }

    pub fn text_width(&self) -> usize {
        self.text_width
    }
}

/// テキスト行を照合して結果行を作る
///
/// `text_column` はテキスト行内の照合対象列の位置
pub fn merge_row(
    row: &[CellValue],
    text_column: usize,
    schema: &MatchSchema,
    matcher: &KeywordMatcher,
    index: &KeywordIndex,
) -> (Vec<CellValue>, RowOutcome) {
    let mut output = Vec::with_capacity(schema.columns.len());
    output.extend_from_slice(row);
    output.resize(schema.columns.len(), CellValue::Empty);

    let text = row
        .get(text_column)
        .map(ToString::to_string)
        .unwrap_or_default();

    let Some(found) = matcher.find(&text) else {
        return (output, RowOutcome::Unmatched);
    };

    let Some(attributes) = index.get(found.keyword) else {
        tracing::error!(
            keyword = found.keyword,
            "照合器が索引にないキーワードを返しました（照合なしとして扱います）"
        );
        return (output, RowOutcome::Inconsistent);
    };

    let base = schema.text_width;
    output[base] = CellValue::Text(found.keyword.to_string());
    for (offset, value) in attributes.iter().enumerate() {
        output[base + 1 + offset] = value.clone();
    }

    (output, RowOutcome::Matched)
}
