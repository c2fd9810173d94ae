//! キーワード索引モジュール
//!
//! 辞書テーブルから「キーワード → 属性行」の索引と、
//! パターン構築用のキーワード一覧を作る。

use crate::error::{Error, Result, TableRole};
use crate::table::{CellValue, Table};
use std::collections::HashMap;

/// キーワード索引
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    /// 辞書のキー列以外の列名（辞書の列順）
    attributes: Vec<String>,
    /// キーワード → attribute_rows の位置（空白キーは含まない）
    entries: HashMap<String, usize>,
    /// 属性値（attributes と同じ並び）
    attribute_rows: Vec<Vec<CellValue>>,
    /// 空白を除いたキーワード一覧（重複を含む、辞書の行順）
    keywords: Vec<String>,
}

impl KeywordIndex {
    /// 辞書テーブルから索引を構築
    ///
    /// キー列がなければ `Error::MissingColumn`、
    /// 有効なキーワードが1件もなければ `Error::EmptyDictionary`。
    pub fn build(dictionary: &Table, key_column: &str) -> Result<Self> {
        let key_index = dictionary.require_column(key_column, TableRole::Dictionary)?;

        let attributes: Vec<String> = dictionary
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_index)
            .map(|(_, name)| name.clone())
            .collect();

        let mut entries = HashMap::new();
        let mut attribute_rows = Vec::new();
        let mut keywords = Vec::new();

        for row in dictionary.rows() {
            let keyword = row[key_index].to_string();
            if keyword.trim().is_empty() {
                continue;
            }

            // 同じキーワードは最初の行を採用
            if !entries.contains_key(&keyword) {
                let values = row
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != key_index)
                    .map(|(_, v)| v.clone())
                    .collect();
                entries.insert(keyword.clone(), attribute_rows.len());
                attribute_rows.push(values);
            }

            keywords.push(keyword);
        }

        if keywords.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        tracing::debug!(
            rows = dictionary.len(),
            keywords = keywords.len(),
            distinct = entries.len(),
            "キーワード索引を構築"
        );

        Ok(Self {
            attributes,
            entries,
            attribute_rows,
            keywords,
        })
    }

    /// キーワードに対応する属性値（`attributes()` と同じ並び）
    pub fn get(&self, keyword: &str) -> Option<&[CellValue]> {
        self.entries
            .get(keyword)
            .map(|&i| self.attribute_rows[i].as_slice())
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// 重複を除いたキーワード数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
