//! キーワードパターン照合モジュール
//!
//! 全キーワードを1つの選択パターン（`a|b|c`）にまとめてコンパイルし、
//! 1行につき1回の走査で最初に現れるキーワードを見つける。
//!
//! 照合規則:
//! - 開始位置が最も左のマッチを採用
//! - 同じ開始位置なら辞書で先に出てくるキーワードを採用
//!   （`["ab", "a"]` と `"xaby"` → `"ab"`）

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// コンパイル後のパターンサイズ上限（大きな辞書向け）
const PATTERN_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// 遅延DFAのキャッシュ上限
const DFA_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// 1件のマッチ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'t> {
    /// マッチしたキーワード（テキスト中の該当部分）
    pub keyword: &'t str,
    /// バイト開始位置
    pub start: usize,
    /// バイト終了位置
    pub end: usize,
}

/// コンパイル済みキーワード照合器
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Regex,
    keyword_count: usize,
}

impl KeywordMatcher {
    /// キーワード一覧から照合器を構築
    ///
    /// キーワードはリテラルとして扱う（正規表現の特殊文字はエスケープ）。
    /// 重複は最初の出現位置を残して除く。
    pub fn compile<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut seen = HashSet::new();
        let alternatives: Vec<String> = keywords
            .iter()
            .map(AsRef::as_ref)
            .filter(|k| !k.is_empty() && seen.insert(*k))
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        let pattern = alternatives.join("|");
        let regex = RegexBuilder::new(&pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()?;

        tracing::debug!(
            keywords = alternatives.len(),
            pattern_len = pattern.len(),
            "キーワードパターンをコンパイル"
        );

        Ok(Self {
            regex,
            keyword_count: alternatives.len(),
        })
    }

    /// テキスト中の最初のキーワードを探す
    pub fn find<'t>(&self, text: &'t str) -> Option<KeywordMatch<'t>> {
        self.regex.find(text).map(|m| KeywordMatch {
            keyword: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// パターンに含まれるキーワード数（重複除去後）
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }
}
