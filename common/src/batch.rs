//! 一括照合モジュール
//!
//! 辞書テーブルとテキストテーブルを受け取り、全行に照合結果を付けた
//! 結果テーブルを返す。入力はすべて引数で受け取り、状態は持たない。

use crate::error::{Error, Result, TableRole};
use crate::index::KeywordIndex;
use crate::merger::{merge_row, MatchSchema, RowOutcome, DEFAULT_MATCH_PREFIX};
use crate::pattern::KeywordMatcher;
use crate::table::Table;
use std::sync::atomic::{AtomicBool, Ordering};

/// 列の指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// 辞書テーブルのキーワード列
    pub dictionary_key_column: String,
    /// テキストテーブルの照合対象列
    pub text_column: String,
    /// 照合列名の接頭辞
    pub match_prefix: String,
}

impl MatchConfig {
    pub fn new(dictionary_key_column: impl Into<String>, text_column: impl Into<String>) -> Self {
        Self {
            dictionary_key_column: dictionary_key_column.into(),
            text_column: text_column.into(),
            match_prefix: DEFAULT_MATCH_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.match_prefix = prefix.into();
        self
    }
}

/// 照合の統計情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// 処理した行数
    pub total: usize,
    /// キーワードが見つかった行数
    pub matched: usize,
    /// キーワードが見つからなかった行数
    pub unmatched: usize,
    /// 照合器と索引が食い違った行数（unmatched にも含む）
    pub faults: usize,
}

impl MatchStats {
    fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        match outcome {
            RowOutcome::Matched => self.matched += 1,
            RowOutcome::Unmatched => self.unmatched += 1,
            RowOutcome::Inconsistent => {
                self.unmatched += 1;
                self.faults += 1;
            }
        }
    }
}

/// 一括照合の結果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub table: Table,
    pub stats: MatchStats,
}

/// 1回の実行分の照合器（索引・パターン・列構成を保持）
#[derive(Debug, Clone)]
pub struct BatchMatcher {
    index: KeywordIndex,
    matcher: KeywordMatcher,
    schema: MatchSchema,
    text_column: usize,
}

impl BatchMatcher {
    /// 列指定を両テーブルで検証し、索引とパターンを構築する
    ///
    /// ここで失敗した場合、行は1つも処理されない
    pub fn new(dictionary: &Table, text: &Table, config: &MatchConfig) -> Result<Self> {
        let text_column = text.require_column(&config.text_column, TableRole::Text)?;
        let index = KeywordIndex::build(dictionary, &config.dictionary_key_column)?;
        let matcher = KeywordMatcher::compile(index.keywords())?;
        let schema = MatchSchema::new(text.columns(), index.attributes(), &config.match_prefix);

        Ok(Self {
            index,
            matcher,
            schema,
            text_column,
        })
    }

    pub fn schema(&self) -> &MatchSchema {
        &self.schema
    }

    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// 全行を照合
    pub fn run(&self, text: &Table) -> Result<BatchResult> {
        self.run_with_progress(text, |_| {})
    }

    /// 全行を照合（進捗コールバック付き、中断なし）
    pub fn run_with_progress<F>(&self, text: &Table, progress: F) -> Result<BatchResult>
    where
        F: FnMut(usize),
    {
        let never = AtomicBool::new(false);
        self.run_with(text, &never, progress)
    }

    /// 全行を照合（中断フラグ・進捗コールバック付き）
    ///
    /// `cancel` は各行の処理前に確認する。`progress` には処理済み行数を渡す。
    pub fn run_with<F>(&self, text: &Table, cancel: &AtomicBool, mut progress: F) -> Result<BatchResult>
    where
        F: FnMut(usize),
    {
        let expected = &self.schema.columns()[..self.schema.text_width()];
        if text.columns() != expected {
            return Err(Error::SchemaMismatch {
                expected: expected.to_vec(),
                found: text.columns().to_vec(),
            });
        }

        let mut rows = Vec::with_capacity(text.len());
        let mut stats = MatchStats::default();

        for (i, row) in text.rows().iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                tracing::info!(processed = i, "照合を中断");
                return Err(Error::Cancelled { processed: i });
            }

            let (output, outcome) =
                merge_row(row, self.text_column, &self.schema, &self.matcher, &self.index);
            stats.record(outcome);
            rows.push(output);
            progress(i + 1);
        }

        let table = Table::from_rows(self.schema.columns().to_vec(), rows)?;

        tracing::info!(
            total = stats.total,
            matched = stats.matched,
            unmatched = stats.unmatched,
            faults = stats.faults,
            "一括照合完了"
        );

        Ok(BatchResult { table, stats })
    }
}

/// 辞書テーブルとテキストテーブルを一括照合する
pub fn run_batch(dictionary: &Table, text: &Table, config: &MatchConfig) -> Result<BatchResult> {
    BatchMatcher::new(dictionary, text, config)?.run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(columns.iter().map(|s| s.to_string()).collect(), rows).unwrap()
    }

    fn dictionary() -> Table {
        table(
            &["keyword", "category"],
            vec![
                vec!["foo".into(), "X".into()],
                vec!["bar".into(), "Y".into()],
                vec!["foo".into(), "Z".into()],
            ],
        )
    }

    fn texts() -> Table {
        table(
            &["id", "text"],
            vec![
                vec![CellValue::Int(1), "see foo here".into()],
                vec![CellValue::Int(2), "zzz".into()],
                vec![CellValue::Int(3), "bar then foo".into()],
                vec![CellValue::Int(4), CellValue::Empty],
            ],
        )
    }

    #[test]
    fn test_run_batch() {
        let result = run_batch(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();

        assert_eq!(
            result.table.columns(),
            &["id", "text", "matched_keyword", "matched_category"]
        );
        assert_eq!(result.table.len(), 4);

        let first = result.table.record(0).unwrap();
        assert_eq!(first.get("matched_keyword"), Some(&CellValue::from("foo")));
        // 重複キーワードは最初の行の属性
        assert_eq!(first.get("matched_category"), Some(&CellValue::from("X")));

        let second = result.table.record(1).unwrap();
        assert_eq!(second.get("id"), Some(&CellValue::Int(2)));
        assert_eq!(second.get("text"), Some(&CellValue::from("zzz")));
        assert_eq!(second.get("matched_keyword"), Some(&CellValue::Empty));
        assert_eq!(second.get("matched_category"), Some(&CellValue::Empty));

        let third = result.table.record(2).unwrap();
        assert_eq!(third.get("matched_keyword"), Some(&CellValue::from("bar")));

        assert_eq!(
            result.stats,
            MatchStats { total: 4, matched: 2, unmatched: 2, faults: 0 }
        );
    }

    #[test]
    fn test_uniform_schema_and_length() {
        let text = texts();
        let result = run_batch(&dictionary(), &text, &MatchConfig::new("keyword", "text")).unwrap();

        assert_eq!(result.table.len(), text.len());
        let width = result.table.width();
        assert!(result.table.rows().iter().all(|row| row.len() == width));
    }

    #[test]
    fn test_idempotent() {
        let config = MatchConfig::new("keyword", "text");
        let a = run_batch(&dictionary(), &texts(), &config).unwrap();
        let b = run_batch(&dictionary(), &texts(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_text_rows() {
        let empty = table(&["text"], Vec::new());
        let result = run_batch(&dictionary(), &empty, &MatchConfig::new("keyword", "text")).unwrap();
        assert!(result.table.is_empty());
        assert_eq!(result.table.columns(), &["text", "matched_keyword", "matched_category"]);
        assert_eq!(result.stats.total, 0);
    }

    #[test]
    fn test_missing_columns() {
        let err = run_batch(&dictionary(), &texts(), &MatchConfig::new("kw", "text")).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { role: TableRole::Dictionary, .. }));

        let err = run_batch(&dictionary(), &texts(), &MatchConfig::new("keyword", "body")).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { role: TableRole::Text, .. }));
    }

    #[test]
    fn test_empty_dictionary_processes_no_rows() {
        let dict = table(&["keyword", "category"], vec![vec!["  ".into(), "X".into()]]);
        let mut processed = 0;
        let result = BatchMatcher::new(&dict, &texts(), &MatchConfig::new("keyword", "text"))
            .and_then(|m| m.run_with(&texts(), &AtomicBool::new(false), |n| processed = n));
        assert!(matches!(result, Err(Error::EmptyDictionary)));
        assert_eq!(processed, 0);
    }

    #[test]
    fn test_cancel_before_first_row() {
        let matcher = BatchMatcher::new(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();
        let cancel = AtomicBool::new(true);
        let err = matcher.run_with(&texts(), &cancel, |_| {}).unwrap_err();
        assert!(matches!(err, Error::Cancelled { processed: 0 }));
    }

    #[test]
    fn test_cancel_mid_batch() {
        let matcher = BatchMatcher::new(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();
        let cancel = AtomicBool::new(false);
        let err = matcher
            .run_with(&texts(), &cancel, |n| {
                if n == 2 {
                    cancel.store(true, Ordering::Relaxed);
                }
            })
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled { processed: 2 }));
    }

    #[test]
    fn test_progress_reports_every_row() {
        let matcher = BatchMatcher::new(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();
        let mut seen = Vec::new();
        matcher
            .run_with(&texts(), &AtomicBool::new(false), |n| seen.push(n))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_custom_prefix() {
        let config = MatchConfig::new("keyword", "text").with_prefix("hit_");
        let result = run_batch(&dictionary(), &texts(), &config).unwrap();
        assert_eq!(result.table.columns()[2], "hit_keyword");
        assert_eq!(result.table.columns()[3], "hit_category");
    }

    #[test]
    fn test_run_rejects_other_table_schema() {
        let matcher = BatchMatcher::new(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();
        let other = table(&["body"], vec![vec!["foo".into()]]);
        match matcher.run(&other) {
            Err(Error::SchemaMismatch { expected, found }) => {
                assert_eq!(expected, vec!["id".to_string(), "text".to_string()]);
                assert_eq!(found, vec!["body".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_run_with_progress() {
        let matcher = BatchMatcher::new(&dictionary(), &texts(), &MatchConfig::new("keyword", "text")).unwrap();
        let mut last = 0;
        let result = matcher.run_with_progress(&texts(), |n| last = n).unwrap();
        assert_eq!(last, 4);
        assert_eq!(result, matcher.run(&texts()).unwrap());
    }
}
