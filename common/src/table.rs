//! テーブルモデル
//!
//! 辞書テーブル・テキストテーブル・結果テーブルで共有される型:
//! - CellValue: セル値（照合時は常に文字列表現を使用）
//! - Table: 列名 + 行（全行が列数と同じ幅）
//! - Record: 1行分の「列名 → 値」ビュー

use crate::error::{Error, Result, TableRole};
use std::collections::HashSet;
use std::fmt;

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 空白のみの値か（Empty含む）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            // 整数値の浮動小数点は小数部なしで表示（Excelの数値セル対策）
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

/// 列名付きの表データ
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 行データから構築（短い行は空セルで補完）
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// 行を追加
    ///
    /// 列数より長い行は `Error::RaggedRow`（行番号は1始まり）
    pub fn push_row(&mut self, mut row: Vec<CellValue>) -> Result<()> {
        let width = self.columns.len();
        if row.len() > width {
            return Err(Error::RaggedRow {
                row: self.rows.len() + 1,
                expected: width,
                found: row.len(),
            });
        }
        row.resize(width, CellValue::Empty);
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 列を探し、なければ設定エラーを返す
    pub fn require_column(&self, name: &str, role: TableRole) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn {
            role,
            column: name.to_string(),
            available: self.columns.clone(),
        })
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|cells| Record {
            columns: &self.columns,
            cells,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record {
            columns: &self.columns,
            cells,
        })
    }

    /// 先頭n行のプレビュー
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// 1行分のビュー（列順を保持）
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> {
        self.columns.iter().map(String::as_str).zip(self.cells.iter())
    }
}

/// ヘッダー行を正規化
///
/// 空の列名は `Unnamed: <i>`、重複は `<name>.<n>` に置き換える
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut taken = HashSet::new();
    let mut headers = Vec::new();

    for (i, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };
        let unique = unique_name(&base, &taken);
        taken.insert(unique.clone());
        headers.push(unique);
    }

    headers
}

/// `taken` と衝突しない列名を生成（`base`, `base.1`, `base.2`, ...）
pub fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}.{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
