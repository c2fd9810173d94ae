//! 入力ファイル読み込み
//!
//! 拡張子で形式を判定し、テーブルとして読み込む。
//! - csv: 共通ライブラリのCSVパーサ
//! - xlsx/xlsm/xls/ods: calamine

pub mod excel;

use crate::error::{KeywordMatchError, Result};
use keyword_match_common::Table;
use std::path::Path;

/// 入力ファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        Ok(InputFormat::Csv)
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputFormat::Spreadsheet)
    } else {
        Err(KeywordMatchError::UnsupportedFormat(path.display().to_string()))
    }
}

/// ファイルをテーブルとして読み込む
///
/// `sheet` はExcel系のみ有効（省略時は先頭シート）
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(KeywordMatchError::FileNotFound(path.display().to_string()));
    }

    let table = match detect_format(path)? {
        InputFormat::Csv => {
            if sheet.is_some() {
                tracing::warn!(path = %path.display(), "CSVファイルではシート指定を無視します");
            }
            let content = std::fs::read_to_string(path)?;
            keyword_match_common::csv::read_table(&content)?
        }
        InputFormat::Spreadsheet => excel::read_sheet(path, sheet)?,
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.width(),
        rows = table.len(),
        "テーブル読み込み完了"
    );

    Ok(table)
}
