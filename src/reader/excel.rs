//! Excel/ODS読み込み（calamine）

use crate::error::{KeywordMatchError, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDateTime;
use keyword_match_common::table::normalize_headers;
use keyword_match_common::{CellValue, Table};
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// シートを読み込む（先頭行をヘッダーとして扱う）
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| KeywordMatchError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| KeywordMatchError::SpreadsheetRead(format!("シート '{}': {}", name, e)))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| KeywordMatchError::EmptySheet(path.display().to_string()))?
            .map_err(|e| KeywordMatchError::SpreadsheetRead(e.to_string()))?,
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(KeywordMatchError::EmptySheet(path.display().to_string()));
    };

    let columns = normalize_headers(header.iter().map(|c| to_cell(c).to_string()));
    let mut body: Vec<Vec<CellValue>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    // 末尾の空行は除く
    while body
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_empty))
    {
        body.pop();
    }

    Ok(Table::from_rows(columns, body)?)
}

/// calamineのセル値を変換
fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
            Some(dt) => CellValue::Text(format_datetime(dt)),
            None => CellValue::from(data.to_string()),
        },
        Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(e) => {
            tracing::warn!(error = ?e, "エラーセルを空として扱います");
            CellValue::Empty
        }
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}
