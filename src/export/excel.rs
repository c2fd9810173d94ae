//! Excel生成（rust_xlsxwriter）

use crate::error::{KeywordMatchError, Result};
use keyword_match_common::{CellValue, Table};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "照合結果";

/// Excelの列数上限
const MAX_COLUMNS: usize = 16_384;

/// Excelの行数上限（ヘッダー含む）
const MAX_ROWS: usize = 1_048_576;

/// 1セルに書ける文字数の上限
const MAX_CELL_CHARS: usize = 32_767;

pub fn generate_excel(table: &Table, output_path: &Path) -> Result<()> {
    if table.width() > MAX_COLUMNS || table.len() + 1 > MAX_ROWS {
        return Err(KeywordMatchError::ExcelGeneration(format!(
            "Excelの上限を超えています ({}行 x {}列)",
            table.len(),
            table.width()
        )));
    }

    write_workbook(table, output_path).map_err(|e| KeywordMatchError::ExcelGeneration(e.to_string()))
}

fn write_workbook(table: &Table, output_path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, name) in table.columns().iter().enumerate() {
        let name = fit_cell_text(name, 0, col);
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (index, cell) in row.iter().enumerate() {
            let col = index as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, fit_cell_text(s, row_num, index))?;
                }
                CellValue::Int(v) => {
                    worksheet.write_number(row_num, col, *v as f64)?;
                }
                CellValue::Float(v) => {
                    worksheet.write_number(row_num, col, *v)?;
                }
                CellValue::Bool(v) => {
                    worksheet.write_boolean(row_num, col, *v)?;
                }
            }
        }
    }

    workbook.save(output_path)?;
    Ok(())
}

/// セル上限を超える文字列は先頭から上限文字数までに切り詰める
fn fit_cell_text(text: &str, row: u32, col: usize) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        None => text,
        Some((end, _)) => {
            tracing::warn!(
                row,
                col,
                chars = text.chars().count(),
                "セルの文字数がExcelの上限を超えたため切り詰めます"
            );
            &text[..end]
        }
    }
}
