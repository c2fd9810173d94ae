//! CSV読み書き
//!
//! - ダブルクォート、`""` エスケープ、クォート内の改行に対応
//! - 先頭行をヘッダーとして扱う
//! - セル値は型推論せず文字列のまま保持する

use crate::error::{Error, Result};
use crate::table::{normalize_headers, CellValue, Table};

const UTF8_BOM: char = '\u{feff}';

/// CSV文字列をレコード単位に分解
pub fn parse_records(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Csv(format!("{}行目: クォートが閉じていません", line)));
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// CSV文字列からテーブルを読み込む
///
/// 空行は読み飛ばす。列数より短い行は空セルで補完する。
pub fn read_table(content: &str) -> Result<Table> {
    let mut records = parse_records(content)?
        .into_iter()
        .filter(|r| !is_blank_record(r));

    let Some(header) = records.next() else {
        return Ok(Table::default());
    };

    let mut table = Table::new(normalize_headers(&header));
    for record in records {
        table.push_row(record.into_iter().map(CellValue::from).collect())?;
    }

    Ok(table)
}

/// テーブルをCSV文字列に変換
///
/// `bom` を指定するとUTF-8 BOMを付ける（Excelでの文字化け対策）
pub fn write_table(table: &Table, bom: bool) -> String {
    let mut out = String::new();
    if bom {
        out.push(UTF8_BOM);
    }

    write_record(&mut out, table.columns().iter().map(String::as_str));
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        write_record(&mut out, cells.iter().map(String::as_str));
    }

    out
}

fn write_record<'a, I>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn is_blank_record(record: &[String]) -> bool {
    record.iter().all(|f| f.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CSV: &str = "keyword,category,備考\n\
        foo,X,\n\
        \"a,b\",\"say \"\"hi\"\"\",\"line1\nline2\"\n\
        \n\
        bar,Y\n";

    #[test]
    fn test_parse_records() {
        let records = parse_records(TEST_CSV).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0], vec!["keyword", "category", "備考"]);
        assert_eq!(records[2], vec!["a,b", "say \"hi\"", "line1\nline2"]);
    }

    #[test]
    fn test_parse_crlf_and_bom() {
        let records = parse_records("\u{feff}a,b\r\n1,2\r\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let records = parse_records("a,b\n1,").unwrap();
        assert_eq!(records[1], vec!["1", ""]);
    }

    #[test]
    fn test_unclosed_quote() {
        let err = parse_records("a,b\n\"oops,1\n").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_read_table() {
        let table = read_table(TEST_CSV).unwrap();
        assert_eq!(table.columns(), &["keyword", "category", "備考"]);
        // 空行はスキップ、短い行は補完
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0][2], CellValue::Empty);
        assert_eq!(table.rows()[2], vec!["bar".into(), "Y".into(), CellValue::Empty]);
    }

    #[test]
    fn test_read_table_wide_row() {
        let err = read_table("a\n1,2\n").unwrap_err();
        assert!(matches!(err, Error::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_read_empty() {
        let table = read_table("").unwrap();
        assert_eq!(table.width(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_write_table() {
        let table = Table::from_rows(
            vec!["text".to_string(), "n".to_string()],
            vec![
                vec!["a,b".into(), CellValue::Float(2.0)],
                vec!["say \"hi\"".into(), CellValue::Empty],
            ],
        )
        .unwrap();

        let csv = write_table(&table, false);
        assert_eq!(csv, "text,n\n\"a,b\",2\n\"say \"\"hi\"\"\",\n");

        let with_bom = write_table(&table, true);
        assert!(with_bom.starts_with('\u{feff}'));
        assert_eq!(read_table(&with_bom).unwrap(), read_table(&csv).unwrap());
    }
}
