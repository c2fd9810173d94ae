//! テーブルのプレビュー表示

use keyword_match_common::Table;

/// セル表示の最大文字数
const MAX_CELL_CHARS: usize = 24;

/// 先頭n行を表形式の文字列にする
pub fn render(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let mut lines = Vec::with_capacity(head.len() + 2);

    let header: Vec<String> = head.columns().iter().map(|c| truncate(c)).collect();
    lines.push(header.join(" | "));
    lines.push(
        header
            .iter()
            .map(|h| "-".repeat(h.chars().count().max(3)))
            .collect::<Vec<_>>()
            .join("-|-"),
    );

    for row in head.rows() {
        let cells: Vec<String> = row.iter().map(|c| truncate(&c.to_string())).collect();
        lines.push(cells.join(" | "));
    }

    if table.len() > head.len() {
        lines.push(format!("... (全{}行)", table.len()));
    }

    lines.join("\n")
}

fn truncate(value: &str) -> String {
    let single_line = value.replace(['\r', '\n'], " ");
    if single_line.chars().count() > MAX_CELL_CHARS {
        let cut: String = single_line.chars().take(MAX_CELL_CHARS - 1).collect();
        format!("{}…", cut)
    } else {
        single_line
    }
}
