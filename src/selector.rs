//! 照合列の選択モジュール
//!
//! 列名が指定されていれば存在を確認して使い、なければ対話式で選ぶ。

use crate::error::{KeywordMatchError, Result};
use dialoguer::Select;
use keyword_match_common::{Table, TableRole};
use std::io::IsTerminal;

/// 列を決定する
///
/// - 指定あり: テーブルに存在すればそのまま返す（なければ設定エラー）
/// - 指定なし + 対話端末: 一覧から選択
/// - 指定なし + 非対話: 設定エラー
pub fn resolve_column(
    table: &Table,
    requested: Option<String>,
    role: TableRole,
    label: &str,
    flag: &str,
) -> Result<String> {
    if let Some(name) = requested {
        table.require_column(&name, role)?;
        return Ok(name);
    }

    if table.columns().is_empty() {
        return Err(KeywordMatchError::Config(format!("{}: 列がありません", label)));
    }

    if !std::io::stdin().is_terminal() {
        return Err(KeywordMatchError::Config(format!(
            "{}が指定されていません。`{}` で指定してください",
            label, flag
        )));
    }

    select_column_interactive(table, label)
}

/// 対話式で列を選択
pub fn select_column_interactive(table: &Table, label: &str) -> Result<String> {
    let default = default_column_index(table);
    let selection = Select::new()
        .with_prompt(format!("{}を選択してください", label))
        .items(table.columns())
        .default(default)
        .interact()
        .map_err(|e| KeywordMatchError::Prompt(e.to_string()))?;

    Ok(table.columns()[selection].clone())
}

/// 初期選択位置（先頭行で最初に値が入っている列）
fn default_column_index(table: &Table) -> usize {
    table
        .rows()
        .first()
        .and_then(|row| row.iter().position(|c| !c.is_blank()))
        .unwrap_or(0)
}
