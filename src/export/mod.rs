pub mod excel;

use crate::cli::OutputFormat;
use crate::error::Result;
use keyword_match_common::Table;
use std::path::{Path, PathBuf};

/// 既定の出力パス: テキストファイルと同じ場所に `<stem>_matched.<ext>`
pub fn default_output_path(text_path: &Path, format: OutputFormat) -> PathBuf {
    let parent = text_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = text_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");
    parent.join(format!("{}_matched.{}", stem, format.extension()))
}

/// 出力形式を決める
///
/// 優先順: `--format` > 出力ファイルの拡張子 > 設定の既定値 > CSV
pub fn resolve_format(
    explicit: Option<OutputFormat>,
    output: Option<&Path>,
    configured: Option<OutputFormat>,
) -> OutputFormat {
    explicit
        .or_else(|| output.and_then(OutputFormat::from_path))
        .or(configured)
        .unwrap_or_default()
}

pub fn export_table(table: &Table, format: OutputFormat, output: &Path, csv_bom: bool) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Csv => {
            let content = keyword_match_common::csv::write_table(table, csv_bom);
            std::fs::write(output, content)?;
        }
        OutputFormat::Excel => {
            excel::generate_excel(table, output)?;
        }
    }

    tracing::debug!(path = %output.display(), rows = table.len(), %format, "結果を出力");
    Ok(())
}
