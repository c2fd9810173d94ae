use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "keyword-match")]
#[command(about = "キーワード辞書によるテキスト一括照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 辞書ファイルのキーワードでテキストファイルを一括照合
    Match {
        /// 辞書ファイル（キーワード列と属性列を含む）
        #[arg(required = true)]
        dictionary: PathBuf,

        /// 照合対象のテキストファイル
        #[arg(required = true)]
        text: PathBuf,

        /// 辞書のキーワード列（省略時は対話選択）
        #[arg(short, long)]
        key_column: Option<String>,

        /// テキストファイルの照合対象列（省略時は対話選択）
        #[arg(short, long)]
        text_column: Option<String>,

        /// 出力ファイル（デフォルト: <テキストファイル名>_matched.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 照合列名の接頭辞（デフォルト: matched_）
        #[arg(long)]
        prefix: Option<String>,

        /// プレビュー表示する行数
        #[arg(long)]
        preview: Option<usize>,

        /// 辞書ファイルのシート名（Excelのみ、デフォルト: 先頭シート）
        #[arg(long)]
        dictionary_sheet: Option<String>,

        /// テキストファイルのシート名（Excelのみ、デフォルト: 先頭シート）
        #[arg(long)]
        text_sheet: Option<String>,
    },

    /// ファイルの列一覧と先頭行を表示
    Columns {
        /// CSV/Excelファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 読み込むシート名（Excelのみ）
        #[arg(long)]
        sheet: Option<String>,

        /// 表示する行数
        #[arg(long)]
        preview: Option<usize>,
    },

    /// 設定を表示/編集
    Config {
        /// 照合列名の接頭辞を設定
        #[arg(long)]
        set_prefix: Option<String>,

        /// プレビュー行数を設定
        #[arg(long)]
        set_preview_rows: Option<usize>,

        /// 既定の出力形式を設定 (csv/excel)
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// CSVにUTF-8 BOMを付ける (true/false)
        #[arg(long)]
        csv_bom: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Excel,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
        }
    }

    /// 拡張子から出力形式を判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "xlsx" => Some(OutputFormat::Excel),
            _ => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use csv or excel", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}
