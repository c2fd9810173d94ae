use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeywordMatchError {
    #[error(transparent)]
    Common(#[from] keyword_match_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0} (csv/xlsx/xlsm/xls/ods)")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("シートにデータがありません: {0}")]
    EmptySheet(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeywordMatchError>;
