//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use keyword_match::error::KeywordMatchError;
use keyword_match::reader;
use keyword_match_common::{run_batch, MatchConfig, TableRole};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let result = reader::load_table(Path::new("/nonexistent/path/12345.csv"), None);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, KeywordMatchError::FileNotFound(_)));
}

/// 未対応の拡張子
#[test]
fn test_load_unsupported_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dict.txt");
    std::fs::write(&path, "keyword\nfoo\n").unwrap();

    let err = reader::load_table(&path, None).unwrap_err();
    assert!(matches!(err, KeywordMatchError::UnsupportedFormat(_)));
}

/// 壊れたExcelファイル
#[test]
fn test_load_broken_spreadsheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a zip").unwrap();

    let err = reader::load_table(&path, None).unwrap_err();
    assert!(matches!(err, KeywordMatchError::SpreadsheetRead(_)));
}

/// 辞書にキーワード列がない場合
#[test]
fn test_missing_key_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let dict_path = dir.path().join("dict.csv");
    let text_path = dir.path().join("text.csv");
    std::fs::write(&dict_path, "keyword,category\nfoo,X\n").unwrap();
    std::fs::write(&text_path, "text\nsee foo here\n").unwrap();

    let dictionary = reader::load_table(&dict_path, None).unwrap();
    let text = reader::load_table(&text_path, None).unwrap();

    let err: KeywordMatchError = run_batch(&dictionary, &text, &MatchConfig::new("キーワード", "text"))
        .unwrap_err()
        .into();

    match err {
        KeywordMatchError::Common(keyword_match_common::Error::MissingColumn { role, column, .. }) => {
            assert_eq!(role, TableRole::Dictionary);
            assert_eq!(column, "キーワード");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// 空白のみのキーワード辞書
#[test]
fn test_empty_dictionary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let dict_path = dir.path().join("dict.csv");
    std::fs::write(&dict_path, "keyword,category\n  ,X\n,Y\n").unwrap();

    let dictionary = reader::load_table(&dict_path, None).unwrap();
    let text = keyword_match_common::csv::read_table("text\nabc\n").unwrap();

    let err = run_batch(&dictionary, &text, &MatchConfig::new("keyword", "text")).unwrap_err();
    assert!(matches!(err, keyword_match_common::Error::EmptyDictionary));
}

/// KeywordMatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        KeywordMatchError::Config("テスト設定エラー".to_string()),
        KeywordMatchError::FileNotFound("dict.xlsx".to_string()),
        KeywordMatchError::UnsupportedFormat("dict.txt".to_string()),
        KeywordMatchError::SpreadsheetRead("読み込み失敗".to_string()),
        KeywordMatchError::EmptySheet("empty.xlsx".to_string()),
        KeywordMatchError::ExcelGeneration("Excel生成エラー".to_string()),
        KeywordMatchError::Prompt("中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = KeywordMatchError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: KeywordMatchError = io_err.into();

    assert!(matches!(err, KeywordMatchError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: KeywordMatchError = json_err.into();

    assert!(matches!(err, KeywordMatchError::JsonParse(_)));
}

/// エラーチェーン（透過的エラー）
#[test]
fn test_error_chain_transparent() {
    let common_err = keyword_match_common::Error::EmptyDictionary;
    let err: KeywordMatchError = common_err.into();

    // 透過的エラーなのでメッセージがそのまま表示される
    assert_eq!(format!("{}", err), "辞書に有効なキーワードがありません");
}
