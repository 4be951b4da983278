//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use first_aid_common::payload::status_error;
use first_aid_common::validation::{parse_quantity_update, validate_kit_id};
use first_aid_common::ValidationError;
use first_aid_tracker::config::Config;
use first_aid_tracker::error::TrackerError;
use tempfile::tempdir;

/// 壊れた設定ファイル
#[test]
fn test_load_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(TrackerError::JsonParse(_))));
}

/// バックエンドのエラー本文（detail）がそのまま表示される
#[test]
fn test_api_error_display() {
    let err: TrackerError = status_error(404, r#"{"detail": "Kit not found"}"#).into();
    assert_eq!(err.to_string(), "HTTP 404: Kit not found");
    assert!(matches!(err, TrackerError::Api(_)));
}

/// 入力エラーは送信前に止まる
#[test]
fn test_validation_errors() {
    let err: TrackerError = validate_kit_id("  ").unwrap_err().into();
    assert_eq!(err.to_string(), "Please enter a Kit Box Code.");

    let err: TrackerError = parse_quantity_update("-3").unwrap_err().into();
    assert!(matches!(
        err,
        TrackerError::Api(first_aid_common::Error::Validation(ValidationError::NegativeQuantity(_)))
    ));
    // 0 は有効なので「1以上」とは言わない
    assert!(!err.to_string().contains("at least 1"));
}

/// TrackerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TrackerError::Config("テスト設定エラー".to_string()),
        TrackerError::MissingBaseUrl,
        TrackerError::ItemNotFound("A1 / id_1".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }
}

/// IOエラーの変換
#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: TrackerError = io_error.into();

    assert!(matches!(err, TrackerError::Io(_)));
    assert!(format!("{}", err).contains("IOエラー"));
}
