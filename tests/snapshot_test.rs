//! スナップショット保存テスト
//!
//! 品目マスタの保存判定（last_edited 比較）を検証

use chrono::NaiveDateTime;
use first_aid_tracker::snapshot::{
    freshness, latest_snapshot, save_catalog_if_newer, save_snapshot, Freshness, CATALOG_DATA_PREFIX,
    KIT_DATA_PREFIX,
};
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// ファイル名の日時が最大のものが最新
#[test]
fn test_latest_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "firstIAiditem_20250101_120000.json", "{}");
    write(dir.path(), "firstIAiditem_20250301_080000.json", "{}");
    write(dir.path(), "firstIAiditem_20250201_235959.json", "{}");
    write(dir.path(), "first_aid_kit_20251231_000000.json", "{}");
    write(dir.path(), "firstIAiditem_latest.json", "{}");

    let latest = latest_snapshot(dir.path(), CATALOG_DATA_PREFIX).unwrap();
    assert_eq!(latest.file_name().unwrap(), "firstIAiditem_20250301_080000.json");

    let latest = latest_snapshot(dir.path(), KIT_DATA_PREFIX).unwrap();
    assert_eq!(latest.file_name().unwrap(), "first_aid_kit_20251231_000000.json");
}

/// 保存済みがなければNone
#[test]
fn test_latest_snapshot_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(latest_snapshot(dir.path(), CATALOG_DATA_PREFIX).is_none());
}

/// 判定表
#[test]
fn test_freshness_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let stamped = dir.path().join("stamped.json");
    let unstamped = dir.path().join("unstamped.json");
    let broken = dir.path().join("broken.json");
    std::fs::write(&stamped, r#"{"items": [], "last_edited": "2025-05-01T10:00:00"}"#).unwrap();
    std::fs::write(&unstamped, r#"{"items": []}"#).unwrap();
    std::fs::write(&broken, "{").unwrap();

    let newer = json!({"items": [], "last_edited": "2025-05-02T08:00:00"});
    let same = json!({"items": [], "last_edited": "2025-05-01T10:00:00"});
    let older = json!({"items": [], "last_edited": "2025-04-30T10:00:00"});
    let none = json!({"items": []});
    let garbage = json!({"items": [], "last_edited": "not a date"});

    assert_eq!(freshness(&newer, None), Freshness::NoPrevious);
    assert_eq!(freshness(&newer, Some(&stamped)), Freshness::Newer);
    assert_eq!(freshness(&same, Some(&stamped)), Freshness::NotNewer);
    assert_eq!(freshness(&older, Some(&stamped)), Freshness::NotNewer);
    assert_eq!(freshness(&newer, Some(&unstamped)), Freshness::PreviousUnstamped);
    assert_eq!(freshness(&none, Some(&stamped)), Freshness::DownloadUnstamped);
    assert_eq!(freshness(&garbage, Some(&stamped)), Freshness::DownloadUnstamped);
    assert_eq!(freshness(&none, Some(&unstamped)), Freshness::NeitherStamped);
    assert!(matches!(
        freshness(&newer, Some(&broken)),
        Freshness::PreviousUnreadable(_)
    ));
}

/// 保存内容はダウンロードしたJSONそのもの
#[test]
fn test_save_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let data = json!({"A1": [{"id": "id_1", "name": "Gauze", "qty": 2}], "last_edited": "2025-05-01T10:00:00"});

    let path = save_snapshot(dir.path(), KIT_DATA_PREFIX, &data, at("2025-06-01 09:30:00")).unwrap();
    assert_eq!(path.file_name().unwrap(), "first_aid_kit_20250601_093000.json");

    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, data);
}

/// 品目マスタは新しい場合だけ保存
#[test]
fn test_save_catalog_if_newer() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = json!({"items": [], "last_edited": "2025-05-01T10:00:00"});

    let outcome = save_catalog_if_newer(dir.path(), &first, at("2025-06-01 09:00:00")).unwrap();
    assert_eq!(outcome.freshness, Freshness::NoPrevious);
    assert!(outcome.saved.is_some());

    // 同じ内容をもう一度
    let outcome = save_catalog_if_newer(dir.path(), &first, at("2025-06-01 10:00:00")).unwrap();
    assert_eq!(outcome.freshness, Freshness::NotNewer);
    assert!(outcome.saved.is_none());

    let second = json!({"items": [], "last_edited": "2025-05-03T10:00:00"});
    let outcome = save_catalog_if_newer(dir.path(), &second, at("2025-06-01 11:00:00")).unwrap();
    assert_eq!(outcome.freshness, Freshness::Newer);
    assert_eq!(
        outcome.saved.unwrap().file_name().unwrap(),
        "firstIAiditem_20250601_110000.json"
    );

    let files = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 2);
}
