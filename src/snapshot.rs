//! データファイルのスナップショット保存
//!
//! バックエンドの生データ（キットデータと品目マスタ）をダウンロードし、
//! 日時付きファイル名で保存する。品目マスタは `last_edited` が前回保存分より
//! 新しい場合だけ保存する。

use crate::client::KitClient;
use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use first_aid_common::payload::last_edited_of;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const KIT_DATA_PREFIX: &str = "first_aid_kit";
pub const CATALOG_DATA_PREFIX: &str = "firstIAiditem";

lazy_static::lazy_static! {
    // {prefix}_YYYYmmdd_HHMMSS.json
    static ref SNAPSHOT_RE: Regex = Regex::new(r"^(first_aid_kit|firstIAiditem)_(\d{8}_\d{6})\.json$").unwrap();
}

/// 保存ファイル名
pub fn snapshot_file_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{}_{}.json", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// フォルダ直下で最新（ファイル名の日時が最大）のスナップショット
pub fn latest_snapshot(dir: &Path, prefix: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            let caps = SNAPSHOT_RE.captures(&name)?;
            if &caps[1] != prefix {
                return None;
            }
            let stamp = caps[2].to_string();
            Some((stamp, e.into_path()))
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, path)| path)
}

/// `last_edited` の解釈（ISO 8601、日付のみも可）
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 品目マスタを保存するかどうかの判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// 前回保存分なし
    NoPrevious,
    /// ダウンロード分の方が新しい
    Newer,
    /// 前回保存分と同じか古い
    NotNewer,
    /// 前回保存分に有効な `last_edited` がない
    PreviousUnstamped,
    /// ダウンロード分に有効な `last_edited` がない（前回分にはある）
    DownloadUnstamped,
    /// どちらにも有効な `last_edited` がない
    NeitherStamped,
    /// 前回保存分が読めない
    PreviousUnreadable(String),
}

impl Freshness {
    pub fn should_save(&self) -> bool {
        !matches!(self, Freshness::NotNewer | Freshness::DownloadUnstamped)
    }

    pub fn describe(&self) -> String {
        match self {
            Freshness::NoPrevious => "前回の保存分がないため保存します".to_string(),
            Freshness::Newer => "前回より新しいため保存します".to_string(),
            Freshness::NotNewer => "前回より新しくないため保存しません".to_string(),
            Freshness::PreviousUnstamped => "前回分に last_edited がないため保存します".to_string(),
            Freshness::DownloadUnstamped => "ダウンロード分に last_edited がないため保存しません".to_string(),
            Freshness::NeitherStamped => "どちらにも last_edited がないため保存します".to_string(),
            Freshness::PreviousUnreadable(e) => format!("前回分を読めないため保存します ({})", e),
        }
    }
}

/// ダウンロードした品目マスタと前回保存分の比較
pub fn freshness(downloaded: &Value, previous: Option<&Path>) -> Freshness {
    let Some(previous) = previous else {
        return Freshness::NoPrevious;
    };

    let existing: Value = match std::fs::read_to_string(previous)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(value) => value,
        Err(e) => return Freshness::PreviousUnreadable(e),
    };

    let downloaded_at = last_edited_of(downloaded).and_then(parse_timestamp);
    let existing_at = last_edited_of(&existing).and_then(parse_timestamp);

    match (downloaded_at, existing_at) {
        (Some(d), Some(e)) if d > e => Freshness::Newer,
        (Some(_), Some(_)) => Freshness::NotNewer,
        (Some(_), None) => Freshness::PreviousUnstamped,
        (None, Some(_)) => Freshness::DownloadUnstamped,
        (None, None) => Freshness::NeitherStamped,
    }
}

/// 整形JSONで保存
pub fn save_snapshot(dir: &Path, prefix: &str, data: &Value, now: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(snapshot_file_name(prefix, now));
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(&path, content)?;
    Ok(path)
}

/// 品目マスタ側の結果
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub freshness: Freshness,
    pub saved: Option<PathBuf>,
}

/// 品目マスタを判定付きで保存
pub fn save_catalog_if_newer(dir: &Path, data: &Value, now: NaiveDateTime) -> Result<CatalogSnapshot> {
    let previous = latest_snapshot(dir, CATALOG_DATA_PREFIX);
    let freshness = freshness(data, previous.as_deref());
    tracing::debug!(previous = ?previous, decision = ?freshness, "catalog freshness");

    let saved = if freshness.should_save() {
        Some(save_snapshot(dir, CATALOG_DATA_PREFIX, data, now)?)
    } else {
        None
    };
    Ok(CatalogSnapshot { freshness, saved })
}

/// snapshot コマンドの結果（失敗した側はエラーメッセージ）
#[derive(Debug)]
pub struct SnapshotOutcome {
    pub kit: std::result::Result<PathBuf, String>,
    pub catalog: std::result::Result<CatalogSnapshot, String>,
}

/// 両ファイルをダウンロードして保存（片方の失敗でもう片方は止めない）
pub async fn take_snapshot(client: &KitClient, dir: &Path, now: NaiveDateTime) -> Result<SnapshotOutcome> {
    std::fs::create_dir_all(dir)?;

    let kit = match client.download_kit_data().await {
        Ok(data) => save_snapshot(dir, KIT_DATA_PREFIX, &data, now).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(e) = &kit {
        tracing::error!("kit data snapshot failed: {}", e);
    }

    let catalog = match client.download_catalog_data().await {
        Ok(data) => save_catalog_if_newer(dir, &data, now).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(e) = &catalog {
        tracing::error!("catalog snapshot failed: {}", e);
    }

    Ok(SnapshotOutcome { kit, catalog })
}
