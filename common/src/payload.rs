//! バックエンドレスポンスの正規化
//!
//! 品目エンドポイントのレスポンス形式は一定でない:
//! - 品目の配列
//! - `{ "items": [...], "last_edited": "..." }`
//! - `{ "items": { "<category>": [...] }, "last_edited": "..." }`
//! - `{ "<category>": [...] }` のマップ
//!
//! 全キット一覧（とキットデータファイル）はキットIDをキーにしたマップの場合がある。
//! ここでは平坦なリストにするだけで、グループ化は投影エンジンでやり直す。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{AggregateItem, KitItem, Projectable};

/// 品目リストと最終更新日時（あれば）
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub last_edited: Option<String>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_edited: None,
        }
    }
}

/// `PUT /api/kits/{kit}/{item}` の本文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub qty: u32,
}

/// キット・品目マスタのレスポンス（マップのキーはカテゴリ）
pub fn parse_items<T>(body: &str) -> Result<Snapshot<T>>
where
    T: DeserializeOwned + Projectable,
{
    let value: Value = serde_json::from_str(body)?;
    let (items, last_edited) = unwrap_envelope(value);

    let items = match items {
        Value::Null => Vec::new(),
        Value::Array(_) => serde_json::from_value(items)?,
        Value::Object(map) => flatten_categories(map)?,
        other => return Err(unexpected_shape(&other)),
    };

    Ok(Snapshot { items, last_edited })
}

/// 全キット一覧のレスポンス（マップのキーはキットID）
pub fn parse_aggregate(body: &str) -> Result<Snapshot<AggregateItem>> {
    let value: Value = serde_json::from_str(body)?;
    let (items, last_edited) = unwrap_envelope(value);

    let items = match items {
        Value::Null => Vec::new(),
        Value::Array(_) => serde_json::from_value(items)?,
        Value::Object(map) => flatten_kits(map)?,
        other => return Err(unexpected_shape(&other)),
    };

    Ok(Snapshot { items, last_edited })
}

/// エラー本文（`{"detail": ...}`）からメッセージを取り出す
///
/// 入力検証エラーは `{ "msg": ... }` の配列なので連結する。
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// 2xx以外のレスポンスのエラー（`detail` があれば本文より優先）
pub fn status_error(status: u16, body: &str) -> Error {
    let detail = error_detail(body).unwrap_or_else(|| body.trim().to_string());
    Error::Status { status, detail }
}

/// データファイルの `last_edited`
pub fn last_edited_of(value: &Value) -> Option<&str> {
    value.get("last_edited").and_then(Value::as_str)
}

fn unwrap_envelope(value: Value) -> (Value, Option<String>) {
    match value {
        Value::Object(mut map) if map.contains_key("items") => {
            let last_edited = map
                .remove("last_edited")
                .and_then(|v| v.as_str().map(str::to_string));
            let items = map.remove("items").unwrap_or(Value::Null);
            (items, last_edited)
        }
        Value::Object(mut map) => {
            // キットデータファイルはキット一覧と同じ階層に last_edited を持つ
            // 文字列以外（null など）でもバケットとしては扱わない
            let last_edited = map
                .remove("last_edited")
                .and_then(|v| v.as_str().map(str::to_string));
            (Value::Object(map), last_edited)
        }
        other => (other, None),
    }
}

fn flatten_categories<T>(map: Map<String, Value>) -> Result<Vec<T>>
where
    T: DeserializeOwned + Projectable,
{
    let mut items = Vec::new();
    for (category, bucket) in map {
        let mut bucket: Vec<T> = serde_json::from_value(bucket).map_err(|e| {
            Error::Malformed(format!("category '{}': {}", category, e))
        })?;
        for item in &mut bucket {
            item.fill_category(&category);
        }
        items.extend(bucket);
    }
    Ok(items)
}

fn flatten_kits(map: Map<String, Value>) -> Result<Vec<AggregateItem>> {
    let mut items = Vec::new();
    for (kit_id, bucket) in map {
        let bucket: Vec<KitItem> = serde_json::from_value(bucket)
            .map_err(|e| Error::Malformed(format!("kit '{}': {}", kit_id, e)))?;
        items.extend(bucket.into_iter().map(|item| AggregateItem {
            kit_id: kit_id.clone(),
            item,
        }));
    }
    Ok(items)
}

fn unexpected_shape(value: &Value) -> Error {
    let kind = match value {
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        _ => "an unsupported value",
    };
    Error::Malformed(format!("expected an item list or map, got {}", kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogEntry;

    #[test]
    fn test_bare_list() {
        let body = r#"[{"id": "1", "name": "Gauze", "expiry_date": "2026-01-01"}]"#;
        let snapshot: Snapshot<KitItem> = parse_items(body).unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.last_edited, None);
    }

    #[test]
    fn test_envelope_with_flat_list() {
        let body = r#"{
            "items": [{"Item#": "1", "Item": "Gauze", "category": "Wound Care", "Expiring": "Yes"}],
            "last_edited": "2025-05-01T10:00:00"
        }"#;
        let snapshot: Snapshot<CatalogEntry> = parse_items(body).unwrap();

        assert_eq!(snapshot.items[0].name, "Gauze");
        assert_eq!(snapshot.last_edited.as_deref(), Some("2025-05-01T10:00:00"));
    }

    #[test]
    fn test_envelope_with_category_map() {
        let body = r#"{
            "items": {
                "Tools": [{"id": "2", "name": "Scissors"}],
                "Wound Care": [{"id": "1", "name": "Gauze", "category": "Dressings"}]
            },
            "last_edited": null
        }"#;
        let snapshot: Snapshot<KitItem> = parse_items(body).unwrap();

        assert_eq!(snapshot.items.len(), 2);
        let scissors = snapshot.items.iter().find(|i| i.name == "Scissors").unwrap();
        assert_eq!(scissors.category.as_deref(), Some("Tools"));
        // 品目自身のカテゴリがマップのキーより優先
        let gauze = snapshot.items.iter().find(|i| i.name == "Gauze").unwrap();
        assert_eq!(gauze.category.as_deref(), Some("Dressings"));
        assert_eq!(snapshot.last_edited, None);
    }

    #[test]
    fn test_bare_category_map() {
        let body = r#"{"Tools": [{"id": "2", "name": "Scissors"}]}"#;
        let snapshot: Snapshot<KitItem> = parse_items(body).unwrap();
        assert_eq!(snapshot.items[0].category.as_deref(), Some("Tools"));
    }

    #[test]
    fn test_null_and_empty() {
        let snapshot: Snapshot<KitItem> = parse_items("[]").unwrap();
        assert!(snapshot.items.is_empty());

        let snapshot: Snapshot<KitItem> = parse_items(r#"{"items": null}"#).unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_malformed() {
        let result: Result<Snapshot<KitItem>> = parse_items(r#""oops""#);
        assert!(matches!(result, Err(Error::Malformed(_))));

        let result: Result<Snapshot<KitItem>> = parse_items(r#"{"Tools": 3}"#);
        assert!(matches!(result, Err(Error::Malformed(_))));

        let result: Result<Snapshot<KitItem>> = parse_items("{");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_aggregate_flat_list() {
        let body = r#"[
            {"kit_id": "A1", "id": "1", "name": "Gauze"},
            {"kit_id": "B2", "id": "2", "name": "Tape"}
        ]"#;
        let snapshot = parse_aggregate(body).unwrap();
        let kits: Vec<_> = snapshot.items.iter().map(|i| i.kit_id.as_str()).collect();
        assert_eq!(kits, vec!["A1", "B2"]);
    }

    #[test]
    fn test_aggregate_keyed_by_kit() {
        let body = r#"{
            "A1": [{"id": "1", "name": "Gauze"}, {"id": "2", "name": "Tape"}],
            "B2": [{"id": "3", "name": "Splint"}],
            "last_edited": "2025-05-01T10:00:00"
        }"#;
        let snapshot = parse_aggregate(body).unwrap();

        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items.iter().filter(|i| i.kit_id == "A1").count(), 2);
        assert_eq!(snapshot.last_edited.as_deref(), Some("2025-05-01T10:00:00"));
    }

    #[test]
    fn test_map_with_null_last_edited() {
        let body = r#"{"A1": [{"id": "1", "name": "Gauze"}], "last_edited": null}"#;
        let snapshot = parse_aggregate(body).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].kit_id, "A1");
        assert_eq!(snapshot.last_edited, None);

        let body = r#"{"Tools": [{"id": "2", "name": "Scissors"}], "last_edited": 20250501}"#;
        let snapshot: Snapshot<KitItem> = parse_items(body).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].category.as_deref(), Some("Tools"));
        assert_eq!(snapshot.last_edited, None);
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "Kit not found"}"#).as_deref(),
            Some("Kit not found")
        );
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}, {"msg": "bad date"}]}"#).as_deref(),
            Some("field required; bad date")
        );
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"message": "x"}"#), None);
    }

    #[test]
    fn test_status_error() {
        let error = status_error(404, r#"{"detail": "Kit not found"}"#);
        assert_eq!(error.user_message(), "Kit not found");

        let error = status_error(502, " Bad Gateway\n");
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_quantity_update_body() {
        let body = serde_json::to_string(&QuantityUpdate { qty: 0 }).unwrap();
        assert_eq!(body, r#"{"qty":0}"#);
    }
}
