//! 品目の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - KitItem: キットに入っている品目
//! - AggregateItem: 所属キットID付きのKitItem（全キット一覧）
//! - CatalogEntry: 品目マスタの定義（id・数量・期限なし）
//!
//! いずれも [`Projectable`] を実装し、ビュー投影エンジンに渡せる。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::status::{self, ExpiryStatus};
use chrono::NaiveDate;

/// カテゴリなし品目のバケット名
pub const UNCATEGORIZED: &str = "Uncategorized";

/// 投影エンジンが品目から読む項目
///
/// その型が持たない項目は `None`（並べ替えでは末尾）。
pub trait Projectable {
    fn name(&self) -> &str;
    fn category(&self) -> Option<&str>;
    /// 使用期限の管理対象か
    fn expiring(&self) -> bool;
    fn item_no(&self) -> Option<u32>;

    fn expiry_date(&self) -> Option<&str> {
        None
    }

    fn qty(&self) -> Option<u32> {
        None
    }

    fn kit_id(&self) -> Option<&str> {
        None
    }

    /// カテゴリが空のときだけ設定（カテゴリ別レスポンス用）
    fn fill_category(&mut self, category: &str);
}

/// キット内の品目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitItem {
    pub id: String,

    #[serde(alias = "Item")]
    pub name: String,

    #[serde(
        default,
        alias = "Item#",
        deserialize_with = "deserialize_item_no",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_no: Option<u32>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub expiry_date: Option<String>,

    #[serde(default = "default_qty")]
    pub qty: u32,

    #[serde(default, alias = "Expiring", deserialize_with = "deserialize_flag")]
    pub expiring: bool,
}

/// 数量のない旧データは1個扱い
fn default_qty() -> u32 {
    1
}

impl KitItem {
    /// 数量0は "Empty"（削除するまでキットに残る）
    pub fn is_empty(&self) -> bool {
        self.qty == 0
    }

    pub fn status(&self, today: NaiveDate) -> ExpiryStatus {
        status::classify_str(self.expiry_date.as_deref(), today)
    }

    /// 品目マスタの定義からキット品目を作成
    pub fn from_catalog(
        entry: &CatalogEntry,
        id: String,
        expiry_date: Option<String>,
        qty: u32,
    ) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            item_no: entry.item_no,
            category: entry.category.clone(),
            expiry_date,
            qty,
            expiring: entry.expiring,
        }
    }
}

impl Projectable for KitItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn expiring(&self) -> bool {
        self.expiring
    }

    fn item_no(&self) -> Option<u32> {
        self.item_no
    }

    fn expiry_date(&self) -> Option<&str> {
        self.expiry_date.as_deref()
    }

    fn qty(&self) -> Option<u32> {
        Some(self.qty)
    }

    fn fill_category(&mut self, category: &str) {
        if self.category.as_deref().map_or(true, |c| c.trim().is_empty()) {
            self.category = Some(category.to_string());
        }
    }
}

/// 全キット一覧の品目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateItem {
    pub kit_id: String,
    #[serde(flatten)]
    pub item: KitItem,
}

impl Projectable for AggregateItem {
    fn name(&self) -> &str {
        self.item.name()
    }

    fn category(&self) -> Option<&str> {
        self.item.category()
    }

    fn expiring(&self) -> bool {
        self.item.expiring()
    }

    fn item_no(&self) -> Option<u32> {
        self.item.item_no()
    }

    fn expiry_date(&self) -> Option<&str> {
        self.item.expiry_date()
    }

    fn qty(&self) -> Option<u32> {
        self.item.qty()
    }

    fn kit_id(&self) -> Option<&str> {
        Some(&self.kit_id)
    }

    fn fill_category(&mut self, category: &str) {
        self.item.fill_category(category);
    }
}

/// 品目マスタの定義
///
/// JSONのキー名は品目マスタファイルに合わせる（`Item#`, `Item`, `Expiring`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(
        rename = "Item#",
        alias = "item_no",
        default,
        deserialize_with = "deserialize_item_no",
        serialize_with = "serialize_item_no"
    )]
    pub item_no: Option<u32>,

    #[serde(rename = "Item", alias = "name")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub category: Option<String>,

    #[serde(
        rename = "Expiring",
        alias = "expiring",
        default,
        deserialize_with = "deserialize_flag",
        serialize_with = "serialize_yes_no"
    )]
    pub expiring: bool,
}

impl Projectable for CatalogEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn expiring(&self) -> bool {
        self.expiring
    }

    fn item_no(&self) -> Option<u32> {
        self.item_no
    }

    fn fill_category(&mut self, category: &str) {
        if self.category.as_deref().map_or(true, |c| c.trim().is_empty()) {
            self.category = Some(category.to_string());
        }
    }
}

/// 品名で品目マスタを検索（前後空白・大文字小文字を無視）
pub fn find_catalog_entry<'a>(entries: &'a [CatalogEntry], name: &str) -> Option<&'a CatalogEntry> {
    let wanted = name.trim().to_lowercase();
    entries
        .iter()
        .find(|e| e.name.trim().to_lowercase() == wanted)
}

/// カテゴリ選択肢（重複なし・ソート済み）
pub fn distinct_categories(entries: &[CatalogEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// クライアント側で採番する品目ID（`id_<UNIXミリ秒>`）
pub fn new_item_id(unix_millis: i64) -> String {
    format!("id_{}", unix_millis)
}

/// 品番の読み取り（先頭の数字のみ）
///
/// `"12"`, `" 12 "`, `"12a"` は12、`""` と `"a12"` は `None`
pub fn parse_item_no(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    digits.parse().ok()
}

/// Yes/No形式のフラグ
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn deserialize_item_no<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => parse_item_no(&s),
        _ => None,
    })
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => parse_flag(&s),
        Some(Value::Number(n)) => n.as_i64().map_or(false, |n| n != 0),
        _ => false,
    })
}

fn serialize_item_no<S>(value: &Option<u32>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(n) => serializer.serialize_str(&n.to_string()),
        None => serializer.serialize_str(""),
    }
}

fn serialize_yes_no<S>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}
