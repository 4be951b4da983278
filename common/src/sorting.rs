//! カテゴリ内の品目ソート
//!
//! 比較方法はキーごとに異なる:
//! - `expiry_date`: ISO文字列のまま比較。期限なしは昇順・降順とも末尾
//! - `item_no`, `qty`: 数値
//! - `name`, `kit_id`, `category`: ロケール風の文字列比較
//! - `expiring`: No が先
//!
//! 降順は比較結果を反転する。値のない品目は常に末尾。
//! `sort_by` は安定ソートなので同じキーは入力順のまま。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::collation::locale_cmp;
use crate::error::Error;
use crate::grouping::category_of;
use crate::types::Projectable;

/// 並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    ItemNo,
    Name,
    ExpiryDate,
    Qty,
    KitId,
    Category,
    Expiring,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::ItemNo,
        SortKey::Name,
        SortKey::ExpiryDate,
        SortKey::Qty,
        SortKey::KitId,
        SortKey::Category,
        SortKey::Expiring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ItemNo => "item_no",
            SortKey::Name => "name",
            SortKey::ExpiryDate => "expiry_date",
            SortKey::Qty => "qty",
            SortKey::KitId => "kit_id",
            SortKey::Category => "category",
            SortKey::Expiring => "expiring",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    /// snake_case名と品目マスタファイルの列名を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "item_no" | "Item#" => Ok(SortKey::ItemNo),
            "name" | "Item" => Ok(SortKey::Name),
            "expiry_date" => Ok(SortKey::ExpiryDate),
            "qty" => Ok(SortKey::Qty),
            "kit_id" => Ok(SortKey::KitId),
            "category" => Ok(SortKey::Category),
            "expiring" | "Expiring" => Ok(SortKey::Expiring),
            other => Err(Error::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// ビューの並べ替え状態（ビューに入るたびに初期化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new(SortKey::ItemNo)
    }
}

impl SortConfig {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Asc,
        }
    }

    pub fn with_order(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// 列ヘッダークリック: 同じ列なら昇降切替、別の列なら昇順から
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.toggled();
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
        }
    }

    pub fn clicked(mut self, key: SortKey) -> Self {
        self.click(key);
        self
    }

    /// 列ヘッダーの矢印（対象外の列は空文字）
    pub fn indicator(&self, key: SortKey) -> &'static str {
        if self.key == key {
            self.order.arrow()
        } else {
            ""
        }
    }
}

/// 昇降順を適用して比較（値なしは末尾）
fn absent_last<V>(
    a: Option<V>,
    b: Option<V>,
    order: SortOrder,
    cmp: impl FnOnce(V, V) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order.apply(cmp(x, y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// 並べ替え設定で2品目を比較
pub fn compare<T: Projectable>(a: &T, b: &T, config: &SortConfig) -> Ordering {
    let order = config.order;
    match config.key {
        SortKey::ExpiryDate => absent_last(
            present(a.expiry_date()),
            present(b.expiry_date()),
            order,
            |x, y| x.cmp(y),
        ),
        SortKey::ItemNo => absent_last(a.item_no(), b.item_no(), order, |x, y| x.cmp(&y)),
        SortKey::Qty => absent_last(a.qty(), b.qty(), order, |x, y| x.cmp(&y)),
        SortKey::KitId => absent_last(present(a.kit_id()), present(b.kit_id()), order, locale_cmp),
        SortKey::Name => order.apply(locale_cmp(a.name(), b.name())),
        SortKey::Category => order.apply(locale_cmp(category_of(a), category_of(b))),
        SortKey::Expiring => order.apply(a.expiring().cmp(&b.expiring())),
    }
}

/// バケットをその場でソート（安定）
pub fn sort_in_place<T: Projectable>(items: &mut [T], config: &SortConfig) {
    items.sort_by(|a, b| compare(a, b, config));
}

/// ソート済みのコピー（安定）
pub fn sort<T: Projectable + Clone>(items: &[T], config: &SortConfig) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_in_place(&mut sorted, config);
    sorted
}
