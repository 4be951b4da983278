//! ビュー投影
//!
//! グループ化 → バケット内ソート → カテゴリ順位付け → 組み立て。
//! キット・全キット・品目マスタの各ビューで共通に使い、入力は品目リストと
//! 並べ替え設定のみ。

use chrono::NaiveDate;
use serde::Serialize;

use crate::grouping::group;
use crate::ranking::{has_expiring, rank};
use crate::sorting::{sort_in_place, SortConfig};
use crate::status::{classify_str, ExpiryStatus};
use crate::types::Projectable;

/// 投影結果のカテゴリ1つ分（品目はソート済み）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySection<T> {
    pub category: String,
    pub items: Vec<T>,
}

impl<T: Projectable> CategorySection<T> {
    pub fn has_expiring(&self) -> bool {
        has_expiring(&self.items)
    }

    /// カテゴリ見出し用のステータス別件数
    pub fn summary(&self, today: NaiveDate) -> StatusSummary {
        StatusSummary::of(&self.items, today)
    }
}

/// 期限ステータス別の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub expired: usize,
    pub expires_soon: usize,
    pub ok: usize,
}

impl StatusSummary {
    pub fn of<T: Projectable>(items: &[T], today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for item in items {
            match classify_str(item.expiry_date(), today) {
                ExpiryStatus::Expired => summary.expired += 1,
                ExpiryStatus::ExpiresSoon => summary.expires_soon += 1,
                ExpiryStatus::Ok => summary.ok += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.expired + self.expires_soon + self.ok
    }

    /// 要対応の品目があるか
    pub fn needs_attention(&self) -> bool {
        self.expired > 0 || self.expires_soon > 0
    }
}

/// 品目リストを順位付き・ソート済みのカテゴリ一覧に投影
pub fn project<T: Projectable + Clone>(items: &[T], config: &SortConfig) -> Vec<CategorySection<T>> {
    let grouped = group(items);
    let order = rank(&grouped);
    let mut buckets = grouped.into_buckets();

    order
        .into_iter()
        .filter_map(|category| {
            let mut items = buckets.remove(&category)?;
            sort_in_place(&mut items, config);
            Some(CategorySection { category, items })
        })
        .collect()
}
