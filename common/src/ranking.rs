//! カテゴリの表示順
//!
//! 期限管理対象の品目を含むカテゴリを先に、同順位はカテゴリ名順。

use std::cmp::Ordering;

use crate::collation::locale_cmp;
use crate::grouping::GroupedItems;
use crate::types::Projectable;

/// バケットに期限管理対象の品目があるか
pub fn has_expiring<T: Projectable>(items: &[T]) -> bool {
    items.iter().any(|item| item.expiring())
}

/// 期限管理対象ありが先、次に名前順
pub fn compare_buckets(a: (&str, bool), b: (&str, bool)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| locale_cmp(a.0, b.0))
}

/// 表示順のカテゴリ名（現在のバケット内容から毎回計算）
pub fn rank<T: Projectable>(buckets: &GroupedItems<T>) -> Vec<String> {
    let mut keyed: Vec<(&str, bool)> = buckets
        .iter()
        .map(|(category, items)| (category, has_expiring(items)))
        .collect();

    keyed.sort_by(|a, b| compare_buckets(*a, *b));
    keyed.into_iter().map(|(c, _)| c.to_string()).collect()
}
