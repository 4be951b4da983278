//! カテゴリ別グループ化
//!
//! 品目リストをカテゴリごとのバケットに分ける。バケット内は入力順を保つ。
//! バケット同士の順序は `ranking` で決める。

use std::collections::HashMap;

use crate::types::{Projectable, UNCATEGORIZED};

/// カテゴリ名 → 品目（出現順）
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedItems<T> {
    buckets: HashMap<String, Vec<T>>,
}

impl<T> Default for GroupedItems<T> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }
}

impl<T> GroupedItems<T> {
    pub fn get(&self, category: &str) -> Option<&[T]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    /// バケット数
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 全バケットの品目数
    pub fn item_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_buckets(self) -> HashMap<String, Vec<T>> {
        self.buckets
    }

    fn push(&mut self, category: &str, item: T) {
        match self.buckets.get_mut(category) {
            Some(bucket) => bucket.push(item),
            None => {
                self.buckets.insert(category.to_string(), vec![item]);
            }
        }
    }
}

/// 品目の所属バケット（空カテゴリは "Uncategorized"）
pub fn category_of<T: Projectable>(item: &T) -> &str {
    match item.category() {
        Some(c) if !c.trim().is_empty() => c,
        _ => UNCATEGORIZED,
    }
}

/// 表示用カテゴリ名（`*` 記号を除去）
///
/// バケットのキーには記号を残す（折りたたみ状態のキーも同じ）
pub fn display_category(category: &str) -> String {
    category.replace('*', "").trim().to_string()
}

/// カテゴリでグループ化
pub fn group<T: Projectable + Clone>(items: &[T]) -> GroupedItems<T> {
    let mut grouped = GroupedItems::default();
    for item in items {
        grouped.push(category_of(item), item.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KitItem;

    fn item(id: &str, category: Option<&str>) -> KitItem {
        KitItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            item_no: None,
            category: category.map(str::to_string),
            expiry_date: None,
            qty: 1,
            expiring: false,
        }
    }

    #[test]
    fn test_group_by_category() {
        let items = vec![
            item("1", Some("Wound Care")),
            item("2", Some("Tools")),
            item("3", Some("Wound Care")),
        ];

        let grouped = group(&items);
        assert_eq!(grouped.len(), 2);

        let ids: Vec<_> = grouped.get("Wound Care").unwrap().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(grouped.get("Tools").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_and_blank_category_is_uncategorized() {
        let items = vec![item("1", None), item("2", Some("")), item("3", Some("  "))];

        let grouped = group(&items);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get(UNCATEGORIZED).unwrap().len(), 3);
    }

    #[test]
    fn test_item_count_is_conserved() {
        let categories = [Some("A"), None, Some("B"), Some("A"), Some("C"), None, Some("B")];
        let items: Vec<_> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| item(&i.to_string(), *c))
            .collect();

        let grouped = group(&items);
        assert_eq!(grouped.item_count(), items.len());
        assert_eq!(grouped.iter().map(|(_, b)| b.len()).sum::<usize>(), items.len());
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("*Wound Care*"), "Wound Care");
        assert_eq!(display_category("Tools"), "Tools");
        assert_eq!(display_category(" * "), "");
    }

    #[test]
    fn test_empty_input() {
        let grouped = group::<KitItem>(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.item_count(), 0);
    }
}
