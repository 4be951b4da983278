//! フォーム入力の検証
//!
//! 入力値をリクエスト本文に変換する。エラー時は送信せず、呼び出し側が
//! メッセージを表示して入力はそのまま残す。

use crate::error::ValidationError;
use crate::status::parse_date;
use crate::types::{find_catalog_entry, parse_flag, CatalogEntry, KitItem};

type Result<T> = std::result::Result<T, ValidationError>;

/// キット選択画面で入力されたキットコード
pub fn validate_kit_id(raw: &str) -> Result<String> {
    let kit_id = raw.trim();
    if kit_id.is_empty() {
        return Err(ValidationError::MissingKitId);
    }
    Ok(kit_id.to_string())
}

/// 新規品目の数量（1以上の整数）
pub fn parse_new_quantity(raw: &str) -> Result<u32> {
    let qty = parse_quantity_update(raw).map_err(|e| match e {
        ValidationError::NegativeQuantity(_) => ValidationError::NonPositiveQuantity,
        other => other,
    })?;
    if qty == 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(qty)
}

/// 既存品目の数量（0は "Empty" として可）
pub fn parse_quantity_update(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingQuantity);
    }
    match raw.parse::<i64>() {
        Ok(n) if n < 0 => Err(ValidationError::NegativeQuantity(raw.to_string())),
        Ok(n) => u32::try_from(n).map_err(|_| ValidationError::InvalidQuantity(raw.to_string())),
        Err(_) => Err(ValidationError::InvalidQuantity(raw.to_string())),
    }
}

/// 期限日を `YYYY-MM-DD` に正規化（空欄はなし）
fn parse_expiry(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(|d| Some(d.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| ValidationError::InvalidExpiryDate(raw.to_string()))
}

/// キット画面の品目追加フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItemForm {
    pub name: String,
    pub expiry_date: String,
    pub qty: String,
}

impl NewItemForm {
    /// 送信する品目を作成
    ///
    /// 品目マスタにある品名は品番・カテゴリ・期限管理フラグをマスタから取る。
    /// マスタにない品名は期限管理対象として扱うので期限日が必要。
    pub fn validate(&self, catalog: &[CatalogEntry], id: String) -> Result<KitItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let expiry_date = parse_expiry(&self.expiry_date)?;
        let qty = parse_new_quantity(&self.qty)?;

        let item = match find_catalog_entry(catalog, name) {
            Some(entry) => KitItem::from_catalog(entry, id, expiry_date, qty),
            None => KitItem {
                id,
                name: name.to_string(),
                item_no: None,
                category: None,
                expiry_date,
                qty,
                expiring: true,
            },
        };

        if item.expiring && item.expiry_date.is_none() {
            return Err(ValidationError::MissingExpiryDate(item.name));
        }

        Ok(item)
    }
}

/// 品目マスタ画面の追加フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCatalogEntryForm {
    pub item_no: String,
    pub name: String,
    pub category: String,
    /// "Yes" / "No"
    pub expiring: String,
}

impl NewCatalogEntryForm {
    /// 空のフォーム（期限管理は "Yes" を選択済み）
    pub fn blank() -> Self {
        Self {
            expiring: "Yes".to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<CatalogEntry> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        let item_no = match self.item_no.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| ValidationError::InvalidItemNo(raw.to_string()))?,
            ),
        };

        Ok(CatalogEntry {
            item_no,
            name: name.to_string(),
            category: Some(category.to_string()),
            expiring: parse_flag(&self.expiring),
        })
    }
}
