//! 投影結果からテーブル表示用モデルへの変換
//!
//! DOMに依存しないので通常の `cargo test` で検証できる。

use chrono::NaiveDate;
pub use first_aid_common::display_category;
use first_aid_common::{
    project, AggregateItem, CatalogEntry, ExpiryStatus, KitItem, Projectable, SortConfig, SortKey,
};

/// テーブル列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    KitId,
    ItemNo,
    Name,
    ExpiryDate,
    Qty,
    Status,
    Category,
    Expiring,
}

impl Column {
    pub fn title(&self) -> &'static str {
        match self {
            Column::KitId => "Kit ID",
            Column::ItemNo => "Item#",
            Column::Name => "Item Name",
            Column::ExpiryDate => "Expiry Date",
            Column::Qty => "Qty",
            Column::Status => "Status",
            Column::Category => "Category",
            Column::Expiring => "Expiring",
        }
    }

    /// ヘッダークリックで並べ替える列のキー（ステータス列は並べ替え不可）
    pub fn sort_key(&self) -> Option<SortKey> {
        match self {
            Column::KitId => Some(SortKey::KitId),
            Column::ItemNo => Some(SortKey::ItemNo),
            Column::Name => Some(SortKey::Name),
            Column::ExpiryDate => Some(SortKey::ExpiryDate),
            Column::Qty => Some(SortKey::Qty),
            Column::Status => None,
            Column::Category => Some(SortKey::Category),
            Column::Expiring => Some(SortKey::Expiring),
        }
    }
}

pub const KIT_COLUMNS: &[Column] = &[
    Column::ItemNo,
    Column::Name,
    Column::ExpiryDate,
    Column::Qty,
    Column::Status,
];

pub const ALL_ITEMS_COLUMNS: &[Column] = &[
    Column::KitId,
    Column::ItemNo,
    Column::Name,
    Column::ExpiryDate,
    Column::Qty,
    Column::Status,
];

pub const CATALOG_COLUMNS: &[Column] = &[
    Column::ItemNo,
    Column::Name,
    Column::Category,
    Column::Expiring,
];

/// セル1つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub class: Option<&'static str>,
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    fn styled(text: impl Into<String>, class: &'static str) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

/// 行1つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 操作対象のキー（キット品目はid、カタログは品名）
    pub key: String,
    pub cells: Vec<Cell>,
    pub qty: Option<u32>,
    pub status: Option<ExpiryStatus>,
}

impl TableRow {
    pub fn is_empty(&self) -> bool {
        self.qty == Some(0)
    }
}

/// カテゴリ1つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSection {
    /// 折りたたみ状態のキー
    pub category: String,
    pub title: String,
    pub has_expiring: bool,
    pub rows: Vec<TableRow>,
}

/// 表示用の行に変換できる品目
pub trait RowSource: Projectable + Clone {
    fn row_key(&self) -> String;

    /// 期限ステータスを持たない品目はNone
    fn status(&self, _today: NaiveDate) -> Option<ExpiryStatus> {
        None
    }
}

impl RowSource for KitItem {
    fn row_key(&self) -> String {
        self.id.clone()
    }

    fn status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(KitItem::status(self, today))
    }
}

impl RowSource for AggregateItem {
    fn row_key(&self) -> String {
        format!("{}/{}", self.kit_id, self.item.id)
    }

    fn status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.item.status(today))
    }
}

impl RowSource for CatalogEntry {
    fn row_key(&self) -> String {
        self.name.clone()
    }
}

fn cell<T: RowSource>(item: &T, column: Column, status: Option<ExpiryStatus>) -> Cell {
    match column {
        Column::KitId => Cell::text(item.kit_id().unwrap_or_default()),
        Column::ItemNo => Cell::text(item.item_no().map(|n| n.to_string()).unwrap_or_default()),
        Column::Name => Cell::text(item.name()),
        Column::ExpiryDate => Cell::text(item.expiry_date().unwrap_or("N/A")),
        // 0は削除せず "Empty" 表示
        Column::Qty => match item.qty() {
            Some(0) => Cell::styled("Empty", "qty-empty"),
            Some(qty) => Cell::text(qty.to_string()),
            None => Cell::text(""),
        },
        Column::Status => match status {
            Some(status) => Cell::styled(status.label(), status.css_class()),
            None => Cell::text(""),
        },
        Column::Category => Cell::text(display_category(item.category().unwrap_or_default())),
        Column::Expiring => Cell::text(if item.expiring() { "Yes" } else { "No" }),
    }
}

pub fn row<T: RowSource>(item: &T, columns: &[Column], today: NaiveDate) -> TableRow {
    let status = item.status(today);
    TableRow {
        key: item.row_key(),
        cells: columns.iter().map(|c| cell(item, *c, status)).collect(),
        qty: item.qty(),
        status,
    }
}

/// 品目一覧を投影し、カテゴリごとのテーブルに変換
pub fn sections<T: RowSource>(
    items: &[T],
    config: &SortConfig,
    columns: &[Column],
    today: NaiveDate,
) -> Vec<TableSection> {
    project(items, config)
        .into_iter()
        .map(|section| TableSection {
            title: display_category(&section.category),
            has_expiring: section.has_expiring(),
            rows: section.items.iter().map(|item| row(item, columns, today)).collect(),
            category: section.category,
        })
        .collect()
}
