//! ターミナル向けの表形式レポート
//!
//! ブラウザ版と同じ投影（グループ化 → 並べ替え → カテゴリ順位付け）を
//! 固定幅のテキスト表にする。

use chrono::NaiveDate;
use first_aid_common::{
    display_category, project, AggregateItem, CatalogEntry, ExpiryStatus, KitItem, Projectable, SortConfig, SortKey,
    StatusSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    KitId,
    ItemNo,
    Name,
    ExpiryDate,
    Qty,
    Status,
    Category,
    Expiring,
    Id,
}

impl ReportColumn {
    pub fn title(&self) -> &'static str {
        match self {
            ReportColumn::KitId => "Kit ID",
            ReportColumn::ItemNo => "Item#",
            ReportColumn::Name => "Item Name",
            ReportColumn::ExpiryDate => "Expiry Date",
            ReportColumn::Qty => "Qty",
            ReportColumn::Status => "Status",
            ReportColumn::Category => "Category",
            ReportColumn::Expiring => "Expiring",
            ReportColumn::Id => "ID",
        }
    }

    fn sort_key(&self) -> Option<SortKey> {
        match self {
            ReportColumn::KitId => Some(SortKey::KitId),
            ReportColumn::ItemNo => Some(SortKey::ItemNo),
            ReportColumn::Name => Some(SortKey::Name),
            ReportColumn::ExpiryDate => Some(SortKey::ExpiryDate),
            ReportColumn::Qty => Some(SortKey::Qty),
            ReportColumn::Category => Some(SortKey::Category),
            ReportColumn::Expiring => Some(SortKey::Expiring),
            ReportColumn::Status | ReportColumn::Id => None,
        }
    }
}

/// キット表示（IDは set-qty / remove で指定するため表示する）
pub const KIT_COLUMNS: &[ReportColumn] = &[
    ReportColumn::ItemNo,
    ReportColumn::Name,
    ReportColumn::ExpiryDate,
    ReportColumn::Qty,
    ReportColumn::Status,
    ReportColumn::Id,
];

pub const ALL_ITEMS_COLUMNS: &[ReportColumn] = &[
    ReportColumn::KitId,
    ReportColumn::ItemNo,
    ReportColumn::Name,
    ReportColumn::ExpiryDate,
    ReportColumn::Qty,
    ReportColumn::Status,
];

pub const CATALOG_COLUMNS: &[ReportColumn] = &[
    ReportColumn::ItemNo,
    ReportColumn::Name,
    ReportColumn::Category,
    ReportColumn::Expiring,
];

/// レポートに出せる品目
pub trait ReportRow: Projectable + Clone {
    fn id(&self) -> Option<&str> {
        None
    }

    fn status(&self, _today: NaiveDate) -> Option<ExpiryStatus> {
        None
    }
}

impl ReportRow for KitItem {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(KitItem::status(self, today))
    }
}

impl ReportRow for AggregateItem {
    fn id(&self) -> Option<&str> {
        Some(&self.item.id)
    }

    fn status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.item.status(today))
    }
}

impl ReportRow for CatalogEntry {}

fn cell<T: ReportRow>(item: &T, column: ReportColumn, today: NaiveDate) -> String {
    match column {
        ReportColumn::KitId => item.kit_id().unwrap_or_default().to_string(),
        ReportColumn::ItemNo => item.item_no().map(|n| n.to_string()).unwrap_or_default(),
        ReportColumn::Name => item.name().to_string(),
        ReportColumn::ExpiryDate => item.expiry_date().unwrap_or("N/A").to_string(),
        ReportColumn::Qty => match item.qty() {
            Some(0) => "Empty".to_string(),
            Some(qty) => qty.to_string(),
            None => String::new(),
        },
        ReportColumn::Status => item
            .status(today)
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
        ReportColumn::Category => display_category(item.category().unwrap_or_default()),
        ReportColumn::Expiring => (if item.expiring() { "Yes" } else { "No" }).to_string(),
        ReportColumn::Id => item.id().unwrap_or_default().to_string(),
    }
}

fn header(column: ReportColumn, config: &SortConfig) -> String {
    match column.sort_key() {
        Some(key) if key == config.key => format!("{} {}", column.title(), config.indicator(key)),
        _ => column.title().to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// 投影結果をテキスト表にする
pub fn render<T: ReportRow>(
    items: &[T],
    config: &SortConfig,
    columns: &[ReportColumn],
    today: NaiveDate,
) -> String {
    let sections = project(items, config);
    if sections.is_empty() {
        return "品目がありません\n".to_string();
    }

    let headers: Vec<String> = columns.iter().map(|c| header(*c, config)).collect();
    let rows: Vec<Vec<Vec<String>>> = sections
        .iter()
        .map(|section| {
            section
                .items
                .iter()
                .map(|item| columns.iter().map(|c| cell(item, *c, today)).collect())
                .collect()
        })
        .collect();

    // 全カテゴリで列幅を揃える
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter().flatten() {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| pad(text, *width))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    for (section, section_rows) in sections.iter().zip(&rows) {
        let marker = if section.has_expiring() { "" } else { " (no expiring items)" };
        out.push_str(&format!(
            "== {} ({}){} ==\n",
            display_category(&section.category),
            section.items.len(),
            marker
        ));
        out.push_str(&format_line(&headers));
        out.push('\n');
        for row in section_rows {
            out.push_str(&format_line(row));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// 期限状況の集計行
pub fn summary_line<T: Projectable>(items: &[T], today: NaiveDate) -> String {
    let summary = StatusSummary::of(items, today);
    format!(
        "合計 {}件（期限切れ {} / 期限間近 {} / OK {}）",
        summary.total(),
        summary.expired,
        summary.expires_soon,
        summary.ok
    )
}
