//! カテゴリ別品目テーブルコンポーネント
//!
//! 見出しクリックで並べ替え、カテゴリ行クリックで折りたたみ。
//! 数量変更・削除のコールバックが無ければ読み取り専用で表示する。

use first_aid_common::{CollapseState, SortConfig};
use leptos::prelude::*;

use crate::render::{Column, TableRow, TableSection};

#[component]
pub fn ItemTable(
    #[prop(into)] sections: Signal<Vec<TableSection>>,
    columns: &'static [Column],
    sort: RwSignal<SortConfig>,
    collapse: RwSignal<CollapseState>,
    #[prop(optional)] on_qty: Option<Callback<(String, u32)>>,
    #[prop(optional)] on_remove: Option<Callback<String>>,
) -> impl IntoView {
    let editable = on_qty.is_some() || on_remove.is_some();
    let col_count = columns.len() + usize::from(editable);

    let expand_all = move |_| collapse.update(|c| c.expand_all());
    let collapse_all = move |_| {
        let categories: Vec<String> =
            sections.with(|s| s.iter().map(|section| section.category.clone()).collect());
        collapse.update(|c| c.collapse_all(categories.iter().map(String::as_str)));
    };

    view! {
        <div class="item-table">
            <div class="table-actions">
                <button class="btn btn-secondary btn-small" on:click=expand_all>"Expand All"</button>
                <button class="btn btn-secondary btn-small" on:click=collapse_all>"Collapse All"</button>
            </div>

            <table>
                <thead>
                    <tr>
                        {columns.iter().map(|column| header_cell(*column, sort)).collect_view()}
                        {editable.then(|| view! { <th>"Actions"</th> })}
                    </tr>
                </thead>
                {move || {
                    sections
                        .get()
                        .into_iter()
                        .map(|section| section_body(section, collapse, col_count, on_qty, on_remove))
                        .collect_view()
                }}
            </table>

            <Show when=move || sections.with(Vec::is_empty)>
                <p class="text-muted">"No items found."</p>
            </Show>
        </div>
    }
}

/// 並べ替え可能な列は ▲/▼ 付きの見出しにする
fn header_cell(column: Column, sort: RwSignal<SortConfig>) -> AnyView {
    match column.sort_key() {
        Some(key) => view! {
            <th class="sortable" on:click=move |_| sort.update(|s| s.click(key))>
                {column.title()}
                <span class="sort-indicator">{move || sort.with(|s| s.indicator(key))}</span>
            </th>
        }
        .into_any(),
        None => view! { <th>{column.title()}</th> }.into_any(),
    }
}

fn section_body(
    section: TableSection,
    collapse: RwSignal<CollapseState>,
    col_count: usize,
    on_qty: Option<Callback<(String, u32)>>,
    on_remove: Option<Callback<String>>,
) -> impl IntoView {
    let key = StoredValue::new(section.category);
    let is_collapsed = move || key.with_value(|k| collapse.with(|c| c.is_collapsed(k)));
    let toggle = move |_| {
        key.with_value(|k| {
            collapse.update(|c| {
                c.toggle(k);
            })
        })
    };

    let header_class = if section.has_expiring {
        "category-row has-expiring"
    } else {
        "category-row"
    };
    let count = section.rows.len();
    let rows = section.rows;

    view! {
        <tbody>
            <tr class=header_class on:click=toggle>
                <td colspan=col_count>
                    <span class="collapse-indicator">{move || if is_collapsed() { "▶" } else { "▼" }}</span>
                    {section.title}
                    <span class="category-count">{format!(" ({})", count)}</span>
                </td>
            </tr>
            {move || {
                (!is_collapsed())
                    .then(|| {
                        rows.iter()
                            .cloned()
                            .map(|row| item_row(row, on_qty, on_remove))
                            .collect_view()
                    })
            }}
        </tbody>
    }
}

/// ステッパーの増減（0 と u32::MAX で止まる）
fn increment(qty: u32) -> u32 {
    qty.saturating_add(1)
}

fn decrement(qty: u32) -> u32 {
    qty.saturating_sub(1)
}

fn row_class(row: &TableRow) -> String {
    let mut class = String::from("item-row");
    if let Some(status) = row.status {
        class.push(' ');
        class.push_str(status.css_class());
    }
    if row.is_empty() {
        class.push_str(" row-empty");
    }
    class
}

fn item_row(
    row: TableRow,
    on_qty: Option<Callback<(String, u32)>>,
    on_remove: Option<Callback<String>>,
) -> impl IntoView {
    let class = row_class(&row);
    let editable = on_qty.is_some() || on_remove.is_some();
    let qty = row.qty.unwrap_or(0);
    let key = row.key;

    let cells = row
        .cells
        .into_iter()
        .map(|cell| view! { <td class=cell.class.unwrap_or_default()>{cell.text}</td> })
        .collect_view();

    let stepper = on_qty.map(|on_qty| {
        let dec_key = key.clone();
        let inc_key = key.clone();
        view! {
            <button
                class="btn btn-small"
                title="Decrease quantity"
                disabled={qty == 0}
                on:click=move |_| on_qty.run((dec_key.clone(), decrement(qty)))
            >
                "−"
            </button>
            <button
                class="btn btn-small"
                title="Increase quantity"
                on:click=move |_| on_qty.run((inc_key.clone(), increment(qty)))
            >
                "+"
            </button>
        }
    });

    let remove = on_remove.map(|on_remove| {
        let key = key.clone();
        view! {
            <button class="btn btn-danger btn-small" on:click=move |_| on_remove.run(key.clone())>
                "Remove"
            </button>
        }
    });

    view! {
        <tr class=class>
            {cells}
            {editable.then(|| view! { <td class="actions">{stepper}{remove}</td> })}
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepper_bounds() {
        assert_eq!(increment(1), 2);
        assert_eq!(increment(u32::MAX), u32::MAX);
        assert_eq!(decrement(1), 0);
        assert_eq!(decrement(0), 0);
    }
}
