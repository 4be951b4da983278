//! キット画面コンポーネント
//!
//! 品目一覧の表示と、追加・数量変更・削除。変更が成功するたびに再読込する。

use first_aid_common::types::new_item_id;
use first_aid_common::{
    CatalogEntry, CollapseState, KitItem, NewItemForm, SortConfig, StatusSummary,
};
use gloo::{console, dialogs};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::item_table::ItemTable;
use crate::components::report_error;
use crate::render::{self, KIT_COLUMNS};
use crate::today;

#[component]
pub fn KitView(kit_id: String) -> impl IntoView {
    let title = format!("Kit {}", kit_id);
    let kit_id = StoredValue::new(kit_id);

    let items = RwSignal::new(Vec::<KitItem>::new());
    let last_edited = RwSignal::new(None::<String>);
    let catalog = RwSignal::new(Vec::<CatalogEntry>::new());
    let load_error = RwSignal::new(None::<String>);

    // 画面ごとの表示状態（画面に入るたびに初期化）
    let sort = RwSignal::new(SortConfig::default());
    let collapse = RwSignal::new(CollapseState::default());

    let reload = move || {
        spawn_local(async move {
            let kit = kit_id.get_value();
            match api::load_kit(&kit).await {
                Ok(snapshot) => {
                    console::log!(format!("kit {}: {} items", kit, snapshot.items.len()));
                    items.set(snapshot.items);
                    last_edited.set(snapshot.last_edited);
                    load_error.set(None);
                }
                Err(e) => {
                    console::error!(format!("failed to load kit {}: {}", kit, e));
                    load_error.set(Some(e.user_message()));
                }
            }
        });
    };

    reload();
    spawn_local(async move {
        match api::load_catalog().await {
            Ok(snapshot) => catalog.set(snapshot.items),
            // 候補が出ないだけなので画面は続行
            Err(e) => console::warn!(format!("catalog unavailable: {}", e)),
        }
    });

    let sections = Signal::derive(move || {
        let today = today();
        items.with(|items| sort.with(|config| render::sections(items, config, KIT_COLUMNS, today)))
    });

    let on_qty = Callback::new(move |(item_id, qty): (String, u32)| {
        spawn_local(async move {
            match api::update_quantity(&kit_id.get_value(), &item_id, qty).await {
                Ok(()) => reload(),
                Err(e) => report_error("update quantity", &e),
            }
        });
    });

    let on_remove = Callback::new(move |item_id: String| {
        if !dialogs::confirm("Are you sure you want to remove this item?") {
            return;
        }
        spawn_local(async move {
            match api::remove_item(&kit_id.get_value(), &item_id).await {
                Ok(()) => reload(),
                Err(e) => report_error("remove item", &e),
            }
        });
    });

    // 追加フォーム
    let (name, set_name) = signal(String::new());
    let (expiry_date, set_expiry_date) = signal(String::new());
    let (qty, set_qty) = signal("1".to_string());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = NewItemForm {
            name: name.get(),
            expiry_date: expiry_date.get(),
            qty: qty.get(),
        };
        let id = new_item_id(chrono::Utc::now().timestamp_millis());
        let item = match catalog.with(|c| form.validate(c, id)) {
            Ok(item) => item,
            Err(e) => {
                dialogs::alert(&e.to_string());
                return;
            }
        };

        spawn_local(async move {
            match api::add_item(&kit_id.get_value(), &item).await {
                Ok(()) => {
                    console::log!(format!("added {} ({})", item.name, item.id));
                    set_name.set(String::new());
                    set_expiry_date.set(String::new());
                    set_qty.set("1".to_string());
                    reload();
                }
                Err(e) => report_error("add item", &e),
            }
        });
    };

    let attention = move || {
        let summary = items.with(|items| StatusSummary::of(items, today()));
        summary.needs_attention().then(|| {
            view! {
                <p class="attention">
                    {format!(
                        "{} expired, {} expiring within 30 days",
                        summary.expired, summary.expires_soon
                    )}
                </p>
            }
        })
    };

    view! {
        <section class="kit-view">
            <h2>{title}</h2>
            {move || last_edited.get().map(|stamp| view! { <p class="last-edited">"Last edited: " {stamp}</p> })}
            {move || load_error.get().map(|message| view! { <p class="error">{message}</p> })}
            {attention}

            <ItemTable
                sections=sections
                columns=KIT_COLUMNS
                sort=sort
                collapse=collapse
                on_qty=on_qty
                on_remove=on_remove
            />

            <form class="add-item-form" on:submit=on_submit>
                <h3>"Add Item"</h3>
                <div class="form-group">
                    <label for="item-name">"Item Name"</label>
                    <input
                        type="text"
                        id="item-name"
                        list="catalog-names"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <datalist id="catalog-names">
                        {move || {
                            catalog.with(|entries| {
                                entries
                                    .iter()
                                    .map(|entry| view! { <option value=entry.name.clone() /> })
                                    .collect_view()
                            })
                        }}
                    </datalist>
                </div>
                <div class="form-group">
                    <label for="item-expiry">"Expiry Date"</label>
                    <input
                        type="date"
                        id="item-expiry"
                        prop:value=move || expiry_date.get()
                        on:input=move |ev| set_expiry_date.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="item-qty">"Qty"</label>
                    <input
                        type="number"
                        id="item-qty"
                        min="1"
                        prop:value=move || qty.get()
                        on:input=move |ev| set_qty.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Add"</button>
            </form>
        </section>
    }
}
