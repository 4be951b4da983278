//! 品目マスタ編集画面

use first_aid_common::types::distinct_categories;
use first_aid_common::{CatalogEntry, CollapseState, NewCatalogEntryForm, SortConfig};
use gloo::{console, dialogs};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::item_table::ItemTable;
use crate::components::report_error;
use crate::render::{self, display_category, CATALOG_COLUMNS};
use crate::today;

#[component]
pub fn CatalogView() -> impl IntoView {
    let entries = RwSignal::new(Vec::<CatalogEntry>::new());
    let last_edited = RwSignal::new(None::<String>);
    let load_error = RwSignal::new(None::<String>);
    let sort = RwSignal::new(SortConfig::default());
    let collapse = RwSignal::new(CollapseState::default());

    let reload = move || {
        spawn_local(async move {
            match api::load_catalog().await {
                Ok(snapshot) => {
                    console::log!(format!("catalog: {} entries", snapshot.items.len()));
                    entries.set(snapshot.items);
                    last_edited.set(snapshot.last_edited);
                    load_error.set(None);
                }
                Err(e) => {
                    console::error!(format!("failed to load catalog: {}", e));
                    load_error.set(Some(e.user_message()));
                }
            }
        });
    };
    reload();

    let sections = Signal::derive(move || {
        let today = today();
        entries.with(|entries| {
            sort.with(|config| render::sections(entries, config, CATALOG_COLUMNS, today))
        })
    });

    let on_remove = Callback::new(move |name: String| {
        if !dialogs::confirm(&format!("Are you sure you want to delete \"{}\"?", name)) {
            return;
        }
        spawn_local(async move {
            match api::remove_catalog_entry(&name).await {
                Ok(()) => reload(),
                Err(e) => report_error("delete item", &e),
            }
        });
    });

    // 追加フォーム
    let form = RwSignal::new(NewCatalogEntryForm::blank());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let entry = match form.with(NewCatalogEntryForm::validate) {
            Ok(entry) => entry,
            Err(e) => {
                dialogs::alert(&e.to_string());
                return;
            }
        };

        spawn_local(async move {
            match api::add_catalog_entry(&entry).await {
                Ok(()) => {
                    console::log!(format!("catalog entry added: {}", entry.name));
                    form.set(NewCatalogEntryForm::blank());
                    reload();
                }
                Err(e) => report_error("add item", &e),
            }
        });
    };

    let categories = Memo::new(move |_| entries.with(|entries| distinct_categories(entries)));

    view! {
        <section class="catalog-view">
            <h2>"Edit First-Aid Items"</h2>
            {move || last_edited.get().map(|stamp| view! { <p class="last-edited">"Last edited: " {stamp}</p> })}
            {move || load_error.get().map(|message| view! { <p class="error">{message}</p> })}

            <ItemTable
                sections=sections
                columns=CATALOG_COLUMNS
                sort=sort
                collapse=collapse
                on_remove=on_remove
            />

            <form class="add-item-form" on:submit=on_submit>
                <h3>"Add Item"</h3>
                <div class="form-group">
                    <label for="catalog-item-no">"Item#"</label>
                    <input
                        type="number"
                        id="catalog-item-no"
                        min="1"
                        prop:value=move || form.with(|f| f.item_no.clone())
                        on:input=move |ev| form.update(|f| f.item_no = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="catalog-name">"Item Name"</label>
                    <input
                        type="text"
                        id="catalog-name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="catalog-category">"Category"</label>
                    <select
                        id="catalog-category"
                        prop:value=move || form.with(|f| f.category.clone())
                        on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    >
                        <option value="">"Select a category"</option>
                        {move || {
                            categories
                                .get()
                                .into_iter()
                                .map(|c| {
                                    let label = display_category(&c);
                                    view! { <option value=c>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form-group">
                    <label for="catalog-expiring">"Expiring"</label>
                    <select
                        id="catalog-expiring"
                        prop:value=move || form.with(|f| f.expiring.clone())
                        on:change=move |ev| form.update(|f| f.expiring = event_target_value(&ev))
                    >
                        <option value="Yes">"Yes"</option>
                        <option value="No">"No"</option>
                    </select>
                </div>
                <button type="submit" class="btn btn-primary">"Add"</button>
            </form>
        </section>
    }
}
