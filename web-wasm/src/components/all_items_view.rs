//! 全キット横断の品目一覧（読み取り専用）

use first_aid_common::{AggregateItem, CollapseState, SortConfig};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::item_table::ItemTable;
use crate::render::{self, ALL_ITEMS_COLUMNS};
use crate::today;

#[component]
pub fn AllItemsView<FB>(on_back: FB) -> impl IntoView
where
    FB: Fn(()) + 'static + Clone + Send,
{
    let items = RwSignal::new(Vec::<AggregateItem>::new());
    let load_error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);
    let sort = RwSignal::new(SortConfig::default());
    let collapse = RwSignal::new(CollapseState::default());

    spawn_local(async move {
        match api::load_all_items().await {
            Ok(snapshot) => {
                console::log!(format!("all items: {}", snapshot.items.len()));
                items.set(snapshot.items);
            }
            Err(e) => {
                console::error!(format!("failed to load all items: {}", e));
                load_error.set(Some(e.user_message()));
            }
        }
        loading.set(false);
    });

    let sections = Signal::derive(move || {
        let today = today();
        items.with(|items| {
            sort.with(|config| render::sections(items, config, ALL_ITEMS_COLUMNS, today))
        })
    });

    view! {
        <section class="all-items-view">
            <div class="view-header">
                <h2>"All Items"</h2>
                <button
                    class="btn btn-secondary btn-small"
                    on:click={
                        let on_back = on_back.clone();
                        move |_| on_back(())
                    }
                >
                    "Back"
                </button>
            </div>

            <Show when=move || loading.get()>
                <p class="text-muted">"Loading..."</p>
            </Show>
            {move || load_error.get().map(|message| view! { <p class="error">{message}</p> })}

            <ItemTable
                sections=sections
                columns=ALL_ITEMS_COLUMNS
                sort=sort
                collapse=collapse
            />
        </section>
    }
}
