//! キット選択コンポーネント

use first_aid_common::validation::validate_kit_id;
use first_aid_common::Route;
use gloo::dialogs;
use leptos::prelude::*;

use crate::app::navigate;

#[component]
pub fn KitSelector<FA>(on_view_all: FA) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send,
{
    let (kit_code, set_kit_code) = signal(String::new());

    // キットコードを検証して /kit/{id} へ遷移
    let open_kit = move || match validate_kit_id(&kit_code.get()) {
        Ok(kit_id) => navigate(&Route::Kit(kit_id)),
        Err(e) => dialogs::alert(&e.to_string()),
    };

    view! {
        <section class="kit-selection">
            <h2>"Select a Kit"</h2>

            <div class="form-group">
                <label for="kit-code">"Kit Box Code"</label>
                <input
                    type="text"
                    id="kit-code"
                    placeholder="Enter Kit Box Code..."
                    prop:value=move || kit_code.get()
                    on:input=move |ev| set_kit_code.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            open_kit();
                        }
                    }
                />
                <button class="btn btn-primary" on:click=move |_| open_kit()>
                    "Open Kit"
                </button>
            </div>

            <div class="kit-actions">
                <button
                    class="btn btn-secondary"
                    on:click={
                        let on_view_all = on_view_all.clone();
                        move |_| on_view_all(())
                    }
                >
                    "View All Items"
                </button>
                <a class="btn btn-tertiary" href=Route::Catalog.path()>
                    "Edit Items"
                </a>
            </div>
        </section>
    }
}
