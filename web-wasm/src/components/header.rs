//! ヘッダーコンポーネント

use first_aid_common::Route;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"First-Aid Kit Tracker"</h1>
            <nav class="header-nav">
                <a href=Route::KitSelection.path()>"Kit Selection"</a>
                <a href=Route::Catalog.path()>"Edit Items"</a>
            </nav>
        </header>
    }
}
