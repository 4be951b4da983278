//! メインアプリケーションコンポーネント

use first_aid_common::Route;
use gloo::console;
use leptos::prelude::*;

use crate::components::{
    all_items_view::AllItemsView, catalog_view::CatalogView, header::Header,
    kit_selector::KitSelector, kit_view::KitView,
};

/// 表示中の画面
///
/// 全品目一覧だけはURLを持たず、キット選択画面から切り替える
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    KitSelection,
    AllItems,
    Kit(String),
    Catalog,
}

impl From<Route> for Page {
    fn from(route: Route) -> Self {
        match route {
            Route::KitSelection => Page::KitSelection,
            Route::Kit(kit_id) => Page::Kit(kit_id),
            Route::Catalog => Page::Catalog,
        }
    }
}

/// 現在のURLパスから画面を決める
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Route::parse(&path))
        .unwrap_or(Route::KitSelection)
}

/// ページ遷移（サーバー側のルーティングに任せる）
pub fn navigate(route: &Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(&route.path()) {
        console::error!(format!("navigation to {} failed: {:?}", route.path(), e));
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let page = RwSignal::new(Page::from(current_route()));

    view! {
        <div class="container">
            <Header />

            {move || match page.get() {
                Page::KitSelection => view! {
                    <KitSelector on_view_all=move |_| page.set(Page::AllItems) />
                }
                .into_any(),
                Page::AllItems => view! {
                    <AllItemsView on_back=move |_| page.set(Page::KitSelection) />
                }
                .into_any(),
                Page::Kit(kit_id) => view! { <KitView kit_id=kit_id /> }.into_any(),
                Page::Catalog => view! { <CatalogView /> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_route() {
        assert_eq!(Page::from(Route::parse("/")), Page::KitSelection);
        assert_eq!(Page::from(Route::parse("/kit/A1")), Page::Kit("A1".to_string()));
        assert_eq!(Page::from(Route::parse("/edit_items")), Page::Catalog);
    }
}
