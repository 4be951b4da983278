//! First-Aid Kit Tracker Web App (Leptos + WASM)

mod app;
mod components;
pub mod api;
pub mod render;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

/// ブラウザの現地日付（期限判定の基準日）
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    gloo::console::log!("first-aid tracker starting");
    leptos::mount::mount_to_body(app::App);
}
