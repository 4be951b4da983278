//! ブラウザ上でのみ確認できる処理のテスト（wasm-pack test --headless --chrome）

#![cfg(target_arch = "wasm32")]

use chrono::Datelike;
use first_aid_common::{KitItem, SortConfig};
use first_aid_web::render::{sections, KIT_COLUMNS};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn today_comes_from_browser_clock() {
    let today = first_aid_web::today();
    let js_year = js_sys::Date::new_0().get_full_year() as i32;
    assert_eq!(today.year(), js_year);
}

#[wasm_bindgen_test]
fn render_with_browser_date() {
    let items = vec![KitItem {
        id: "id_1".to_string(),
        name: "Gauze".to_string(),
        item_no: Some(1),
        category: None,
        expiry_date: Some("2000-01-01".to_string()),
        qty: 1,
        expiring: true,
    }];

    let sections = sections(&items, &SortConfig::default(), KIT_COLUMNS, first_aid_web::today());
    assert_eq!(sections[0].title, "Uncategorized");
    assert_eq!(sections[0].rows[0].cells[4].text, "Expired");
}
