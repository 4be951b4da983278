//! バックエンドREST API連携
//!
//! 同一オリジンの相対パスへ fetch する。レスポンス本文はテキストで受け取り、
//! 形の正規化は common の payload モジュールに任せる。

use first_aid_common::payload::{parse_aggregate, parse_items, status_error};
use first_aid_common::routes::{
    catalog_entry_path, kit_item_path, kit_path, ALL_ITEMS_PATH, CATALOG_PATH,
};
use first_aid_common::{
    AggregateItem, CatalogEntry, Error, KitItem, QuantityUpdate, Result, Snapshot,
};
use gloo::console;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JS側の例外を通信エラーに変換
fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

/// API呼び出し（共通処理）
///
/// 2xx以外は `{"detail": ...}` を読んで `Error::Status` にする
async fn send(method: &str, path: &str, body: Option<String>) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(path, &opts).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Transport("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        console::error!(format!("{} {} -> {}", method, path, resp.status()));
        return Err(status_error(resp.status(), &text));
    }

    Ok(text)
}

async fn send_json<B: Serialize>(method: &str, path: &str, body: &B) -> Result<()> {
    let body = serde_json::to_string(body)?;
    send(method, path, Some(body)).await.map(|_| ())
}

/// キットの品目一覧
pub async fn load_kit(kit_id: &str) -> Result<Snapshot<KitItem>> {
    let body = send("GET", &kit_path(kit_id), None).await?;
    parse_items(&body)
}

/// キットに品目を追加
pub async fn add_item(kit_id: &str, item: &KitItem) -> Result<()> {
    send_json("POST", &kit_path(kit_id), item).await
}

/// 数量変更（0で "Empty"）
pub async fn update_quantity(kit_id: &str, item_id: &str, qty: u32) -> Result<()> {
    send_json("PUT", &kit_item_path(kit_id, item_id), &QuantityUpdate { qty }).await
}

pub async fn remove_item(kit_id: &str, item_id: &str) -> Result<()> {
    send("DELETE", &kit_item_path(kit_id, item_id), None)
        .await
        .map(|_| ())
}

/// 全キット横断の品目一覧
pub async fn load_all_items() -> Result<Snapshot<AggregateItem>> {
    let body = send("GET", ALL_ITEMS_PATH, None).await?;
    parse_aggregate(&body)
}

/// 品目マスタ
pub async fn load_catalog() -> Result<Snapshot<CatalogEntry>> {
    let body = send("GET", CATALOG_PATH, None).await?;
    parse_items(&body)
}

pub async fn add_catalog_entry(entry: &CatalogEntry) -> Result<()> {
    send_json("POST", CATALOG_PATH, entry).await
}

pub async fn remove_catalog_entry(name: &str) -> Result<()> {
    send("DELETE", &catalog_entry_path(name), None)
        .await
        .map(|_| ())
}
