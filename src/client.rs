//! バックエンドREST APIクライアント
//!
//! ブラウザ版と同じエンドポイントを reqwest で呼ぶ。レスポンスの形の
//! 正規化とエラー本文の解釈は first_aid_common に任せる。

use crate::error::Result;
use first_aid_common::payload::{parse_aggregate, parse_items, status_error};
use first_aid_common::routes::{
    catalog_entry_path, join_url, kit_item_path, kit_path, ALL_ITEMS_PATH, CATALOG_DATA_DOWNLOAD_PATH,
    CATALOG_PATH, KIT_DATA_DOWNLOAD_PATH,
};
use first_aid_common::{AggregateItem, CatalogEntry, KitItem, QuantityUpdate, Snapshot};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use std::time::Duration;

pub struct KitClient {
    http: Client,
    base_url: String,
}

impl KitClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, join_url(&self.base_url, path))
    }

    /// 送信して本文を返す（2xx以外は `Error::Status`）
    async fn send(&self, builder: RequestBuilder) -> Result<String> {
        let request = builder.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "request failed");
            return Err(status_error(status.as_u16(), &body).into());
        }
        Ok(body)
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<()> {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    pub async fn kit(&self, kit_id: &str) -> Result<Snapshot<KitItem>> {
        let body = self.send(self.request(Method::GET, &kit_path(kit_id))).await?;
        Ok(parse_items(&body)?)
    }

    pub async fn add_item(&self, kit_id: &str, item: &KitItem) -> Result<()> {
        self.send_json(Method::POST, &kit_path(kit_id), item).await
    }

    pub async fn update_quantity(&self, kit_id: &str, item_id: &str, qty: u32) -> Result<()> {
        self.send_json(Method::PUT, &kit_item_path(kit_id, item_id), &QuantityUpdate { qty })
            .await
    }

    pub async fn remove_item(&self, kit_id: &str, item_id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &kit_item_path(kit_id, item_id)))
            .await?;
        Ok(())
    }

    pub async fn all_items(&self) -> Result<Snapshot<AggregateItem>> {
        let body = self.send(self.request(Method::GET, ALL_ITEMS_PATH)).await?;
        Ok(parse_aggregate(&body)?)
    }

    pub async fn catalog(&self) -> Result<Snapshot<CatalogEntry>> {
        let body = self.send(self.request(Method::GET, CATALOG_PATH)).await?;
        Ok(parse_items(&body)?)
    }

    pub async fn add_catalog_entry(&self, entry: &CatalogEntry) -> Result<()> {
        self.send_json(Method::POST, CATALOG_PATH, entry).await
    }

    pub async fn remove_catalog_entry(&self, name: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &catalog_entry_path(name)))
            .await?;
        Ok(())
    }

    /// キットデータファイル（生JSON）
    pub async fn download_kit_data(&self) -> Result<serde_json::Value> {
        self.download(KIT_DATA_DOWNLOAD_PATH).await
    }

    /// 品目マスタファイル（生JSON）
    pub async fn download_catalog_data(&self) -> Result<serde_json::Value> {
        self.download(CATALOG_DATA_DOWNLOAD_PATH).await
    }

    async fn download(&self, path: &str) -> Result<serde_json::Value> {
        let body = self.send(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
