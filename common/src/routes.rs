//! バックエンドのエンドポイントとブラウザのページルート

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// パスセグメント内でエスケープする文字
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const ALL_ITEMS_PATH: &str = "/api/all_items";
pub const CATALOG_PATH: &str = "/api/firstaiditems";
pub const KIT_DATA_DOWNLOAD_PATH: &str = "/download/first_aid_kit.json";
pub const CATALOG_DATA_DOWNLOAD_PATH: &str = "/download/firstIAiditem.json";

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// `/api/kits/{kit}`
pub fn kit_path(kit_id: &str) -> String {
    format!("/api/kits/{}", segment(kit_id))
}

/// `/api/kits/{kit}/{item}`
pub fn kit_item_path(kit_id: &str, item_id: &str) -> String {
    format!("/api/kits/{}/{}", segment(kit_id), segment(item_id))
}

/// `/api/firstaiditems/{name}`
pub fn catalog_entry_path(name: &str) -> String {
    format!("{}/{}", CATALOG_PATH, segment(name))
}

/// ベースURLとパスを結合（スラッシュの重複なし）
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// location のパスで決まるページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    KitSelection,
    /// `/kit/{kit}`
    Kit(String),
    /// `/edit_items`
    Catalog,
}

impl Route {
    /// 不明なパスはキット選択に戻す
    pub fn parse(path: &str) -> Self {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            ["kit", kit_id, ..] => {
                let kit_id = percent_decode_str(kit_id).decode_utf8_lossy().trim().to_string();
                if kit_id.is_empty() {
                    Route::KitSelection
                } else {
                    Route::Kit(kit_id)
                }
            }
            ["edit_items"] => Route::Catalog,
            _ => Route::KitSelection,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::KitSelection => "/".to_string(),
            Route::Kit(kit_id) => format!("/kit/{}", segment(kit_id)),
            Route::Catalog => "/edit_items".to_string(),
        }
    }
}
