//! UIコンポーネント

pub mod header;
pub mod kit_selector;
pub mod item_table;
pub mod kit_view;
pub mod all_items_view;
pub mod catalog_view;

use first_aid_common::Error;
use gloo::{console, dialogs};

/// 失敗した操作をコンソールに記録し、利用者にも知らせる
pub(crate) fn report_error(action: &str, error: &Error) {
    console::error!(format!("{} failed: {}", action, error));
    dialogs::alert(&format!("Failed to {}: {}", action, error.user_message()));
}
