//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// レスポンスが得られなかった（オフライン、CORSなど）
    #[error("Network error: {0}")]
    Transport(String),

    /// バックエンドが2xx以外を返した
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// JSONとしては読めたが想定外の形
    #[error("Unexpected response: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// 送信前に弾かれた入力エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a Kit Box Code.")]
    MissingKitId,

    #[error("Please provide an item name.")]
    MissingName,

    #[error("Please provide an expiry date for {0}.")]
    MissingExpiryDate(String),

    #[error("Invalid expiry date: {0}")]
    InvalidExpiryDate(String),

    #[error("Please provide a quantity.")]
    MissingQuantity,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Quantity must be at least 1.")]
    NonPositiveQuantity,

    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(String),

    #[error("Invalid item number: {0}")]
    InvalidItemNo(String),

    #[error("Please select a category.")]
    MissingCategory,
}

impl Error {
    /// アラート表示用のメッセージ
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Status { detail, .. } if !detail.is_empty() => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
