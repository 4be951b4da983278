use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("バックエンドURLが設定されていません。`first-aid config --set-base-url URL` または FIRST_AID_BASE_URL で設定してください")]
    MissingBaseUrl,

    #[error(transparent)]
    Api(#[from] first_aid_common::Error),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("品目が見つかりません: {0}")]
    ItemNotFound(String),
}

impl From<first_aid_common::ValidationError> for TrackerError {
    fn from(e: first_aid_common::ValidationError) -> Self {
        TrackerError::Api(e.into())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
