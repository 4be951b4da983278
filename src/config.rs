use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// バックエンドURLの環境変数（設定ファイルより優先）
pub const BASE_URL_ENV: &str = "FIRST_AID_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    /// snapshot コマンドの保存先（省略時はカレント/downloaded_data）
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: 30,
            snapshot_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrackerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("first-aid-tracker").join("config.json"))
    }

    pub fn base_url(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(url.trim().to_string());
            }
        }

        self.base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or(TrackerError::MissingBaseUrl)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TrackerError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self.save()
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("downloaded_data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.snapshot_dir(), PathBuf::from("downloaded_data"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"base_url": "http://localhost:8000"}"#).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.timeout_seconds, 30);
    }
}
