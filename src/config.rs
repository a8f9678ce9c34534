use crate::error::{MedCheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 履歴ファイルの場所を上書きする環境変数
pub const HISTORY_ENV: &str = "MEDCHECK_HISTORY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 履歴ファイル（相対パスはカレントディレクトリ基準）
    pub history_path: PathBuf,
    /// 組み込みリストの代わりに使う参照ファイル（'Medicine Name' 列必須）
    pub reference_path: Option<PathBuf>,
    /// RUST_LOG 未設定時のログフィルタ
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("history.csv"),
            reference_path: None,
            log_filter: "medcheck=info,medcheck_common=info".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MedCheckError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("medcheck").join("config.json"))
    }

    /// 実際に使う履歴ファイル
    ///
    /// 優先順: コマンドライン指定 > 環境変数 > 設定ファイル
    pub fn resolve_history_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(path) = cli_override {
            return path;
        }
        match std::env::var(HISTORY_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self.history_path.clone(),
        }
    }

    pub fn set_history_path(&mut self, path: PathBuf) -> Result<()> {
        self.history_path = path;
        self.save()
    }

    pub fn set_reference_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(p) = &path {
            if !p.exists() {
                return Err(MedCheckError::FileNotFound(p.display().to_string()));
            }
        }
        self.reference_path = path;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history_path, PathBuf::from("history.csv"));
        assert!(config.reference_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"reference_path": "meds.csv"}"#).unwrap();
        assert_eq!(config.reference_path, Some(PathBuf::from("meds.csv")));
        assert_eq!(config.history_path, PathBuf::from("history.csv"));
        assert!(config.log_filter.contains("medcheck"));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default();
        let path = config.resolve_history_path(Some(PathBuf::from("/tmp/h.csv")));
        assert_eq!(path, PathBuf::from("/tmp/h.csv"));
    }
}
