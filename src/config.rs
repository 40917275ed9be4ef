use crate::error::{PrimedashError, Result};
use primedash_common::DashboardConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 固定ユーザーIDを上書きする環境変数
pub const REQUIRED_USER_ENV: &str = "PRIMEDASH_REQUIRED_USER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(flatten)]
    pub dashboard: DashboardConfig,
    /// 状態ファイルの保存先（省略時は設定ディレクトリ）
    pub state_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PrimedashError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("primedash"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 状態ファイルのディレクトリ
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("state")),
        }
    }

    /// 実際に使うダッシュボード設定（環境変数を優先）
    pub fn effective_dashboard(&self) -> DashboardConfig {
        let mut dashboard = self.dashboard.clone();
        if let Ok(user) = std::env::var(REQUIRED_USER_ENV) {
            let user = user.trim();
            if !user.is_empty() {
                dashboard.require_fixed_user_id = Some(user.to_string());
            }
        }
        dashboard
    }
}
