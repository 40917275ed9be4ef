//! ダッシュボード設定
//!
//! 複数ユーザー+永続化版と、固定ユーザー+非永続化版を1つの設定で切り替える。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// 設定時はこのIDと完全一致する場合のみログイン可能
    pub require_fixed_user_id: Option<String>,
    /// falseの場合ストレージを一切読み書きしない
    pub persistence_enabled: bool,
    /// 起動時に補填エントリを投入する
    pub seed_compensation: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            require_fixed_user_id: None,
            persistence_enabled: true,
            seed_compensation: true,
        }
    }
}

impl DashboardConfig {
    /// 固定ユーザー・非永続化の構成
    pub fn single_user(user_id: impl Into<String>) -> Self {
        Self {
            require_fixed_user_id: Some(user_id.into()),
            persistence_enabled: false,
            seed_compensation: false,
        }
    }
}
