//! 状態の永続化（キー・バリュー型ストレージへのJSON保存）
//!
//! 読み込みは壊れたデータや欠けたフィールドに寛容で、
//! フィールド単位で既定値にフォールバックする。

use crate::earnings::Earnings;
use crate::error::StorageError;
use crate::ledger::{Ledger, SubmissionEntry, PERSISTED_CAPACITY};
use crate::session::SessionState;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// 保存キー
pub const STORAGE_KEY: &str = "primedashState";

/// キー・バリュー型ストレージ
///
/// ブラウザでは localStorage、CLIではファイル、テストではメモリ。
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 保存レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub logged_in: bool,
    pub session_start: Option<i64>,
    pub pending_earnings: Option<Earnings>,
    pub current_user_id: Option<String>,
    pub submissions: Vec<SubmissionEntry>,
    pub compensation_applied: bool,
}

impl PersistedState {
    pub fn capture(session: &SessionState, ledger: &Ledger) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            session_start: session.session_start(),
            pending_earnings: session.pending_earnings(),
            current_user_id: session.current_user_id().map(str::to_string),
            submissions: ledger.entries().to_vec(),
            compensation_applied: session.compensation_applied(),
        }
    }

    pub fn into_parts(self) -> (SessionState, Ledger) {
        let session = SessionState::from_parts(
            self.logged_in,
            self.session_start,
            self.current_user_id,
            self.pending_earnings,
            self.compensation_applied,
        );
        (session, Ledger::from_entries(self.submissions))
    }

    /// JSONオブジェクトから寛容に復元
    pub fn from_value(value: &Value) -> Self {
        Self {
            logged_in: value["loggedIn"].as_bool().unwrap_or(false),
            session_start: as_timestamp(&value["sessionStart"]),
            pending_earnings: as_earnings(&value["pendingEarnings"]),
            current_user_id: value["currentUserId"].as_str().map(str::to_string),
            submissions: as_submissions(&value["submissions"]),
            compensation_applied: value["compensationApplied"].as_bool().unwrap_or(false),
        }
    }
}

fn as_timestamp(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn as_earnings(value: &Value) -> Option<Earnings> {
    let object = value.as_object()?;
    Some(Earnings {
        usd: object.get("usd")?.as_f64()?,
        gbp: object.get("gbp")?.as_f64()?,
    })
}

fn as_submissions(value: &Value) -> Vec<SubmissionEntry> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    let mut entries: Vec<SubmissionEntry> = items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "dropping malformed submission entry");
                None
            }
        })
        .collect();
    entries.truncate(PERSISTED_CAPACITY);
    entries
}

/// 状態を保存
pub fn save<B: StorageBackend + ?Sized>(
    backend: &mut B,
    state: &PersistedState,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    backend.set(STORAGE_KEY, &json)
}

/// 状態を読み込み（キーが無ければ既定値）
pub fn load<B: StorageBackend + ?Sized>(backend: &B) -> Result<PersistedState, StorageError> {
    let raw = match backend.get(STORAGE_KEY)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(PersistedState::default()),
    };
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    if !value.is_object() {
        return Err(StorageError::Corrupt("payload is not an object".to_string()));
    }
    Ok(PersistedState::from_value(&value))
}

/// 読み込みに失敗した場合はログに残して既定値を返す
pub fn load_or_default<B: StorageBackend + ?Sized>(backend: &B) -> PersistedState {
    load(backend).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to a fresh state");
        PersistedState::default()
    })
}

/// メモリ上のストレージ
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全操作が失敗するストレージ（容量超過・無効化されたブラウザの再現）
    pub fn unavailable() -> Self {
        Self {
            items: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
