//! 提出台帳（新しい順、件数上限つき）

use crate::earnings::{compensation_earnings, Earnings};
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

/// 保存する最大件数
pub const PERSISTED_CAPACITY: usize = 50;

/// 画面に表示する最大件数
pub const DISPLAY_CAPACITY: usize = 6;

/// 補填エントリのファイル名
pub const COMPENSATION_FILENAME: &str = "Compensation (3 hours)";

/// エントリ種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    #[default]
    Upload,
    Compensation,
}

/// 提出レコード（作成後は変更しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEntry {
    pub filename: String,
    #[serde(default)]
    pub earnings: Option<Earnings>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub kind: SubmissionKind,
}

impl SubmissionEntry {
    /// `.zip` のアップロード記録を作成
    pub fn upload(
        filename: &str,
        earnings: Option<Earnings>,
        user_id: Option<&str>,
        timestamp: i64,
    ) -> Result<Self, ValidationError> {
        if !is_zip(filename) {
            return Err(ValidationError::NotZip(filename.to_string()));
        }
        Ok(Self {
            filename: filename.to_string(),
            earnings,
            timestamp,
            user_id: user_id.map(str::to_string),
            kind: SubmissionKind::Upload,
        })
    }

    /// 3時間分の補填記録
    pub fn compensation(user_id: Option<&str>, timestamp: i64) -> Self {
        Self {
            filename: COMPENSATION_FILENAME.to_string(),
            earnings: Some(compensation_earnings()),
            timestamp,
            user_id: user_id.map(str::to_string),
            kind: SubmissionKind::Compensation,
        }
    }
}

/// エポックミリ秒（JSの数値なので小数表記も受け付ける）
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(i64),
        Float(f64),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Int(ms) => Ok(ms),
        Millis::Float(ms) if ms.is_finite() => Ok(ms as i64),
        Millis::Float(ms) => Err(serde::de::Error::custom(format!("invalid timestamp: {ms}"))),
    }
}

/// ファイル名が `.zip` で終わるか（大文字小文字を区別しない）
pub fn is_zip(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".zip")
}

/// 提出台帳
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<SubmissionEntry>,
}

impl Ledger {
    /// 新しい順に並んだエントリから作成（上限超過分は古いものから捨てる）
    pub fn from_entries(mut entries: Vec<SubmissionEntry>) -> Self {
        entries.truncate(PERSISTED_CAPACITY);
        Self { entries }
    }

    /// 先頭に追加し、上限を超えた最古のエントリを捨てる
    pub fn record(&mut self, entry: SubmissionEntry) -> &SubmissionEntry {
        self.entries.insert(0, entry);
        self.entries.truncate(PERSISTED_CAPACITY);
        &self.entries[0]
    }

    /// 全エントリ（新しい順）
    pub fn entries(&self) -> &[SubmissionEntry] {
        &self.entries
    }

    /// 表示対象（新しい順に最大6件）
    pub fn visible(&self) -> &[SubmissionEntry] {
        let end = self.entries.len().min(DISPLAY_CAPACITY);
        &self.entries[..end]
    }

    pub fn has_compensation(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.kind == SubmissionKind::Compensation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<SubmissionEntry> {
        self.entries
    }
}
