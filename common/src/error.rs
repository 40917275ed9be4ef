//! エラー型定義

use thiserror::Error;

/// 入力検証エラー（ユーザーに表示し、状態は変更しない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a user ID to begin.")]
    EmptyUserId,

    #[error("User ID not recognised.")]
    UserIdMismatch,

    #[error("Only .zip files are accepted. ({0})")]
    NotZip(String),
}

/// 永続化エラー（ログのみ、UIには出さない）
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("stored state is corrupt: {0}")]
    Corrupt(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
