use primedash_common::{StorageError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimedashError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("保存エラー: {0}")]
    Storage(#[from] StorageError),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrimedashError>;
