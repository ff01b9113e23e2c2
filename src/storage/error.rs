use thiserror::Error;

/// 儲存層錯誤
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("資料庫錯誤: {0}")]
    Database(#[from] sqlx::Error),

    #[error("資料庫遷移失敗: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("找不到使用者的打卡記錄: {0}")]
    UserNotFound(String),

    #[error("資料表中的工時無法解析: {0:?}")]
    InvalidHours(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
