//! 匯入流程錯誤定義

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use super::processor::csv_io::CsvError;
use crate::storage::StorageError;

/// 匯入流程錯誤類型
///
/// 每個變體都對應一個處理階段，訊息會帶出出錯的輸入值。
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("[source] 找不到來源檔案: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("[source] 讀取來源檔案失敗: {0}")]
    Source(#[from] CsvError),

    #[error("[normalize] 第 {line} 列時間戳格式無法辨識: {value:?}")]
    Format { line: u64, value: String },

    #[error("[aggregate] {user}/{project} 在 {timestamp} 的工時加總溢位（加入 {hours} 時）")]
    HoursOverflow {
        user: String,
        timestamp: DateTime<Utc>,
        project: String,
        hours: Decimal,
    },

    #[error("[load] 寫入資料表失敗: {0}")]
    StorageWrite(#[source] StorageError),

    #[error("[config] {0}")]
    Config(String),
}

pub type IngestionResult<T> = Result<T, IngestionError>;
