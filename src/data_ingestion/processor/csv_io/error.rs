//! CSV 處理錯誤定義

use thiserror::Error;

/// CSV 處理錯誤類型
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("檔案讀取錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 解析錯誤: {0}")]
    ParseError(#[from] csv::Error),

    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("第 {line} 列缺少欄位 {column}")]
    MissingField { line: u64, column: String },

    #[error("第 {line} 列的工時無法解析: {value:?}")]
    InvalidHours { line: u64, value: String },
}

/// CSV 處理結果類型
pub type CsvResult<T> = Result<T, CsvError>;
