//! CSV 檔案讀取與處理模組

pub mod error;
pub mod reader;

pub use error::{CsvError, CsvResult};
pub use reader::{CsvReader, CsvReaderConfig};
