//! CSV 檔案讀取器

use super::error::{CsvError, CsvResult};
use crate::domain_types::RawCheckInRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// 必要欄位名稱
pub const USER_COLUMN: &str = "user";
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const HOURS_COLUMN: &str = "hours";
pub const PROJECT_COLUMN: &str = "project";

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 分隔符
    pub separator: u8,
    /// 是否去除欄位前後空白
    pub trim: bool,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            separator: b',',
            trim: true,
        }
    }
}

/// 標題列中各必要欄位的位置
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    user: usize,
    timestamp: usize,
    hours: usize,
    project: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> CsvResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            user: find(USER_COLUMN)?,
            timestamp: find(TIMESTAMP_COLUMN)?,
            hours: find(HOURS_COLUMN)?,
            project: find(PROJECT_COLUMN)?,
        })
    }
}

/// 打卡記錄 CSV 讀取器
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    /// 創建新的 CSV 讀取器
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 設定分隔符
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    /// 從檔案路徑讀取所有記錄
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> CsvResult<Vec<RawCheckInRecord>> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_from(file)
    }

    /// 從字串讀取所有記錄
    pub fn read_string(&self, data: &str) -> CsvResult<Vec<RawCheckInRecord>> {
        self.read_from(data.as_bytes())
    }

    /// 依來源順序讀取記錄
    pub fn read_from<R: Read>(&self, source: R) -> CsvResult<Vec<RawCheckInRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            // 欄位數不一致的列交給 parse_row 回報缺少的欄位名稱
            .flexible(true)
            .delimiter(self.config.separator)
            .trim(if self.config.trim { Trim::All } else { Trim::None })
            .from_reader(source);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            records.push(Self::parse_row(&row, index as u64 + 1, columns)?);
        }

        Ok(records)
    }

    fn parse_row(row: &StringRecord, line: u64, columns: ColumnIndex) -> CsvResult<RawCheckInRecord> {
        let field = |index: usize, name: &str| {
            row.get(index)
                .map(str::to_string)
                .ok_or_else(|| CsvError::MissingField {
                    line,
                    column: name.to_string(),
                })
        };

        let raw_hours = field(columns.hours, HOURS_COLUMN)?;
        let hours = Decimal::from_str(&raw_hours)
            .or_else(|_| Decimal::from_scientific(&raw_hours))
            .map_err(|_| CsvError::InvalidHours {
                line,
                value: raw_hours.clone(),
            })?;

        Ok(RawCheckInRecord {
            line,
            user: field(columns.user, USER_COLUMN)?,
            timestamp: field(columns.timestamp, TIMESTAMP_COLUMN)?,
            hours,
            project: field(columns.project, PROJECT_COLUMN)?,
        })
    }
}
