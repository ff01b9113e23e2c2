use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::data_ingestion::processor::{SourceLocation, DEFAULT_SOURCE_FILE};
use crate::storage::repository::DEFAULT_BATCH_SIZE;

/// 應用程序配置結構
///
/// 每個區段都有預設值，配置檔可以只寫需要覆寫的部分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub source: SourceConfig,
    pub ingestion: IngestionConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.log.validate()?;
        self.source.validate()?;
        self.ingestion.validate()?;

        Ok(())
    }
}

/// 數據庫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 連線字串，例如 `sqlite://employee.db`
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
    /// 每批 INSERT 的筆數
    pub batch_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://employee.db".to_string(),
            max_connections: 4,
            acquire_timeout_secs: 30,
            busy_timeout_secs: 5,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.url, "database.url")?;
        if !self.url.starts_with("sqlite:") {
            return Err(ValidationError::InvalidValue(format!(
                "database.url 必須是 sqlite 連線字串: {}",
                self.url
            )));
        }
        ValidationUtils::in_range(self.max_connections, 1, 64, "database.max_connections")?;
        ValidationUtils::in_range(self.batch_size, 1, 5000, "database.batch_size")?;

        Ok(())
    }
}

impl DatabaseConfig {
    /// 獲取連接超時持續時間
    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_secs)
    }

    /// 資料庫鎖定時的等待時間
    pub fn busy_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.busy_timeout_secs)
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(
            &self.format.to_lowercase(),
            &["pretty", "compact"],
            "log.format",
        )?;

        Ok(())
    }
}

/// 來源檔案配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// 來源目錄；未設定時使用執行檔所在目錄
    pub directory: Option<PathBuf>,
    pub file_name: String,
    pub separator: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: DEFAULT_SOURCE_FILE.to_string(),
            separator: ',',
        }
    }
}

impl Validator for SourceConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.file_name, "source.file_name")?;
        if !self.separator.is_ascii() {
            return Err(ValidationError::InvalidValue(format!(
                "source.separator 必須是 ASCII 字元: {:?}",
                self.separator
            )));
        }

        Ok(())
    }
}

impl SourceConfig {
    /// 轉換為來源位置
    pub fn location(&self) -> SourceLocation {
        match &self.directory {
            Some(directory) => SourceLocation::InDirectory {
                directory: directory.clone(),
                file_name: self.file_name.clone(),
            },
            None => SourceLocation::BesideExecutable {
                file_name: self.file_name.clone(),
            },
        }
    }

    /// 分隔符（位元組）
    pub fn separator_byte(&self) -> u8 {
        if self.separator.is_ascii() {
            self.separator as u8
        } else {
            b','
        }
    }
}

/// 無法解析的時間戳處理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 第一筆無法解析即中止，資料表不變
    #[default]
    FailFast,
    /// 記錄並略過無法解析的列，其餘照常寫入
    SkipAndLog,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail_fast" => Ok(FailurePolicy::FailFast),
            "skip_and_log" => Ok(FailurePolicy::SkipAndLog),
            other => Err(format!("未知的失敗策略: {}（可用 fail_fast、skip_and_log）", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::FailFast => write!(f, "fail_fast"),
            FailurePolicy::SkipAndLog => write!(f, "skip_and_log"),
        }
    }
}

/// 匯入流程配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// 不帶時區的時間戳所屬時區（IANA 名稱）
    pub naive_timezone: String,
    pub failure_policy: FailurePolicy,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            naive_timezone: "UTC".to_string(),
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl Validator for IngestionConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::timezone(&self.naive_timezone, "ingestion.naive_timezone")?;
        Ok(())
    }
}
