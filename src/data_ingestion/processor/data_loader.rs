use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::csv_io::{CsvReader, CsvReaderConfig};
use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::RawCheckInRecord;

/// 預設來源檔名
pub const DEFAULT_SOURCE_FILE: &str = "dailycheckins.csv";

/// 來源檔案位置
///
/// 未指定目錄時，以執行檔所在目錄（部署位置）為基準。
#[derive(Debug, Clone)]
pub enum SourceLocation {
    /// 直接指定的完整路徑
    Explicit(PathBuf),
    /// 目錄 + 檔名
    InDirectory { directory: PathBuf, file_name: String },
    /// 執行檔所在目錄 + 檔名
    BesideExecutable { file_name: String },
}

impl SourceLocation {
    /// 解析為實際路徑
    pub fn resolve(&self) -> IngestionResult<PathBuf> {
        match self {
            SourceLocation::Explicit(path) => Ok(path.clone()),
            SourceLocation::InDirectory {
                directory,
                file_name,
            } => Ok(directory.join(file_name)),
            SourceLocation::BesideExecutable { file_name } => {
                let exe = std::env::current_exe().map_err(|e| {
                    IngestionError::Config(format!("無法取得執行檔位置: {}", e))
                })?;
                let directory = exe.parent().ok_or_else(|| {
                    IngestionError::Config(format!("執行檔沒有上層目錄: {}", exe.display()))
                })?;
                Ok(directory.join(file_name))
            }
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::BesideExecutable {
            file_name: DEFAULT_SOURCE_FILE.to_string(),
        }
    }
}

/// 來源資料載入器
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    location: SourceLocation,
    reader: CsvReader,
}

impl DataLoader {
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location,
            reader: CsvReader::default(),
        }
    }

    /// 設定來源位置
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// 設定 CSV 讀取配置
    pub fn with_reader_config(mut self, config: CsvReaderConfig) -> Self {
        self.reader = CsvReader::new(config);
        self
    }

    /// 解析來源路徑並確認檔案存在
    pub fn locate(&self) -> IngestionResult<PathBuf> {
        let path = self.location.resolve()?;
        if !path.is_file() {
            return Err(IngestionError::SourceNotFound { path });
        }
        Ok(path)
    }

    /// 載入所有原始記錄，回傳實際讀取的路徑
    pub fn load(&self) -> IngestionResult<(PathBuf, Vec<RawCheckInRecord>)> {
        let path = self.locate()?;
        debug!("讀取來源檔案: {}", path.display());

        let records = self.load_from(&path)?;
        info!(rows = records.len(), "已讀取來源檔案 {}", path.display());
        Ok((path, records))
    }

    fn load_from(&self, path: &Path) -> IngestionResult<Vec<RawCheckInRecord>> {
        Ok(self.reader.read_file(path)?)
    }
}
