#![allow(dead_code)]

use checkin_etl::config::DatabaseConfig;
use checkin_etl::storage::{self, DatabasePool};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 測試用工作目錄：SQLite 檔案與來源 CSV 都放在這裡
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.path().join("employee.db")
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: format!("sqlite://{}", self.db_path().display()),
            ..DatabaseConfig::default()
        }
    }

    /// 寫入來源 CSV，回傳路徑
    pub fn write_source(&self, contents: &str) -> PathBuf {
        let path = self.path().join("dailycheckins.csv");
        fs::write(&path, contents).expect("Failed to write source csv");
        path
    }

    /// 開啟資料庫並套用遷移
    pub async fn pool(&self) -> DatabasePool {
        let pool = storage::init_db_pool(&self.database_config())
            .await
            .expect("Failed to connect to test database");
        storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }
}

pub const SAMPLE_CSV: &str = "user,timestamp,hours,project
alice,2024-03-01 14:30:00 UTC,3.5,apollo
alice,03/01/2024 02:30 PM,4.0,apollo
alice,01 March 2024 14:30,2,hermes
bob,15 марта 2024 09:00,8,apollo
bob,2024-03-15 09:00:00.000000 UTC,0.25,apollo
carol,2024-03-02 18:00:00 Europe/Moscow,1.75,zeus
";
