use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;
use tracing::debug;

use super::error::StorageResult;

/// 資料庫池類型
pub type DatabasePool = SqlitePool;

/// 初始化資料庫連接池
///
/// 每次匯入各自開啟，結束時由呼叫端 `close()`。
pub async fn init_db_pool(config: &DatabaseConfig) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout())
        .disable_statement_logging();

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;

    // 測試連接
    sqlx::query("SELECT 1").execute(&pool).await?;
    debug!("資料庫連線已建立: {}", config.url);

    Ok(pool)
}

/// 健康檢查
pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(path: &std::path::Path) -> DatabaseConfig {
        DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            ..DatabaseConfig::default()
        }
    }

    #[tokio::test]
    async fn test_init_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee.db");

        let pool = init_db_pool(&config_for(&path)).await.unwrap();
        assert!(health_check(&pool).await);
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_db_pool(&config_for(&dir.path().join("employee.db")))
            .await
            .unwrap();
        pool.close().await;
        assert!(!health_check(&pool).await);
    }
}
