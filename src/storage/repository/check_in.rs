use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::domain_types::AggregatedCheckInRecord;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::models::{CheckInRow, CHECK_IN_TABLE};

/// 每批 INSERT 的筆數上限（每筆 4 個綁定參數）
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// `employee_check_in` 資料表操作
///
/// 匯入流程是唯一的寫入者；查詢服務只讀。
#[derive(Debug, Clone)]
pub struct CheckInRepository {
    pool: SqlitePool,
    batch_size: usize,
}

impl CheckInRepository {
    /// 創建新的打卡資料表操作實例
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// 設定批次大小
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 以新資料整表替換
    ///
    /// 刪除與寫入在同一個交易內完成，任何一步失敗都會回滾，
    /// 讀者只會看到舊內容或新內容。回傳寫入筆數。
    pub async fn replace_all(&self, records: &[AggregatedCheckInRecord]) -> StorageResult<u64> {
        let mut tx = self.pool.begin().await?;
        let written = replace_rows(&mut *tx, records, self.batch_size).await?;
        tx.commit().await?;

        info!(written, "{} 已替換", CHECK_IN_TABLE);
        Ok(written)
    }

    /// 獲取所有打卡記錄
    pub async fn list_all(&self) -> StorageResult<Vec<AggregatedCheckInRecord>> {
        let sql = format!(
            r#"
            SELECT "user", "timestamp", CAST(hours AS TEXT) AS hours, project
            FROM {CHECK_IN_TABLE}
            ORDER BY "user", "timestamp", project
            "#
        );
        let rows = sqlx::query_as::<_, CheckInRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AggregatedCheckInRecord::try_from).collect()
    }

    /// 獲取指定使用者的打卡記錄，沒有任何記錄時回傳 `UserNotFound`
    pub async fn list_by_user(&self, user: &str) -> StorageResult<Vec<AggregatedCheckInRecord>> {
        let sql = format!(
            r#"
            SELECT "user", "timestamp", CAST(hours AS TEXT) AS hours, project
            FROM {CHECK_IN_TABLE}
            WHERE "user" = ?
            ORDER BY "timestamp", project
            "#
        );
        let rows = sqlx::query_as::<_, CheckInRow>(&sql)
            .bind(user)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(StorageError::UserNotFound(user.to_string()));
        }

        rows.into_iter().map(AggregatedCheckInRecord::try_from).collect()
    }

    /// 資料表筆數
    pub async fn count(&self) -> StorageResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {CHECK_IN_TABLE}");
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

/// 在呼叫端的交易內清空資料表並寫入新資料，不負責提交
///
/// 提交前其他連線仍只看得到舊內容。
pub async fn replace_rows(
    conn: &mut SqliteConnection,
    records: &[AggregatedCheckInRecord],
    batch_size: usize,
) -> StorageResult<u64> {
    let removed = sqlx::query(&format!("DELETE FROM {CHECK_IN_TABLE}"))
        .execute(&mut *conn)
        .await?
        .rows_affected();
    debug!(removed, "已清除舊資料（尚未提交）");

    let mut written = 0u64;
    for chunk in records.chunks(batch_size.max(1)) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            r#"INSERT INTO {CHECK_IN_TABLE} ("user", "timestamp", hours, project) "#
        ));
        builder.push_values(chunk, |mut row, record| {
            row.push_bind(record.user.clone())
                .push_bind(record.timestamp)
                .push_bind(record.hours.to_string())
                .push_bind(record.project.clone());
        });

        written += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(written)
}
