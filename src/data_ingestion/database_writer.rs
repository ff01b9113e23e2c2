use tracing::{error, info};

use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::AggregatedCheckInRecord;
use crate::storage::{repository::CheckInRepository, run_migrations, DatabasePool};

/// 以聚合結果整表替換 `employee_check_in`
///
/// 失敗時交易回滾，資料表維持原內容。
pub async fn write_check_ins_to_db(
    repo: &CheckInRepository,
    records: &[AggregatedCheckInRecord],
) -> IngestionResult<u64> {
    match repo.replace_all(records).await {
        Ok(written) => {
            info!("寫入 {} 條打卡記錄到資料庫", written);
            Ok(written)
        }
        Err(e) => {
            error!("寫入打卡記錄失敗，資料表未變更: {}", e);
            Err(IngestionError::StorageWrite(e))
        }
    }
}

/// 確認資料表存在後寫入
pub async fn load_into(
    pool: &DatabasePool,
    records: &[AggregatedCheckInRecord],
    batch_size: usize,
) -> IngestionResult<u64> {
    run_migrations(pool)
        .await
        .map_err(IngestionError::StorageWrite)?;

    let repo = CheckInRepository::new(pool.clone()).with_batch_size(batch_size);
    write_check_ins_to_db(&repo, records).await
}
