//! 打卡記錄聚合
//!
//! 以 (user, timestamp, project) 分組並以精確十進位加總工時。

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::{AggregatedCheckInRecord, AggregationKey, NormalizedCheckInRecord};

/// 聚合標準化後的記錄，每個聚合鍵輸出一筆
///
/// 輸出依聚合鍵排序。加總超出 `Decimal` 範圍時回傳 `HoursOverflow`。
pub fn aggregate<I>(records: I) -> IngestionResult<Vec<AggregatedCheckInRecord>>
where
    I: IntoIterator<Item = NormalizedCheckInRecord>,
{
    let mut groups: BTreeMap<AggregationKey, Decimal> = BTreeMap::new();
    let mut input_count = 0usize;

    for record in records {
        input_count += 1;
        let hours = record.hours;
        let total = groups.entry(record.key()).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(hours)
            .ok_or_else(|| IngestionError::HoursOverflow {
                user: record.user.clone(),
                timestamp: record.timestamp,
                project: record.project.clone(),
                hours,
            })?;
    }

    debug!(
        input = input_count,
        groups = groups.len(),
        "聚合完成"
    );

    Ok(groups
        .into_iter()
        .map(|(key, hours)| AggregatedCheckInRecord::from_key(key, hours))
        .collect())
}
