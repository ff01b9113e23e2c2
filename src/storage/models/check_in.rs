use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain_types::AggregatedCheckInRecord;
use crate::storage::error::StorageError;

/// 資料表名稱
pub const CHECK_IN_TABLE: &str = "employee_check_in";

/// `employee_check_in` 資料列
///
/// 工時以文字讀出（`CAST(hours AS TEXT)`），再轉為 `Decimal`。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckInRow {
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub hours: String,
    pub project: String,
}

impl TryFrom<CheckInRow> for AggregatedCheckInRecord {
    type Error = StorageError;

    fn try_from(row: CheckInRow) -> Result<Self, Self::Error> {
        let hours = Decimal::from_str(&row.hours)
            .or_else(|_| Decimal::from_scientific(&row.hours))
            .map_err(|_| StorageError::InvalidHours(row.hours.clone()))?;

        Ok(AggregatedCheckInRecord {
            user: row.user,
            timestamp: row.timestamp,
            hours,
            project: row.project,
        })
    }
}
