use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 來源檔案中的原始打卡記錄（時間戳尚未標準化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCheckInRecord {
    /// 資料列編號（從 1 開始，不含標題列）
    pub line: u64,
    pub user: String,
    pub timestamp: String,
    pub hours: Decimal,
    pub project: String,
}

/// 時間戳已轉換為 UTC 的打卡記錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCheckInRecord {
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub hours: Decimal,
    pub project: String,
}

impl NormalizedCheckInRecord {
    /// 取得聚合鍵
    pub fn key(&self) -> AggregationKey {
        AggregationKey {
            user: self.user.clone(),
            timestamp: self.timestamp,
            project: self.project.clone(),
        }
    }
}

/// 聚合後的打卡記錄，每個 (user, timestamp, project) 只有一筆
///
/// 欄位名稱即為 `employee_check_in` 表的欄位名稱。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedCheckInRecord {
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub hours: Decimal,
    pub project: String,
}

impl AggregatedCheckInRecord {
    pub fn from_key(key: AggregationKey, hours: Decimal) -> Self {
        Self {
            user: key.user,
            timestamp: key.timestamp,
            hours,
            project: key.project,
        }
    }
}

/// 聚合鍵：(user, 標準化時間戳, project)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub project: String,
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.user,
            self.timestamp.to_rfc3339(),
            self.project
        )
    }
}
