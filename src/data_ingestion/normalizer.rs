//! 時間戳標準化
//!
//! 先做月份名稱轉換，再依序嘗試每一種格式，第一個成功的結果即為答案。
//! 帶時區的結果轉為 UTC；不帶時區的結果視為 `naive_timezone` 的當地時間。

pub mod formats;
pub mod locale;

pub use formats::{ParseFailure, ParsedTimestamp, TimestampFormat};
pub use locale::LocaleTranslator;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::trace;

use crate::domain_types::{NormalizedCheckInRecord, RawCheckInRecord};

/// 所有格式都無法解析
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("時間戳格式無法辨識: {value:?}")]
pub struct FormatError {
    pub value: String,
}

/// 時間戳標準化器
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    translator: LocaleTranslator,
    formats: Vec<TimestampFormat>,
    naive_timezone: Tz,
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl TimestampNormalizer {
    /// 創建標準化器，無時區的時間視為 `naive_timezone` 當地時間
    pub fn new(naive_timezone: Tz) -> Self {
        Self {
            translator: LocaleTranslator::russian(),
            formats: TimestampFormat::ORDERED.to_vec(),
            naive_timezone,
        }
    }

    /// 將單一時間戳字串轉換為 UTC
    pub fn normalize(&self, raw: &str) -> Result<DateTime<Utc>, FormatError> {
        let translated = self.translator.translate(raw.trim());

        for format in &self.formats {
            match format.parse(&translated) {
                Ok(ParsedTimestamp::Zoned(dt)) => return Ok(dt),
                Ok(ParsedTimestamp::Naive(naive)) => {
                    return naive
                        .and_local_timezone(self.naive_timezone)
                        .earliest()
                        .map(|dt| dt.with_timezone(&Utc))
                        .ok_or_else(|| FormatError {
                            value: raw.to_string(),
                        });
                }
                Err(failure) => {
                    trace!(format = %format, %failure, "格式不符，嘗試下一個");
                }
            }
        }

        Err(FormatError {
            value: raw.to_string(),
        })
    }

    /// 標準化一筆原始記錄
    pub fn normalize_record(
        &self,
        record: RawCheckInRecord,
    ) -> Result<NormalizedCheckInRecord, FormatError> {
        let timestamp = self.normalize(&record.timestamp)?;
        Ok(NormalizedCheckInRecord {
            user: record.user,
            timestamp,
            hours: record.hours,
            project: record.project,
        })
    }
}
