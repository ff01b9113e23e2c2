//! 支援的時間戳格式
//!
//! 每種格式都是 `&str -> Result<ParsedTimestamp, ParseFailure>` 的純函數，
//! 由 [`TimestampFormat::ORDERED`] 決定嘗試順序。

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::fmt;
use thiserror::Error;

/// 單一格式解析失敗的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("格式不符: {0}")]
    Pattern(String),

    #[error("缺少時區名稱")]
    MissingZone,

    #[error("無法辨識的時區名稱: {0}")]
    UnknownZone(String),
}

/// 解析結果：帶時區的時間已轉為 UTC，無時區的保留原樣
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Zoned(DateTime<Utc>),
    Naive(NaiveDateTime),
}

/// 時間戳格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `YYYY-MM-DD HH:MM:SS.ffffff <tz-name>`
    IsoFractionalZoned,
    /// `YYYY-MM-DD HH:MM:SS <tz-name>`
    IsoZoned,
    /// `MM/DD/YYYY hh:mm AM|PM`
    UsTwelveHour,
    /// `DD <FullMonthName> YYYY HH:MM`
    DayMonthName,
}

impl TimestampFormat {
    /// 嘗試順序：限制較多的格式在前
    pub const ORDERED: [TimestampFormat; 4] = [
        TimestampFormat::IsoFractionalZoned,
        TimestampFormat::IsoZoned,
        TimestampFormat::UsTwelveHour,
        TimestampFormat::DayMonthName,
    ];

    /// chrono 格式字串（帶時區的格式不含時區部分）
    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampFormat::IsoFractionalZoned => "%Y-%m-%d %H:%M:%S%.f",
            TimestampFormat::IsoZoned => "%Y-%m-%d %H:%M:%S",
            TimestampFormat::UsTwelveHour => "%m/%d/%Y %I:%M %p",
            TimestampFormat::DayMonthName => "%d %B %Y %H:%M",
        }
    }

    fn is_zoned(&self) -> bool {
        matches!(
            self,
            TimestampFormat::IsoFractionalZoned | TimestampFormat::IsoZoned
        )
    }

    /// 以此格式解析字串
    pub fn parse(&self, input: &str) -> Result<ParsedTimestamp, ParseFailure> {
        if !self.is_zoned() {
            return parse_naive(input, self.pattern()).map(ParsedTimestamp::Naive);
        }

        let (local, zone) = input.rsplit_once(' ').ok_or(ParseFailure::MissingZone)?;
        // 先確認日期時間部分，避免把格式不符誤報成時區錯誤
        let naive = parse_naive(local, self.pattern())?;
        if *self == TimestampFormat::IsoFractionalZoned && !local.contains('.') {
            return Err(ParseFailure::Pattern("缺少小數秒".to_string()));
        }
        let tz = resolve_zone(zone)?;
        let zoned = naive
            .and_local_timezone(tz)
            .earliest()
            .ok_or_else(|| ParseFailure::Pattern(format!("{} 在 {} 不存在", local, tz)))?;
        Ok(ParsedTimestamp::Zoned(zoned.with_timezone(&Utc)))
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::IsoZoned => write!(f, "%Y-%m-%d %H:%M:%S %Z"),
            TimestampFormat::IsoFractionalZoned => write!(f, "%Y-%m-%d %H:%M:%S.%f %Z"),
            other => write!(f, "{}", other.pattern()),
        }
    }
}

fn parse_naive(input: &str, pattern: &str) -> Result<NaiveDateTime, ParseFailure> {
    NaiveDateTime::parse_from_str(input, pattern).map_err(|e| ParseFailure::Pattern(e.to_string()))
}

/// 解析時區名稱：`UTC`、`GMT`、`Z` 或 IANA 名稱
pub fn resolve_zone(name: &str) -> Result<Tz, ParseFailure> {
    if name.is_empty() {
        return Err(ParseFailure::MissingZone);
    }
    if ["UTC", "GMT", "Z"]
        .iter()
        .any(|alias| name.eq_ignore_ascii_case(alias))
    {
        return Ok(Tz::UTC);
    }
    name.parse::<Tz>()
        .map_err(|_| ParseFailure::UnknownZone(name.to_string()))
}
