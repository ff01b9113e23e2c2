use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::FailurePolicy;

/// 被略過的資料列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 資料列編號（從 1 開始）
    pub line: u64,
    /// 原始時間戳
    pub value: String,
    /// 原因
    pub reason: String,
}

/// 匯入報告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionReport {
    /// 來源檔案
    pub source: PathBuf,
    /// 失敗策略
    pub policy: FailurePolicy,
    /// 開始時間
    pub started_at: DateTime<Utc>,
    /// 結束時間
    pub finished_at: DateTime<Utc>,
    /// 讀取列數
    pub rows_read: usize,
    /// 成功標準化的列數
    pub rows_normalized: usize,
    /// 略過的列數
    pub rows_skipped: usize,
    /// 寫入資料表的筆數（聚合後）
    pub records_written: u64,
    /// 略過明細
    pub skipped: Vec<SkippedRow>,
}

impl IngestionReport {
    /// 創建新的匯入報告
    pub fn new(source: impl Into<PathBuf>, policy: FailurePolicy) -> Self {
        let now = Utc::now();
        Self {
            source: source.into(),
            policy,
            started_at: now,
            finished_at: now,
            rows_read: 0,
            rows_normalized: 0,
            rows_skipped: 0,
            records_written: 0,
            skipped: Vec::new(),
        }
    }

    /// 完成報告
    pub fn finish(mut self, records_written: u64) -> Self {
        self.records_written = records_written;
        self.finished_at = Utc::now();
        self
    }

    /// 添加成功記錄
    pub fn add_success(&mut self) {
        self.rows_read += 1;
        self.rows_normalized += 1;
    }

    /// 添加略過記錄
    pub fn add_skipped(&mut self, line: u64, value: impl Into<String>, reason: impl Into<String>) {
        self.rows_read += 1;
        self.rows_skipped += 1;
        self.skipped.push(SkippedRow {
            line,
            value: value.into(),
            reason: reason.into(),
        });
    }

    /// 獲取成功率
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            self.rows_normalized as f64 / self.rows_read as f64
        }
    }

    /// 是否有略過的資料列
    pub fn has_skipped(&self) -> bool {
        self.rows_skipped > 0
    }

    /// 獲取執行時間（毫秒）
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// 生成摘要
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "來源 {}：讀取 {} 列，標準化 {} 列，略過 {} 列，寫入 {} 筆（{:.2}%，{}ms）",
            self.source.display(),
            self.rows_read,
            self.rows_normalized,
            self.rows_skipped,
            self.records_written,
            self.success_rate() * 100.0,
            self.duration_ms()
        );

        for row in &self.skipped {
            summary.push_str(&format!("\n  第 {} 列 {:?}: {}", row.line, row.value, row.reason));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = IngestionReport::new("dailycheckins.csv", FailurePolicy::SkipAndLog);
        report.add_success();
        report.add_success();
        report.add_success();
        report.add_skipped(4, "not-a-date", "時間戳格式無法辨識");

        let report = report.finish(2);

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_normalized, 3);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.records_written, 2);
        assert!(report.has_skipped());
        assert_eq!(report.success_rate(), 0.75);
        assert_eq!(report.skipped[0].line, 4);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_empty_report() {
        let report = IngestionReport::new("dailycheckins.csv", FailurePolicy::FailFast).finish(0);
        assert_eq!(report.success_rate(), 0.0);
        assert!(!report.has_skipped());
    }

    #[test]
    fn test_summary_lists_skipped_rows() {
        let mut report = IngestionReport::new("in.csv", FailurePolicy::SkipAndLog);
        report.add_skipped(7, "yesterday", "時間戳格式無法辨識");
        let summary = report.finish(0).summary();

        assert!(summary.contains("略過 1 列"));
        assert!(summary.contains("第 7 列 \"yesterday\""));
    }

    #[test]
    fn test_report_serializes() {
        let report = IngestionReport::new("in.csv", FailurePolicy::SkipAndLog).finish(0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "skip_and_log");
        assert_eq!(json["rows_read"], 0);
    }
}
