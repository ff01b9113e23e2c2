//! 匯入流程
//!
//! 來源 → 標準化 → 聚合 → 整表替換。單執行緒、一次跑完；
//! 同一個資料庫不應同時執行兩個匯入（需由排程端保證）。

use tracing::{info, warn};

use crate::config::{ApplicationConfig, DatabaseConfig, FailurePolicy, ValidationUtils};
use crate::data_ingestion::aggregator::aggregate;
use crate::data_ingestion::database_writer::load_into;
use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::data_ingestion::normalizer::TimestampNormalizer;
use crate::data_ingestion::processor::{CsvReaderConfig, DataLoader, SourceLocation};
use crate::data_ingestion::report::IngestionReport;
use crate::domain_types::{AggregatedCheckInRecord, NormalizedCheckInRecord, RawCheckInRecord};
use crate::storage::{init_db_pool, run_migrations, DatabasePool};

/// 打卡資料匯入流程
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    loader: DataLoader,
    normalizer: TimestampNormalizer,
    policy: FailurePolicy,
    database: DatabaseConfig,
}

impl IngestionPipeline {
    pub fn new(loader: DataLoader, normalizer: TimestampNormalizer, database: DatabaseConfig) -> Self {
        Self {
            loader,
            normalizer,
            policy: FailurePolicy::default(),
            database,
        }
    }

    /// 從應用程序配置建立
    pub fn from_config(config: &ApplicationConfig) -> IngestionResult<Self> {
        let naive_timezone = ValidationUtils::timezone(
            &config.ingestion.naive_timezone,
            "ingestion.naive_timezone",
        )
        .map_err(|e| IngestionError::Config(e.to_string()))?;

        let loader = DataLoader::new(config.source.location()).with_reader_config(CsvReaderConfig {
            separator: config.source.separator_byte(),
            ..CsvReaderConfig::default()
        });

        Ok(Self::new(
            loader,
            TimestampNormalizer::new(naive_timezone),
            config.database.clone(),
        )
        .with_policy(config.ingestion.failure_policy))
    }

    /// 設定失敗策略
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 覆寫來源位置
    pub fn with_source(mut self, location: SourceLocation) -> Self {
        self.loader = self.loader.with_location(location);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// 執行一次完整匯入
    ///
    /// 資料庫連線在此開啟，不論成功或失敗都會在回傳前關閉。
    pub async fn run(&self) -> IngestionResult<IngestionReport> {
        // 先確認來源存在，缺檔時不碰資料庫
        self.loader.locate()?;

        let pool = init_db_pool(&self.database)
            .await
            .map_err(IngestionError::StorageWrite)?;
        // 資料庫檔案一旦建立就帶有資料表，即使後續標準化失敗
        let outcome = match run_migrations(&pool).await {
            Ok(()) => self.run_with_pool(&pool).await,
            Err(e) => Err(IngestionError::StorageWrite(e)),
        };
        pool.close().await;

        outcome
    }

    /// 使用既有連接池執行匯入（連接池由呼叫端管理）
    pub async fn run_with_pool(&self, pool: &DatabasePool) -> IngestionResult<IngestionReport> {
        let (path, raw) = self.loader.load()?;
        let mut report = IngestionReport::new(path, self.policy);

        let aggregated = self.transform(raw, &mut report)?;
        info!(
            rows = report.rows_read,
            skipped = report.rows_skipped,
            records = aggregated.len(),
            "標準化與聚合完成"
        );

        let written = load_into(pool, &aggregated, self.database.batch_size).await?;
        let report = report.finish(written);
        info!("{}", report.summary());
        Ok(report)
    }

    /// 標準化並聚合，不涉及 I/O
    pub fn transform(
        &self,
        raw: Vec<RawCheckInRecord>,
        report: &mut IngestionReport,
    ) -> IngestionResult<Vec<AggregatedCheckInRecord>> {
        let normalized = self.normalize_all(raw, report)?;
        aggregate(normalized)
    }

    fn normalize_all(
        &self,
        raw: Vec<RawCheckInRecord>,
        report: &mut IngestionReport,
    ) -> IngestionResult<Vec<NormalizedCheckInRecord>> {
        let mut normalized = Vec::with_capacity(raw.len());

        for record in raw {
            let line = record.line;
            match self.normalizer.normalize_record(record) {
                Ok(record) => {
                    report.add_success();
                    normalized.push(record);
                }
                Err(e) => match self.policy {
                    FailurePolicy::FailFast => {
                        return Err(IngestionError::Format {
                            line,
                            value: e.value,
                        });
                    }
                    FailurePolicy::SkipAndLog => {
                        warn!(line, value = %e.value, "略過無法解析的時間戳");
                        let reason = e.to_string();
                        report.add_skipped(line, e.value, reason);
                    }
                },
            }
        }

        Ok(normalized)
    }
}
