mod common;

use assert_matches::assert_matches;
use checkin_etl::config::FailurePolicy;
use checkin_etl::data_ingestion::{
    DataLoader, IngestionError, IngestionPipeline, SourceLocation, TimestampNormalizer,
};
use checkin_etl::domain_types::AggregatedCheckInRecord;
use checkin_etl::storage::{self, CheckInRepository, StorageError, CHECK_IN_TABLE};
use chrono::{TimeZone, Utc};
use common::{TestWorkspace, SAMPLE_CSV};
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn pipeline_for(ws: &TestWorkspace, source: PathBuf) -> IngestionPipeline {
    IngestionPipeline::new(
        DataLoader::new(SourceLocation::Explicit(source)),
        TimestampNormalizer::default(),
        ws.database_config(),
    )
}

async fn stored(ws: &TestWorkspace) -> Vec<AggregatedCheckInRecord> {
    let pool = ws.pool().await;
    let rows = CheckInRepository::new(pool.clone()).list_all().await.unwrap();
    pool.close().await;
    rows
}

#[tokio::test]
async fn test_end_to_end_load() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);

    let report = pipeline_for(&ws, source.clone()).run().await.unwrap();
    assert_eq!(report.source, source);
    assert_eq!(report.rows_read, 6);
    assert_eq!(report.rows_skipped, 0);
    assert_eq!(report.records_written, 4);

    let rows = stored(&ws).await;
    let at = |d, h, m| Utc.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap();
    let expected = vec![
        AggregatedCheckInRecord {
            user: "alice".into(),
            timestamp: at(1, 14, 30),
            hours: dec!(7.5),
            project: "apollo".into(),
        },
        AggregatedCheckInRecord {
            user: "alice".into(),
            timestamp: at(1, 14, 30),
            hours: dec!(2),
            project: "hermes".into(),
        },
        AggregatedCheckInRecord {
            user: "bob".into(),
            timestamp: at(15, 9, 0),
            hours: dec!(8.25),
            project: "apollo".into(),
        },
        AggregatedCheckInRecord {
            user: "carol".into(),
            timestamp: at(2, 15, 0),
            hours: dec!(1.75),
            project: "zeus".into(),
        },
    ];
    assert_eq!(rows, expected);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);
    let pipeline = pipeline_for(&ws, source);

    pipeline.run().await.unwrap();
    let first = stored(&ws).await;
    pipeline.run().await.unwrap();
    let second = stored(&ws).await;

    assert_eq!(first, second);
    assert_eq!(second.len(), 4);
}

#[tokio::test]
async fn test_new_source_replaces_table() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);
    pipeline_for(&ws, source.clone()).run().await.unwrap();

    ws.write_source("user,timestamp,hours,project\ndave,2024-04-01 08:00:00 UTC,6,atlas\n");
    let report = pipeline_for(&ws, source).run().await.unwrap();
    assert_eq!(report.records_written, 1);

    let rows = stored(&ws).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user, "dave");
}

#[tokio::test]
async fn test_unparseable_timestamp_leaves_table_untouched() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);
    pipeline_for(&ws, source.clone()).run().await.unwrap();
    let before = stored(&ws).await;

    ws.write_source(
        "user,timestamp,hours,project\n\
         dave,2024-04-01 08:00:00 UTC,6,atlas\n\
         erin,not-a-date,2,atlas\n",
    );
    let result = pipeline_for(&ws, source).run().await;
    assert_matches!(
        result,
        Err(IngestionError::Format { line: 2, ref value }) if value == "not-a-date"
    );

    assert_eq!(stored(&ws).await, before);
}

#[tokio::test]
async fn test_skip_and_log_loads_remaining_rows() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(
        "user,timestamp,hours,project\n\
         dave,2024-04-01 08:00:00 UTC,6,atlas\n\
         erin,not-a-date,2,atlas\n\
         dave,04/01/2024 08:00 AM,1.5,atlas\n",
    );

    let report = pipeline_for(&ws, source)
        .with_policy(FailurePolicy::SkipAndLog)
        .run()
        .await
        .unwrap();
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].value, "not-a-date");

    let rows = stored(&ws).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hours, dec!(7.5));
}

#[tokio::test]
async fn test_storage_failure_leaves_previous_table_readable() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);
    pipeline_for(&ws, source.clone()).run().await.unwrap();
    let before = stored(&ws).await;

    let pool = ws.pool().await;
    sqlx::query(
        r#"
        CREATE TRIGGER fail_on_boom BEFORE INSERT ON employee_check_in
        WHEN NEW."user" = 'boom'
        BEGIN
            SELECT RAISE(ABORT, 'simulated storage failure');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    ws.write_source(
        "user,timestamp,hours,project\n\
         dave,2024-04-01 08:00:00 UTC,6,atlas\n\
         boom,2024-04-01 09:00:00 UTC,1,atlas\n",
    );
    let result = pipeline_for(&ws, source).run().await;
    assert_matches!(result, Err(IngestionError::StorageWrite(StorageError::Database(_))));

    assert_eq!(stored(&ws).await, before);
}

#[tokio::test]
async fn test_missing_source_does_not_create_database() {
    let ws = TestWorkspace::new();
    let missing = ws.path().join("dailycheckins.csv");

    let result = pipeline_for(&ws, missing.clone()).run().await;
    assert_matches!(result, Err(IngestionError::SourceNotFound { path }) if path == missing);
    assert!(!ws.db_path().exists());
}

#[tokio::test]
async fn test_header_only_source_empties_table() {
    let ws = TestWorkspace::new();
    let source = ws.write_source(SAMPLE_CSV);
    pipeline_for(&ws, source.clone()).run().await.unwrap();

    ws.write_source("user,timestamp,hours,project\n");
    let report = pipeline_for(&ws, source).run().await.unwrap();
    assert_eq!(report.records_written, 0);
    assert!(stored(&ws).await.is_empty());
}

#[tokio::test]
async fn test_naive_timestamps_follow_configured_zone() {
    let ws = TestWorkspace::new();
    let source = ws.write_source("user,timestamp,hours,project\nalice,01 March 2024 12:00,1,apollo\n");

    IngestionPipeline::new(
        DataLoader::new(SourceLocation::Explicit(source)),
        TimestampNormalizer::new(chrono_tz::Europe::Moscow),
        ws.database_config(),
    )
    .run()
    .await
    .unwrap();

    let rows = stored(&ws).await;
    assert_eq!(rows[0].timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
}

#[tokio::test]
async fn test_first_run_failure_still_creates_schema() {
    let ws = TestWorkspace::new();
    let source = ws.write_source("user,timestamp,hours,project\nerin,not-a-date,2,atlas\n");

    let result = pipeline_for(&ws, source).run().await;
    assert_matches!(result, Err(IngestionError::Format { line: 1, .. }));
    assert!(ws.db_path().exists());

    let pool = storage::init_db_pool(&ws.database_config()).await.unwrap();
    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(CHECK_IN_TABLE)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(tables, 1);
    assert_eq!(CheckInRepository::new(pool.clone()).count().await.unwrap(), 0);
    pool.close().await;
}
