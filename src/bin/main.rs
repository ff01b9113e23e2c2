use anyhow::{Context, Result};
use checkin_etl::config::{self, ApplicationConfig, FailurePolicy};
use checkin_etl::data_ingestion::{IngestionPipeline, SourceLocation};
use checkin_etl::logging::init_logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "checkin_etl", about = "員工打卡資料匯入工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 執行一次完整匯入：讀取、標準化、聚合、整表替換
    Run {
        /// 來源 CSV 路徑（預設為執行檔旁的 dailycheckins.csv）
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// 無法解析時間戳的處理方式：fail_fast 或 skip_and_log
        #[arg(short, long)]
        policy: Option<FailurePolicy>,

        /// 以 JSON 輸出匯入報告
        #[arg(long)]
        report_json: bool,
    },

    /// 顯示目前生效的配置
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config().context("無法加載應用程序配置")?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    match cli.command {
        Commands::Run {
            source,
            policy,
            report_json,
        } => run(app_config, source, policy, report_json).await,
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(app_config)?);
            Ok(())
        }
    }
}

async fn run(
    app_config: &ApplicationConfig,
    source: Option<PathBuf>,
    policy: Option<FailurePolicy>,
    report_json: bool,
) -> Result<()> {
    let mut pipeline = IngestionPipeline::from_config(app_config)?;
    if let Some(path) = source {
        pipeline = pipeline.with_source(SourceLocation::Explicit(path));
    }
    if let Some(policy) = policy {
        pipeline = pipeline.with_policy(policy);
    }

    info!("開始匯入（策略: {}）", pipeline.policy());
    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("匯入失敗: {}", e);
            return Err(e).context("匯入中止，資料表未變更");
        }
    };

    if report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }

    Ok(())
}
