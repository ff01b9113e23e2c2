use anyhow::{Context, Result};
use checkin_etl::config;
use checkin_etl::storage::{self, migrations::embedded_migrations};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "migrate", about = "checkin-etl 數據庫遷移工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 運行所有未應用的遷移
    Run,

    /// 列出內嵌的遷移
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日誌系統
    tracing_subscriber::fmt()
        .with_env_filter("checkin_etl=info,migrate=info")
        .with_span_events(FmtSpan::CLOSE)
        .init();

    // 解析命令行參數
    let cli = Cli::parse();
    let app_config = config::init_config().context("無法加載應用程序配置")?;

    match cli.command {
        Commands::Run => {
            info!("開始運行資料庫遷移: {}", app_config.database.url);
            let pool = storage::init_db_pool(&app_config.database)
                .await
                .context("無法初始化資料庫連接池")?;
            let outcome = storage::run_migrations(&pool).await;
            pool.close().await;
            outcome.context("資料庫遷移執行失敗")?;
            info!("資料庫遷移完成！");
        }
        Commands::Status => {
            for (version, description) in embedded_migrations() {
                println!("{} {}", version, description);
            }
        }
    }

    Ok(())
}
