use anyhow::Context;
use asset_sync::import::{export_header, export_row, import_csv_and_wait, import_samples};
use asset_sync::mapper::to_remote_shape;
use asset_sync::setup_environment;
use clap::{Parser, Subcommand};
use shared::SyncResult;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asset-sync", version, about = "Asset register local/remote sync")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List local assets
    List,
    /// Import a facility spreadsheet exported as CSV
    Import { file: PathBuf },
    /// Export local assets as CSV
    Export { file: PathBuf },
    /// Add the sample facility assets
    Seed,
    /// Push pending records, then pull new remote records
    Sync,
    /// Push pending records only
    Push,
    /// Pull remote records missing locally
    Pull,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. 设置环境 (dotenv, 日志)
    let config = setup_environment();
    tracing::info!(db = %config.db_path, "Asset sync starting");

    // 2. 打开本地存储并组装服务
    let service = asset_sync::build_service(&config)
        .await
        .context("failed to initialize asset service")?;

    match cli.command {
        Command::List => {
            for asset in service.list_all().await? {
                println!(
                    "{:>6}  {:<24} {:<16} {:<24} {:<12} {}",
                    asset.id,
                    asset.name,
                    asset.category,
                    asset.location,
                    asset.status,
                    asset.sync_state
                );
            }
        }
        Command::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            // 等待后台推送完成, 否则 shutdown 会取消它们
            let (report, pushed) = import_csv_and_wait(&service, &content).await?;
            println!(
                "Imported {} assets ({} pushed), {} errors",
                report.imported_count, pushed, report.error_count
            );
            for error in &report.errors {
                println!("  {error}");
            }
        }
        Command::Export { file } => {
            let assets = service.list_all().await?;
            let mut lines = vec![export_header()];
            lines.extend(assets.iter().map(|a| export_row(&to_remote_shape(a))));
            std::fs::write(&file, lines.join("\n") + "\n")
                .with_context(|| format!("failed to write {}", file.display()))?;
            println!("Exported {} assets to {}", assets.len(), file.display());
        }
        Command::Seed => {
            let pushes = import_samples(&service).await?;
            let total = pushes.len();
            let mut pushed = 0;
            for push in pushes {
                if push.outcome().await {
                    pushed += 1;
                }
            }
            println!("Added {total} sample assets ({pushed} pushed)");
        }
        Command::Sync => print_result(&service.sync_all().await),
        Command::Push => print_result(&service.engine().push_pending().await),
        Command::Pull => {
            let report = service.engine().pull_new().await?;
            println!("Pulled {} new assets", report.inserted.len());
            for error in &report.errors {
                println!("  {error}");
            }
        }
    }

    service.shutdown();
    Ok(())
}

fn print_result(result: &SyncResult) {
    println!(
        "{}: {} synced, {} errors",
        if result.success { "OK" } else { "FAILED" },
        result.synced_count,
        result.error_count
    );
    for error in &result.errors {
        println!("  {error}");
    }
}
