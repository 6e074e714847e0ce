use std::path::Path;

use crate::commands::common::{build_sync_engine, open_service};
use crate::error::CliError;
use gearlog_core::offline::SyncOutcome;

pub async fn run_sync(db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let engine = build_sync_engine(&service)?.ok_or(CliError::SyncNotConfigured)?;

    match engine.sync().await? {
        SyncOutcome::Completed(report) => {
            println!(
                "Sync completed: {}/{} submitted, {} still queued",
                report.submitted,
                report.attempted,
                report.failed.len()
            );
        }
        SyncOutcome::Offline => println!("Offline; nothing submitted"),
        SyncOutcome::AlreadyRunning => println!("A sync pass is already running"),
    }
    Ok(())
}
