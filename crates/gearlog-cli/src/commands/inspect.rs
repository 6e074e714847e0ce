use std::path::Path;

use crate::commands::common::{
    build_sync_engine, open_service, parse_checkpoint, resolve_equipment,
};
use crate::error::CliError;
use gearlog_core::models::InspectionPayload;
use gearlog_core::offline::SyncOutcome;

pub async fn run_inspect(
    reference: &str,
    raw_checkpoints: &[String],
    notes: Option<String>,
    inspector: Option<String>,
    offline: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    if raw_checkpoints.is_empty() {
        return Err(CliError::NoCheckpoints);
    }
    let checkpoints = raw_checkpoints
        .iter()
        .map(|raw| parse_checkpoint(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let service = open_service(db_path)?;
    let equipment = resolve_equipment(&service, reference).await?;

    let payload = InspectionPayload::from_checkpoints(checkpoints, notes, inspector);
    let queued = service.capture_inspection(&equipment.id, &payload).await?;
    println!(
        "Captured {} inspection for {} ({})",
        payload.outcome, equipment.serial, queued.id
    );

    if offline {
        println!("Queued for later sync (--offline)");
        return Ok(());
    }

    // Opportunistic submission; a failure just leaves the entry queued
    match build_sync_engine(&service)? {
        Some(engine) => match engine.sync().await? {
            SyncOutcome::Completed(report) if report.failed.is_empty() => {
                println!("Synced ({} submitted)", report.submitted);
            }
            SyncOutcome::Completed(report) => {
                println!(
                    "Partially synced: {} submitted, {} still queued",
                    report.submitted,
                    report.failed.len()
                );
            }
            SyncOutcome::Offline | SyncOutcome::AlreadyRunning => {
                println!("Sync unavailable; inspection stays queued");
            }
        },
        None => {
            let pending = service.pending_count().await?;
            println!("No backend configured; {pending} inspection(s) queued locally");
        }
    }

    Ok(())
}
