use std::path::Path;

use crate::commands::common::{format_queue_lines, open_service, queued_to_list_item, QueueListItem};
use crate::error::CliError;
use gearlog_core::models::QueuedInspectionId;

pub async fn run_queue_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let entries = service.pending_inspections().await?;
    let now_ms = chrono::Utc::now().timestamp_millis();

    if as_json {
        let items = entries
            .iter()
            .map(|entry| queued_to_list_item(entry, now_ms))
            .collect::<Vec<QueueListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Queue is empty.");
        return Ok(());
    }

    for line in format_queue_lines(&entries, now_ms) {
        println!("{line}");
    }
    println!("{} inspection(s) pending sync", entries.len());
    Ok(())
}

pub async fn run_queue_clear(raw_id: &str, db_path: &Path) -> Result<(), CliError> {
    let id = raw_id
        .parse::<QueuedInspectionId>()
        .map_err(|_| CliError::QueueEntryNotFound(raw_id.to_string()))?;

    let service = open_service(db_path)?;
    let known = service
        .pending_inspections()
        .await?
        .iter()
        .any(|entry| entry.id == id);
    if !known {
        return Err(CliError::QueueEntryNotFound(raw_id.to_string()));
    }

    service.discard_pending(&id).await?;
    println!("Dropped queued inspection {id}");
    Ok(())
}
