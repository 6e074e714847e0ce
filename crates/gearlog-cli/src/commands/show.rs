use std::path::Path;

use serde::Serialize;

use crate::commands::common::{
    equipment_to_list_item, format_relative_time, open_service, resolve_equipment,
    EquipmentListItem,
};
use crate::error::CliError;
use gearlog_core::models::Inspection;

const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
struct ShowOutput {
    equipment: EquipmentListItem,
    history: Vec<HistoryItem>,
}

#[derive(Debug, Serialize)]
struct HistoryItem {
    outcome: String,
    performed_at: i64,
    inspector: Option<String>,
}

fn history_item(inspection: &Inspection) -> HistoryItem {
    HistoryItem {
        outcome: inspection.payload.outcome.as_str().to_string(),
        performed_at: inspection.performed_at,
        inspector: inspection.payload.inspector.clone(),
    }
}

pub async fn run_show(reference: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let equipment = resolve_equipment(&service, reference).await?;
    let history = service
        .inspection_history(&equipment.id, HISTORY_LIMIT)
        .await?;

    if as_json {
        let output = ShowOutput {
            equipment: equipment_to_list_item(&equipment),
            history: history.iter().map(history_item).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}  {}", equipment.serial, equipment.name);
    println!(
        "  id={} kind={} status={} interval={}d",
        equipment.id,
        equipment.kind,
        equipment.status,
        equipment.inspection_interval_days
    );

    if history.is_empty() {
        println!("  no acknowledged inspections on record");
    } else {
        let now_ms = chrono::Utc::now().timestamp_millis();
        for inspection in &history {
            println!(
                "  {} {} by {}",
                format_relative_time(inspection.performed_at, now_ms),
                inspection.payload.outcome,
                inspection.payload.inspector.as_deref().unwrap_or("unknown")
            );
        }
    }

    Ok(())
}
