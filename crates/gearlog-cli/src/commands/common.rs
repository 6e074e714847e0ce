use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use gearlog_core::config::BackendConfig;
use gearlog_core::models::{CheckpointResult, Equipment, EquipmentId, QueuedInspection};
use gearlog_core::offline::{Connectivity, NetworkMonitor, SyncEngine};
use gearlog_core::remote::InspectionsApiClient;
use gearlog_core::services::GearlogService;

use crate::error::CliError;

/// Resolve the database path: explicit flag, else the platform data dir
pub fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gearlog")
            .join("gearlog.db")
    })
}

/// Open the shared service over the database at `db_path`
pub fn open_service(db_path: &Path) -> Result<GearlogService, CliError> {
    Ok(GearlogService::open_path(db_path)?)
}

/// Build the sync stack when the backend is configured.
///
/// The CLI has no connectivity events to subscribe to, so the monitor starts
/// online whenever a backend is configured; a submission failure simply
/// leaves the entry queued for the next run.
pub fn build_sync_engine(
    service: &GearlogService,
) -> Result<Option<Arc<SyncEngine<InspectionsApiClient>>>, CliError> {
    let Some(config) = BackendConfig::from_env()? else {
        return Ok(None);
    };
    let client = InspectionsApiClient::new(&config)?;
    tracing::info!("Sync enabled against {}", config.base_url);
    let monitor = Arc::new(NetworkMonitor::new(Connectivity::Online));
    Ok(Some(Arc::new(SyncEngine::new(
        service.database(),
        monitor,
        client,
    ))))
}

/// Resolve an equipment reference: serial number first, then ID
pub async fn resolve_equipment(
    service: &GearlogService,
    reference: &str,
) -> Result<Equipment, CliError> {
    if let Some(equipment) = service.find_equipment_by_serial(reference).await? {
        return Ok(equipment);
    }
    if let Ok(id) = reference.parse::<EquipmentId>() {
        if let Some(equipment) = service.get_equipment(&id).await? {
            return Ok(equipment);
        }
    }
    Err(CliError::EquipmentNotFound(reference.to_string()))
}

/// Parse a `NAME=pass` / `NAME=fail` checkpoint argument
pub fn parse_checkpoint(raw: &str) -> Result<CheckpointResult, CliError> {
    let (name, result) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidCheckpoint(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidCheckpoint(raw.to_string()));
    }
    let passed = match result.trim().to_lowercase().as_str() {
        "pass" | "ok" => true,
        "fail" => false,
        _ => return Err(CliError::InvalidCheckpoint(raw.to_string())),
    };
    Ok(CheckpointResult::new(name, passed))
}

/// Human-friendly relative time for listing output
pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let delta_secs = (now_ms.saturating_sub(timestamp_ms)) / 1000;
    match delta_secs {
        secs if secs < 60 => "just now".to_string(),
        secs if secs < 3600 => format!("{}m ago", secs / 60),
        secs if secs < 86_400 => format!("{}h ago", secs / 3600),
        secs => format!("{}d ago", secs / 86_400),
    }
}

#[derive(Debug, Serialize)]
pub struct EquipmentListItem {
    pub id: String,
    pub serial: String,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub interval_days: u32,
    pub updated_at: i64,
}

pub fn equipment_to_list_item(equipment: &Equipment) -> EquipmentListItem {
    EquipmentListItem {
        id: equipment.id.to_string(),
        serial: equipment.serial.clone(),
        name: equipment.name.clone(),
        kind: equipment.kind.as_str().to_string(),
        status: equipment.status.as_str().to_string(),
        interval_days: equipment.inspection_interval_days,
        updated_at: equipment.updated_at,
    }
}

pub fn format_equipment_lines(equipment: &[Equipment]) -> Vec<String> {
    equipment
        .iter()
        .map(|item| {
            format!(
                "{}  {:<16} {:<12} {:<12} {}",
                item.id,
                item.serial,
                item.kind.as_str(),
                item.status.as_str(),
                item.name
            )
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct QueueListItem {
    pub id: String,
    pub equipment_id: String,
    pub outcome: String,
    pub checkpoints: usize,
    pub created_at: i64,
    pub relative_time: String,
}

pub fn queued_to_list_item(entry: &QueuedInspection, now_ms: i64) -> QueueListItem {
    QueueListItem {
        id: entry.id.to_string(),
        equipment_id: entry.equipment_id.to_string(),
        outcome: entry.payload.outcome.as_str().to_string(),
        checkpoints: entry.payload.checkpoints.len(),
        created_at: entry.created_at,
        relative_time: format_relative_time(entry.created_at, now_ms),
    }
}

pub fn format_queue_lines(entries: &[QueuedInspection], now_ms: i64) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}  equipment={} outcome={} captured {}",
                entry.id,
                entry.equipment_id,
                entry.payload.outcome,
                format_relative_time(entry.created_at, now_ms)
            )
        })
        .collect()
}
