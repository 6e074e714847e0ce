use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] gearlog_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Equipment not found for serial/id: {0}")]
    EquipmentNotFound(String),
    #[error("Invalid checkpoint '{0}': expected NAME=pass or NAME=fail")]
    InvalidCheckpoint(String),
    #[error("At least one --checkpoint is required")]
    NoCheckpoints,
    #[error("Queue entry not found: {0}")]
    QueueEntryNotFound(String),
    #[error(
        "Sync is not configured. Set GEARLOG_BACKEND_URL and GEARLOG_API_KEY to enable submissions."
    )]
    SyncNotConfigured,
}
