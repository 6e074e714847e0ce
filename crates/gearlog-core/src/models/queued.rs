//! Queued inspection model - offline captures awaiting backend acknowledgment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::equipment::EquipmentId;
use super::inspection::InspectionPayload;

/// A unique identifier for a queued inspection, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuedInspectionId(Uuid);

impl QueuedInspectionId {
    /// Create a new unique queue entry ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for QueuedInspectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueuedInspectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueuedInspectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Per-entry sync state.
///
/// In-memory only - it is never persisted, so every entry reloads as
/// `Pending` after a restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Pending,
    Syncing,
    Failed,
}

/// An inspection captured locally and not yet acknowledged by the backend.
///
/// Presence in the queue is the invariant: once the backend confirms the
/// write, the entry is deleted. `equipment_id` is not validated locally -
/// the backend owns referential integrity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedInspection {
    /// Locally generated identifier, unique within the queue, never reused
    pub id: QueuedInspectionId,
    /// The PPE item being inspected
    pub equipment_id: EquipmentId,
    /// Captured inspection data, immutable once stored
    pub payload: InspectionPayload,
    /// Timestamp of local capture (Unix ms), used for ordering
    pub created_at: i64,
    /// Transient sync state, reset to `Pending` on reload
    #[serde(skip)]
    pub sync_state: SyncState,
}

impl QueuedInspection {
    /// Create a queue entry with `created_at` set to now
    #[must_use]
    pub fn new(equipment_id: EquipmentId, payload: InspectionPayload) -> Self {
        Self {
            id: QueuedInspectionId::new(),
            equipment_id,
            payload,
            created_at: chrono::Utc::now().timestamp_millis(),
            sync_state: SyncState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::{CheckpointResult, InspectionPayload};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_queued_ids_unique() {
        assert_ne!(QueuedInspectionId::new(), QueuedInspectionId::new());
    }

    #[test]
    fn test_sync_state_not_serialized() {
        let mut queued = QueuedInspection::new(
            EquipmentId::new(),
            InspectionPayload::from_checkpoints(
                vec![CheckpointResult::new("Shell", true)],
                None,
                None,
            ),
        );
        queued.sync_state = SyncState::Failed;

        let json = serde_json::to_string(&queued).unwrap();
        let reloaded: QueuedInspection = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.sync_state, SyncState::Pending);
    }
}
