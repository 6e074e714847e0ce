//! Data models for Gearlog

mod equipment;
mod inspection;
mod queued;

pub use equipment::{
    is_valid_serial, normalize_serial, Equipment, EquipmentId, EquipmentKind, EquipmentStatus,
};
pub use inspection::{
    CheckpointResult, Inspection, InspectionId, InspectionOutcome, InspectionPayload,
};
pub use queued::{QueuedInspection, QueuedInspectionId, SyncState};
