//! Inspection models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::equipment::EquipmentId;

/// A unique identifier for an inspection, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InspectionId(Uuid);

impl InspectionId {
    /// Create a new unique inspection ID using UUID v7
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

impl Default for InspectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InspectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InspectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Result of a single checkpoint evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointResult {
    /// Checkpoint name (e.g. "Stitching", "Buckles")
    pub name: String,
    /// Whether the checkpoint passed
    pub passed: bool,
    /// Optional inspector note for this checkpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CheckpointResult {
    /// Create a checkpoint result without a note
    #[must_use]
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
            note: None,
        }
    }
}

/// Overall inspection outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionOutcome {
    Pass,
    Fail,
}

impl InspectionOutcome {
    /// Stable lowercase name used in storage and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for InspectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inspection data captured at submission time.
///
/// Immutable once stored; serialized as an opaque JSON blob when queued
/// offline and when submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionPayload {
    /// Checkpoint-by-checkpoint results
    pub checkpoints: Vec<CheckpointResult>,
    /// Overall pass/fail outcome
    pub outcome: InspectionOutcome,
    /// Free-form inspection notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Name or initials of the inspector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<String>,
}

impl InspectionPayload {
    /// Build a payload, deriving the overall outcome from the checkpoints.
    ///
    /// The inspection fails when any checkpoint failed; an inspection with
    /// no checkpoints passes (visual-only check).
    #[must_use]
    pub fn from_checkpoints(
        checkpoints: Vec<CheckpointResult>,
        notes: Option<String>,
        inspector: Option<String>,
    ) -> Self {
        let outcome = if checkpoints.iter().any(|checkpoint| !checkpoint.passed) {
            InspectionOutcome::Fail
        } else {
            InspectionOutcome::Pass
        };
        Self {
            checkpoints,
            outcome,
            notes,
            inspector,
        }
    }
}

/// An inspection acknowledged by the backend, kept in the local log so
/// compliance reports work offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    /// Unique identifier
    pub id: InspectionId,
    /// The PPE item that was inspected
    pub equipment_id: EquipmentId,
    /// Captured inspection data
    pub payload: InspectionPayload,
    /// When the inspection was performed (Unix ms)
    pub performed_at: i64,
    /// When the record landed in the local log (Unix ms)
    pub recorded_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_derived_from_checkpoints() {
        let payload = InspectionPayload::from_checkpoints(
            vec![
                CheckpointResult::new("Webbing", true),
                CheckpointResult::new("Stitching", false),
            ],
            None,
            None,
        );
        assert_eq!(payload.outcome, InspectionOutcome::Fail);
    }

    #[test]
    fn test_empty_checkpoints_pass() {
        let payload = InspectionPayload::from_checkpoints(vec![], None, None);
        assert_eq!(payload.outcome, InspectionOutcome::Pass);
    }

    #[test]
    fn test_payload_json_roundtrip() {
        let payload = InspectionPayload::from_checkpoints(
            vec![CheckpointResult::new("Buckles", true)],
            Some("minor scuffing".to_string()),
            Some("JW".to_string()),
        );
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: InspectionPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload, parsed);
    }
}
