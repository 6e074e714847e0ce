//! Compliance report helpers shared by the CLI and desktop clients.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{Equipment, Inspection, InspectionOutcome};

/// One day in milliseconds
const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Items due within this window are flagged before they lapse
const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Compliance state of one item relative to its inspection interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Inspected within the interval and passed
    Ok,
    /// Passing, but the next inspection is due within a week
    DueSoon,
    /// Interval lapsed, or the last inspection failed
    Overdue,
    /// No acknowledged inspection on record
    NeverInspected,
}

impl ComplianceStatus {
    /// Stable lowercase name used in exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::DueSoon => "due_soon",
            Self::Overdue => "overdue",
            Self::NeverInspected => "never_inspected",
        }
    }
}

/// One row of the compliance report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRow {
    pub equipment_id: String,
    pub serial: String,
    pub name: String,
    pub kind: String,
    pub status: ComplianceStatus,
    pub last_inspected_at: Option<i64>,
    pub last_outcome: Option<InspectionOutcome>,
    pub next_due_at: Option<i64>,
}

/// Compute the compliance status for one item.
///
/// A failed latest inspection is always `Overdue` - failed gear is out of
/// compliance regardless of timing.
#[must_use]
pub fn compliance_status(
    latest: Option<&Inspection>,
    interval_days: u32,
    now_ms: i64,
) -> ComplianceStatus {
    let Some(inspection) = latest else {
        return ComplianceStatus::NeverInspected;
    };
    if inspection.payload.outcome == InspectionOutcome::Fail {
        return ComplianceStatus::Overdue;
    }

    let due_at = next_due_at(inspection, interval_days);
    if now_ms >= due_at {
        ComplianceStatus::Overdue
    } else if now_ms >= due_at - DUE_SOON_WINDOW_DAYS * DAY_MS {
        ComplianceStatus::DueSoon
    } else {
        ComplianceStatus::Ok
    }
}

fn next_due_at(inspection: &Inspection, interval_days: u32) -> i64 {
    inspection
        .performed_at
        .saturating_add(i64::from(interval_days) * DAY_MS)
}

/// Build a report row for one item and its latest acknowledged inspection
#[must_use]
pub fn build_compliance_row(
    equipment: &Equipment,
    latest: Option<&Inspection>,
    now_ms: i64,
) -> ComplianceRow {
    ComplianceRow {
        equipment_id: equipment.id.to_string(),
        serial: equipment.serial.clone(),
        name: equipment.name.clone(),
        kind: equipment.kind.as_str().to_string(),
        status: compliance_status(latest, equipment.inspection_interval_days, now_ms),
        last_inspected_at: latest.map(|inspection| inspection.performed_at),
        last_outcome: latest.map(|inspection| inspection.payload.outcome),
        next_due_at: latest
            .map(|inspection| next_due_at(inspection, equipment.inspection_interval_days)),
    }
}

/// Render report rows as pretty-printed JSON
pub fn render_json_report(rows: &[ComplianceRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Render report rows as CSV with a header line
#[must_use]
pub fn render_csv_report(rows: &[ComplianceRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "equipment_id,serial,name,kind,status,last_inspected_at,last_outcome,next_due_at"
    );

    for row in rows {
        let _ = writeln!(
            output,
            "{},{},{},{},{},{},{},{}",
            row.equipment_id,
            csv_field(&row.serial),
            csv_field(&row.name),
            row.kind,
            row.status.as_str(),
            row.last_inspected_at.map_or(String::new(), |ts| ts.to_string()),
            row.last_outcome.map_or("", InspectionOutcome::as_str),
            row.next_due_at.map_or(String::new(), |ts| ts.to_string()),
        );
    }

    output
}

/// Quote a field when it contains CSV metacharacters
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CheckpointResult, EquipmentId, EquipmentKind, InspectionId, InspectionPayload,
    };
    use pretty_assertions::assert_eq;

    fn inspection(performed_at: i64, passed: bool) -> Inspection {
        Inspection {
            id: InspectionId::new(),
            equipment_id: EquipmentId::new(),
            payload: InspectionPayload::from_checkpoints(
                vec![CheckpointResult::new("Webbing", passed)],
                None,
                None,
            ),
            performed_at,
            recorded_at: performed_at,
        }
    }

    #[test]
    fn test_never_inspected() {
        assert_eq!(
            compliance_status(None, 90, 1_000),
            ComplianceStatus::NeverInspected
        );
    }

    #[test]
    fn test_status_boundaries() {
        let performed_at = 0;
        let inspection = inspection(performed_at, true);
        let interval = 90u32;
        let due_at = i64::from(interval) * DAY_MS;

        assert_eq!(
            compliance_status(Some(&inspection), interval, due_at - 10 * DAY_MS),
            ComplianceStatus::Ok
        );
        assert_eq!(
            compliance_status(Some(&inspection), interval, due_at - 3 * DAY_MS),
            ComplianceStatus::DueSoon
        );
        assert_eq!(
            compliance_status(Some(&inspection), interval, due_at),
            ComplianceStatus::Overdue
        );
    }

    #[test]
    fn test_failed_inspection_is_overdue_immediately() {
        let failed = inspection(0, false);
        assert_eq!(
            compliance_status(Some(&failed), 90, 1),
            ComplianceStatus::Overdue
        );
    }

    #[test]
    fn test_csv_rendering_escapes_fields() {
        let mut equipment =
            Equipment::new("HARN-1", "Harness, front \"D\" ring", EquipmentKind::Harness, 90);
        equipment.created_at = 0;
        let row = build_compliance_row(&equipment, None, 0);

        let csv = render_csv_report(&[row]);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("equipment_id,"));
        let line = lines.next().unwrap();
        assert!(line.contains("\"Harness, front \"\"D\"\" ring\""));
        assert!(line.contains("never_inspected"));
    }

    #[test]
    fn test_json_rendering_roundtrips() {
        let equipment = Equipment::new("HELM-2", "Site helmet", EquipmentKind::Helmet, 180);
        let latest = inspection(5 * DAY_MS, true);
        let row = build_compliance_row(&equipment, Some(&latest), 6 * DAY_MS);

        let json = render_json_report(std::slice::from_ref(&row)).unwrap();
        let parsed: Vec<ComplianceRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![row]);
    }
}
