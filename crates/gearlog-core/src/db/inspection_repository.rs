//! Local log of acknowledged inspections

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT/OFFSET

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{EquipmentId, Inspection, InspectionPayload};

/// Trait for the acknowledged-inspection log.
///
/// Entries land here only after the backend has confirmed the write, so
/// compliance reports can be computed without a network connection.
pub trait InspectionLogRepository {
    /// Append an acknowledged inspection
    fn record(&self, inspection: &Inspection) -> Result<()>;

    /// List inspections for one item, most recent first
    fn list_for_equipment(&self, equipment_id: &EquipmentId, limit: usize)
        -> Result<Vec<Inspection>>;

    /// Most recent inspection for one item
    fn latest_for_equipment(&self, equipment_id: &EquipmentId) -> Result<Option<Inspection>>;
}

/// `SQLite` implementation of `InspectionLogRepository`
pub struct SqliteInspectionLogRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteInspectionLogRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_inspection(row: &rusqlite::Row<'_>) -> rusqlite::Result<Inspection> {
        let id: String = row.get(0)?;
        let equipment_id: String = row.get(1)?;
        let payload: String = row.get(2)?;
        let payload: InspectionPayload = serde_json::from_str(&payload).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;
        Ok(Inspection {
            id: id.parse().unwrap_or_default(),
            equipment_id: equipment_id.parse().unwrap_or_default(),
            payload,
            performed_at: row.get(3)?,
            recorded_at: row.get(4)?,
        })
    }
}

impl InspectionLogRepository for SqliteInspectionLogRepository<'_> {
    fn record(&self, inspection: &Inspection) -> Result<()> {
        let payload = serde_json::to_string(&inspection.payload)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO inspections
                (id, equipment_id, payload, performed_at, recorded_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                inspection.id.as_str(),
                inspection.equipment_id.as_str(),
                payload,
                inspection.performed_at,
                inspection.recorded_at
            ],
        )?;
        Ok(())
    }

    fn list_for_equipment(
        &self,
        equipment_id: &EquipmentId,
        limit: usize,
    ) -> Result<Vec<Inspection>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, equipment_id, payload, performed_at, recorded_at
             FROM inspections
             WHERE equipment_id = ?
             ORDER BY performed_at DESC
             LIMIT ?",
        )?;

        let inspections = stmt
            .query_map(
                params![equipment_id.as_str(), limit as i64],
                Self::parse_inspection,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(inspections)
    }

    fn latest_for_equipment(&self, equipment_id: &EquipmentId) -> Result<Option<Inspection>> {
        Ok(self.list_for_equipment(equipment_id, 1)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{CheckpointResult, InspectionId, InspectionOutcome};
    use pretty_assertions::assert_eq;

    fn sample(equipment_id: EquipmentId, performed_at: i64) -> Inspection {
        Inspection {
            id: InspectionId::new(),
            equipment_id,
            payload: InspectionPayload::from_checkpoints(
                vec![CheckpointResult::new("Webbing", true)],
                None,
                Some("JW".to_string()),
            ),
            performed_at,
            recorded_at: performed_at,
        }
    }

    #[test]
    fn test_record_and_list() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionLogRepository::new(db.connection());
        let equipment_id = EquipmentId::new();

        repo.record(&sample(equipment_id, 1_000)).unwrap();
        repo.record(&sample(equipment_id, 3_000)).unwrap();
        repo.record(&sample(EquipmentId::new(), 2_000)).unwrap();

        let inspections = repo.list_for_equipment(&equipment_id, 10).unwrap();
        assert_eq!(inspections.len(), 2);
        assert_eq!(inspections[0].performed_at, 3_000);
        assert_eq!(inspections[0].payload.outcome, InspectionOutcome::Pass);
    }

    #[test]
    fn test_latest_for_equipment() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionLogRepository::new(db.connection());
        let equipment_id = EquipmentId::new();

        assert!(repo.latest_for_equipment(&equipment_id).unwrap().is_none());

        repo.record(&sample(equipment_id, 1_000)).unwrap();
        repo.record(&sample(equipment_id, 5_000)).unwrap();

        let latest = repo.latest_for_equipment(&equipment_id).unwrap().unwrap();
        assert_eq!(latest.performed_at, 5_000);
    }

    #[test]
    fn test_record_is_idempotent_per_id() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionLogRepository::new(db.connection());
        let equipment_id = EquipmentId::new();

        let inspection = sample(equipment_id, 1_000);
        repo.record(&inspection).unwrap();
        repo.record(&inspection).unwrap();

        assert_eq!(repo.list_for_equipment(&equipment_id, 10).unwrap().len(), 1);
    }
}
