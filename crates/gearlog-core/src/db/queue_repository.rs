//! Offline inspection queue (the local store)
//!
//! Holds inspections captured while the backend is unreachable. An entry's
//! presence means the backend has not acknowledged it; entries are removed
//! only after a confirmed successful submission.

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{EquipmentId, InspectionPayload, QueuedInspection, QueuedInspectionId};

/// Trait for queued-inspection storage operations
pub trait InspectionQueueRepository {
    /// Persist a newly captured inspection.
    ///
    /// Storage failures (e.g. disk full) are returned to the caller rather
    /// than swallowed.
    fn store(
        &self,
        equipment_id: &EquipmentId,
        payload: &InspectionPayload,
    ) -> Result<QueuedInspection>;

    /// All queued entries in creation order. Does not mutate state.
    fn list(&self) -> Result<Vec<QueuedInspection>>;

    /// Delete the entry with the given id.
    ///
    /// A no-op (not an error) when the id is absent, so retries stay
    /// idempotent.
    fn remove(&self, id: &QueuedInspectionId) -> Result<()>;

    /// Number of queued entries
    fn count(&self) -> Result<usize>;
}

/// `SQLite` implementation of `InspectionQueueRepository`
pub struct SqliteInspectionQueueRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteInspectionQueueRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<QueuedInspection> {
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
        Ok(QueuedInspection {
            id: id.parse().unwrap_or_default(),
            equipment_id: equipment_id.parse().unwrap_or_default(),
            payload,
            created_at: row.get(3)?,
            // sync_state is transient: everything reloads as Pending
            sync_state: crate::models::SyncState::Pending,
        })
    }
}

impl InspectionQueueRepository for SqliteInspectionQueueRepository<'_> {
    fn store(
        &self,
        equipment_id: &EquipmentId,
        payload: &InspectionPayload,
    ) -> Result<QueuedInspection> {
        let queued = QueuedInspection::new(*equipment_id, payload.clone());
        let serialized = serde_json::to_string(&queued.payload)?;

        self.conn.execute(
            "INSERT INTO inspection_queue (id, equipment_id, payload, created_at)
             VALUES (?, ?, ?, ?)",
            params![
                queued.id.as_str(),
                queued.equipment_id.as_str(),
                serialized,
                queued.created_at
            ],
        )?;

        Ok(queued)
    }

    fn list(&self) -> Result<Vec<QueuedInspection>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, equipment_id, payload, created_at
             FROM inspection_queue
             ORDER BY created_at ASC, id ASC",
        )?;

        let entries = stmt
            .query_map([], Self::parse_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    fn remove(&self, id: &QueuedInspectionId) -> Result<()> {
        self.conn.execute(
            "DELETE FROM inspection_queue WHERE id = ?",
            params![id.as_str()],
        )?;
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM inspection_queue", [], |row| {
                    row.get(0)
                })?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{CheckpointResult, SyncState};
    use pretty_assertions::assert_eq;

    fn payload(checkpoint: &str, passed: bool) -> InspectionPayload {
        InspectionPayload::from_checkpoints(
            vec![CheckpointResult::new(checkpoint, passed)],
            None,
            None,
        )
    }

    #[test]
    fn test_list_preserves_creation_order() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionQueueRepository::new(db.connection());

        let first = repo
            .store(&EquipmentId::new(), &payload("Webbing", true))
            .unwrap();
        // Distinct capture timestamps keep the ordering assertion exact
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = repo
            .store(&EquipmentId::new(), &payload("Shell", true))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let third = repo
            .store(&EquipmentId::new(), &payload("Buckles", false))
            .unwrap();

        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn test_list_does_not_mutate() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionQueueRepository::new(db.connection());

        repo.store(&EquipmentId::new(), &payload("Webbing", true))
            .unwrap();

        assert_eq!(repo.list().unwrap().len(), 1);
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionQueueRepository::new(db.connection());

        let queued = repo
            .store(&EquipmentId::new(), &payload("Webbing", true))
            .unwrap();

        repo.remove(&queued.id).unwrap();
        // Second remove of the same id is a no-op, not an error
        repo.remove(&queued.id).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_payload_survives_reload() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionQueueRepository::new(db.connection());

        let original = payload("Stitching", false);
        let queued = repo.store(&EquipmentId::new(), &original).unwrap();

        let reloaded = repo.list().unwrap().remove(0);
        assert_eq!(reloaded.id, queued.id);
        assert_eq!(reloaded.payload, original);
        // Transient state resets to Pending
        assert_eq!(reloaded.sync_state, SyncState::Pending);
    }

    #[test]
    fn test_count_tracks_queue_size() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteInspectionQueueRepository::new(db.connection());

        assert_eq!(repo.count().unwrap(), 0);
        let queued = repo
            .store(&EquipmentId::new(), &payload("Webbing", true))
            .unwrap();
        repo.store(&EquipmentId::new(), &payload("Shell", true))
            .unwrap();
        assert_eq!(repo.count().unwrap(), 2);

        repo.remove(&queued.id).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }
}
