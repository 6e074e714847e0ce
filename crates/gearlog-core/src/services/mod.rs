//! Shared application service used by the CLI and desktop clients.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{
    Database, EquipmentRepository, InspectionLogRepository, InspectionQueueRepository,
    SqliteEquipmentRepository, SqliteInspectionLogRepository, SqliteInspectionQueueRepository,
};
use crate::models::{
    Equipment, EquipmentId, EquipmentKind, EquipmentStatus, Inspection, InspectionPayload,
    QueuedInspection, QueuedInspectionId,
};
use crate::remote::InspectionsApiClient;
use crate::report::{build_compliance_row, ComplianceRow};
use crate::Result;

/// Thread-safe service wrapping the database for repository operations.
///
/// Both clients clone this cheaply; the database itself sits behind one
/// async mutex, and no lock is held across a network await.
#[derive(Clone)]
pub struct GearlogService {
    db: Arc<Mutex<Database>>,
}

impl GearlogService {
    /// Open a service over a database at the given filesystem path
    pub fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&db_path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open an in-memory service (primarily for tests)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Arc::new(Mutex::new(Database::open_in_memory()?)),
        })
    }

    /// The shared database handle, for wiring up a sync engine
    #[must_use]
    pub fn database(&self) -> Arc<Mutex<Database>> {
        Arc::clone(&self.db)
    }

    /// Register a new piece of equipment
    pub async fn add_equipment(
        &self,
        serial: &str,
        name: &str,
        kind: EquipmentKind,
        inspection_interval_days: u32,
    ) -> Result<Equipment> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).create(
            serial,
            name,
            kind,
            inspection_interval_days,
        )
    }

    /// List equipment, most recently updated first
    pub async fn list_equipment(&self, limit: usize, offset: usize) -> Result<Vec<Equipment>> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).list(limit, offset)
    }

    /// Get one equipment record by ID
    pub async fn get_equipment(&self, id: &EquipmentId) -> Result<Option<Equipment>> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).get(id)
    }

    /// Look up equipment by serial number - the QR code scan path
    pub async fn find_equipment_by_serial(&self, serial: &str) -> Result<Option<Equipment>> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).find_by_serial(serial)
    }

    /// Update the operational status of an item
    pub async fn set_equipment_status(
        &self,
        id: &EquipmentId,
        status: EquipmentStatus,
    ) -> Result<Equipment> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).update_status(id, status)
    }

    /// Soft delete an item
    pub async fn remove_equipment(&self, id: &EquipmentId) -> Result<()> {
        let db = self.db.lock().await;
        SqliteEquipmentRepository::new(db.connection()).delete(id)
    }

    /// Pull the backend equipment catalog into the local store.
    ///
    /// Returns the number of records upserted.
    pub async fn refresh_catalog(&self, client: &InspectionsApiClient) -> Result<usize> {
        let catalog = client.fetch_equipment().await?;
        let db = self.db.lock().await;
        let repo = SqliteEquipmentRepository::new(db.connection());
        for equipment in &catalog {
            repo.upsert(equipment)?;
        }
        Ok(catalog.len())
    }

    /// Capture an inspection into the offline queue.
    ///
    /// Always queues first - the sync engine drains opportunistically - so a
    /// crash or dropped connection can never lose an acknowledged capture.
    /// Storage errors are returned to the caller, not swallowed.
    pub async fn capture_inspection(
        &self,
        equipment_id: &EquipmentId,
        payload: &InspectionPayload,
    ) -> Result<QueuedInspection> {
        let db = self.db.lock().await;
        let queued =
            SqliteInspectionQueueRepository::new(db.connection()).store(equipment_id, payload)?;
        tracing::info!(
            "Queued inspection {} for equipment {}",
            queued.id,
            equipment_id
        );
        Ok(queued)
    }

    /// All queued inspections in creation order
    pub async fn pending_inspections(&self) -> Result<Vec<QueuedInspection>> {
        let db = self.db.lock().await;
        SqliteInspectionQueueRepository::new(db.connection()).list()
    }

    /// Number of queued inspections
    pub async fn pending_count(&self) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteInspectionQueueRepository::new(db.connection()).count()
    }

    /// Manually clear one queued entry (e.g. a poison item)
    pub async fn discard_pending(&self, id: &QueuedInspectionId) -> Result<()> {
        let db = self.db.lock().await;
        SqliteInspectionQueueRepository::new(db.connection()).remove(id)
    }

    /// Acknowledged inspection history for one item, most recent first
    pub async fn inspection_history(
        &self,
        equipment_id: &EquipmentId,
        limit: usize,
    ) -> Result<Vec<Inspection>> {
        let db = self.db.lock().await;
        SqliteInspectionLogRepository::new(db.connection()).list_for_equipment(equipment_id, limit)
    }

    /// Build compliance report rows for the whole inventory
    pub async fn compliance_report(&self) -> Result<Vec<ComplianceRow>> {
        const PAGE_SIZE: usize = 500;

        let now_ms = chrono::Utc::now().timestamp_millis();
        let db = self.db.lock().await;
        let equipment_repo = SqliteEquipmentRepository::new(db.connection());
        let log_repo = SqliteInspectionLogRepository::new(db.connection());

        let mut rows = Vec::new();
        let mut offset = 0usize;
        loop {
            let batch = equipment_repo.list(PAGE_SIZE, offset)?;
            let count = batch.len();
            for equipment in &batch {
                let latest = log_repo.latest_for_equipment(&equipment.id)?;
                rows.push(build_compliance_row(equipment, latest.as_ref(), now_ms));
            }
            if count < PAGE_SIZE {
                break;
            }
            offset += count;
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckpointResult;
    use crate::report::ComplianceStatus;
    use pretty_assertions::assert_eq;

    fn payload(passed: bool) -> InspectionPayload {
        InspectionPayload::from_checkpoints(
            vec![CheckpointResult::new("Webbing", passed)],
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_capture_increments_pending_count() {
        let service = GearlogService::open_in_memory().unwrap();
        let equipment = service
            .add_equipment("HARN-1", "Harness", EquipmentKind::Harness, 90)
            .await
            .unwrap();

        assert_eq!(service.pending_count().await.unwrap(), 0);
        service
            .capture_inspection(&equipment.id, &payload(true))
            .await
            .unwrap();
        assert_eq!(service.pending_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_discard_pending_is_idempotent() {
        let service = GearlogService::open_in_memory().unwrap();
        let queued = service
            .capture_inspection(&EquipmentId::new(), &payload(true))
            .await
            .unwrap();

        service.discard_pending(&queued.id).await.unwrap();
        service.discard_pending(&queued.id).await.unwrap();
        assert_eq!(service.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_serial_scan_path() {
        let service = GearlogService::open_in_memory().unwrap();
        let equipment = service
            .add_equipment("HELM-22", "Site helmet", EquipmentKind::Helmet, 180)
            .await
            .unwrap();

        let found = service
            .find_equipment_by_serial("helm-22")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, equipment.id);
    }

    #[tokio::test]
    async fn test_compliance_report_covers_inventory() {
        let service = GearlogService::open_in_memory().unwrap();
        service
            .add_equipment("HARN-1", "Harness", EquipmentKind::Harness, 90)
            .await
            .unwrap();
        service
            .add_equipment("HELM-1", "Helmet", EquipmentKind::Helmet, 180)
            .await
            .unwrap();

        let rows = service.compliance_report().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .all(|row| row.status == ComplianceStatus::NeverInspected));
    }
}
