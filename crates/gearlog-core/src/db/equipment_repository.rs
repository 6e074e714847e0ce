//! Equipment repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT/OFFSET

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{
    is_valid_serial, normalize_serial, Equipment, EquipmentId, EquipmentKind, EquipmentStatus,
};

/// Trait for equipment storage operations
pub trait EquipmentRepository {
    /// Register a new piece of equipment
    fn create(
        &self,
        serial: &str,
        name: &str,
        kind: EquipmentKind,
        inspection_interval_days: u32,
    ) -> Result<Equipment>;

    /// Get an equipment record by ID
    fn get(&self, id: &EquipmentId) -> Result<Option<Equipment>>;

    /// Look up equipment by serial number (the QR code payload)
    fn find_by_serial(&self, serial: &str) -> Result<Option<Equipment>>;

    /// List equipment (excluding deleted), most recently updated first
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Equipment>>;

    /// Update the operational status of an item
    fn update_status(&self, id: &EquipmentId, status: EquipmentStatus) -> Result<Equipment>;

    /// Soft delete an item
    fn delete(&self, id: &EquipmentId) -> Result<()>;

    /// Insert or replace a record, used when refreshing from the backend catalog
    fn upsert(&self, equipment: &Equipment) -> Result<()>;
}

/// `SQLite` implementation of `EquipmentRepository`
pub struct SqliteEquipmentRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteEquipmentRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an equipment record from a database row
    fn parse_equipment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Equipment> {
        let id: String = row.get(0)?;
        let kind: String = row.get(3)?;
        let status: String = row.get(4)?;
        let interval: i64 = row.get(5)?;
        Ok(Equipment {
            id: id.parse().unwrap_or_default(),
            serial: row.get(1)?,
            name: row.get(2)?,
            kind: kind.parse().unwrap_or(EquipmentKind::Other),
            status: status.parse().unwrap_or(EquipmentStatus::Active),
            inspection_interval_days: u32::try_from(interval).unwrap_or(0),
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
            is_deleted: row.get::<_, i32>(8)? != 0,
        })
    }
}

const EQUIPMENT_COLUMNS: &str =
    "id, serial, name, kind, status, inspection_interval_days, created_at, updated_at, is_deleted";

impl EquipmentRepository for SqliteEquipmentRepository<'_> {
    fn create(
        &self,
        serial: &str,
        name: &str,
        kind: EquipmentKind,
        inspection_interval_days: u32,
    ) -> Result<Equipment> {
        let serial = normalize_serial(serial);
        if !is_valid_serial(&serial) {
            return Err(Error::InvalidInput(format!(
                "Invalid serial number: {serial}"
            )));
        }
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Equipment name is required".into()));
        }
        if self.find_by_serial(&serial)?.is_some() {
            return Err(Error::InvalidInput(format!(
                "Serial already registered: {serial}"
            )));
        }

        let equipment = Equipment::new(serial, name.trim(), kind, inspection_interval_days);
        self.upsert(&equipment)?;
        Ok(equipment)
    }

    fn get(&self, id: &EquipmentId) -> Result<Option<Equipment>> {
        let result = self.conn.query_row(
            &format!("SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE id = ? AND is_deleted = 0"),
            params![id.as_str()],
            Self::parse_equipment,
        );

        match result {
            Ok(equipment) => Ok(Some(equipment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_serial(&self, serial: &str) -> Result<Option<Equipment>> {
        let serial = normalize_serial(serial);
        let result = self.conn.query_row(
            &format!(
                "SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE serial = ? AND is_deleted = 0"
            ),
            params![serial],
            Self::parse_equipment,
        );

        match result {
            Ok(equipment) => Ok(Some(equipment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Equipment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EQUIPMENT_COLUMNS}
             FROM equipment
             WHERE is_deleted = 0
             ORDER BY updated_at DESC
             LIMIT ? OFFSET ?"
        ))?;

        let equipment = stmt
            .query_map(params![limit as i64, offset as i64], Self::parse_equipment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(equipment)
    }

    fn update_status(&self, id: &EquipmentId, status: EquipmentStatus) -> Result<Equipment> {
        let now = chrono::Utc::now().timestamp_millis();

        let rows = self.conn.execute(
            "UPDATE equipment SET status = ?, updated_at = ? WHERE id = ? AND is_deleted = 0",
            params![status.as_str(), now, id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn delete(&self, id: &EquipmentId) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();

        let rows = self.conn.execute(
            "UPDATE equipment SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
            params![now, id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn upsert(&self, equipment: &Equipment) -> Result<()> {
        self.conn.execute(
            "INSERT INTO equipment
                (id, serial, name, kind, status, inspection_interval_days,
                 created_at, updated_at, is_deleted)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                serial = excluded.serial,
                name = excluded.name,
                kind = excluded.kind,
                status = excluded.status,
                inspection_interval_days = excluded.inspection_interval_days,
                updated_at = excluded.updated_at,
                is_deleted = excluded.is_deleted",
            params![
                equipment.id.as_str(),
                equipment.serial,
                equipment.name,
                equipment.kind.as_str(),
                equipment.status.as_str(),
                i64::from(equipment.inspection_interval_days),
                equipment.created_at,
                equipment.updated_at,
                i32::from(equipment.is_deleted)
            ],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        let equipment = repo
            .create("harn-2024-001", "Front harness", EquipmentKind::Harness, 90)
            .unwrap();
        assert_eq!(equipment.serial, "HARN-2024-001");

        let fetched = repo.get(&equipment.id).unwrap().unwrap();
        assert_eq!(fetched, equipment);
    }

    #[test]
    fn test_create_rejects_bad_serial() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        assert!(repo
            .create("no spaces", "Helmet", EquipmentKind::Helmet, 180)
            .is_err());
        assert!(repo.create("X", "Helmet", EquipmentKind::Helmet, 180).is_err());
    }

    #[test]
    fn test_create_rejects_duplicate_serial() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        repo.create("HELM-1", "Helmet A", EquipmentKind::Helmet, 180)
            .unwrap();
        let duplicate = repo.create("helm-1", "Helmet B", EquipmentKind::Helmet, 180);
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_find_by_serial_is_case_insensitive() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        let equipment = repo
            .create("LANY-42", "Shock lanyard", EquipmentKind::Lanyard, 90)
            .unwrap();

        let found = repo.find_by_serial(" lany-42 ").unwrap().unwrap();
        assert_eq!(found.id, equipment.id);
        assert!(repo.find_by_serial("LANY-43").unwrap().is_none());
    }

    #[test]
    fn test_update_status() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        let equipment = repo
            .create("GLOV-7", "Rigger gloves", EquipmentKind::Gloves, 30)
            .unwrap();
        let updated = repo
            .update_status(&equipment.id, EquipmentStatus::Maintenance)
            .unwrap();

        assert_eq!(updated.status, EquipmentStatus::Maintenance);
        assert!(updated.updated_at >= equipment.updated_at);
    }

    #[test]
    fn test_soft_delete() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        let equipment = repo
            .create("HELM-9", "Old helmet", EquipmentKind::Helmet, 180)
            .unwrap();
        repo.delete(&equipment.id).unwrap();

        assert!(repo.get(&equipment.id).unwrap().is_none());
        assert!(repo.find_by_serial("HELM-9").unwrap().is_none());
        assert!(repo.list(10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_refreshes_existing() {
        let db = setup();
        let repo = SqliteEquipmentRepository::new(db.connection());

        let mut equipment = repo
            .create("HARN-5", "Harness", EquipmentKind::Harness, 90)
            .unwrap();
        equipment.name = "Harness (relabeled)".to_string();
        equipment.updated_at += 1;
        repo.upsert(&equipment).unwrap();

        let fetched = repo.get(&equipment.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Harness (relabeled)");
        assert_eq!(repo.list(10, 0).unwrap().len(), 1);
    }
}
