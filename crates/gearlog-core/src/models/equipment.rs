//! Equipment model

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a piece of equipment, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentId(Uuid);

impl EquipmentId {
    /// Create a new unique equipment ID using UUID v7
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

impl Default for EquipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EquipmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Category of personal protective equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Harness,
    Helmet,
    Lanyard,
    Gloves,
    Other,
}

impl EquipmentKind {
    /// Stable lowercase name used in storage and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Harness => "harness",
            Self::Helmet => "helmet",
            Self::Lanyard => "lanyard",
            Self::Gloves => "gloves",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "harness" => Ok(Self::Harness),
            "helmet" => Ok(Self::Helmet),
            "lanyard" => Ok(Self::Lanyard),
            "gloves" => Ok(Self::Gloves),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown equipment kind: {other}")),
        }
    }
}

/// Operational status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Maintenance,
    Retired,
}

impl EquipmentStatus {
    /// Stable lowercase name used in storage and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "maintenance" => Ok(Self::Maintenance),
            "retired" => Ok(Self::Retired),
            other => Err(format!("Unknown equipment status: {other}")),
        }
    }
}

/// A tracked piece of personal protective equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique identifier
    pub id: EquipmentId,
    /// Serial number printed on the item, also the QR code payload
    pub serial: String,
    /// Human-readable name (e.g. "Petzl Avao harness #3")
    pub name: String,
    /// PPE category
    pub kind: EquipmentKind,
    /// Operational status
    pub status: EquipmentStatus,
    /// Days between mandatory inspections
    pub inspection_interval_days: u32,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
    /// Soft delete flag
    pub is_deleted: bool,
}

impl Equipment {
    /// Create a new active equipment record with the given serial and name
    #[must_use]
    pub fn new(
        serial: impl Into<String>,
        name: impl Into<String>,
        kind: EquipmentKind,
        inspection_interval_days: u32,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: EquipmentId::new(),
            serial: serial.into(),
            name: name.into(),
            kind,
            status: EquipmentStatus::Active,
            inspection_interval_days,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}

/// Normalize a serial number for storage and lookup.
///
/// Serials are compared case-insensitively; the canonical form is uppercase
/// with surrounding whitespace removed.
#[must_use]
pub fn normalize_serial(serial: &str) -> String {
    serial.trim().to_uppercase()
}

/// Validate a (normalized) serial number.
///
/// Valid serials match `[A-Z0-9][A-Z0-9-]{2,63}` - the character set QR
/// labels are printed with.
#[must_use]
pub fn is_valid_serial(serial: &str) -> bool {
    let re = Regex::new(r"^[A-Z0-9][A-Z0-9-]{2,63}$").expect("Invalid regex");
    re.is_match(serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equipment_id_unique() {
        let id1 = EquipmentId::new();
        let id2 = EquipmentId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_equipment_id_parse_roundtrip() {
        let id = EquipmentId::new();
        let parsed: EquipmentId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_normalize_serial() {
        assert_eq!(normalize_serial("  abc-123 "), "ABC-123");
    }

    #[test]
    fn test_serial_validation() {
        assert!(is_valid_serial("HARN-2024-001"));
        assert!(is_valid_serial("ABC"));
        assert!(!is_valid_serial("AB"));
        assert!(!is_valid_serial("-ABC"));
        assert!(!is_valid_serial("has space"));
        assert!(!is_valid_serial("lower-case"));
        assert!(!is_valid_serial(&"X".repeat(65)));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Helmet".parse::<EquipmentKind>(), Ok(EquipmentKind::Helmet));
        assert!("hat".parse::<EquipmentKind>().is_err());
    }

    #[test]
    fn test_new_equipment_defaults() {
        let equipment = Equipment::new("HARN-1", "Front harness", EquipmentKind::Harness, 90);
        assert_eq!(equipment.status, EquipmentStatus::Active);
        assert!(!equipment.is_deleted);
        assert_eq!(equipment.created_at, equipment.updated_at);
    }
}
