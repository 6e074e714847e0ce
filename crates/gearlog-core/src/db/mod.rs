//! Database layer for Gearlog

mod connection;
mod equipment_repository;
mod inspection_repository;
mod migrations;
mod queue_repository;

pub use connection::Database;
pub use equipment_repository::{EquipmentRepository, SqliteEquipmentRepository};
pub use inspection_repository::{InspectionLogRepository, SqliteInspectionLogRepository};
pub use queue_repository::{InspectionQueueRepository, SqliteInspectionQueueRepository};
