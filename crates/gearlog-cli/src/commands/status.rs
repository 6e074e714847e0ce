use std::path::Path;

use crate::cli::StatusArg;
use crate::commands::common::{open_service, resolve_equipment};
use crate::error::CliError;
use gearlog_core::models::EquipmentStatus;

impl StatusArg {
    pub const fn into_status(self) -> EquipmentStatus {
        match self {
            Self::Active => EquipmentStatus::Active,
            Self::Maintenance => EquipmentStatus::Maintenance,
            Self::Retired => EquipmentStatus::Retired,
        }
    }
}

pub async fn run_status(
    reference: &str,
    status: StatusArg,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let equipment = resolve_equipment(&service, reference).await?;
    let updated = service
        .set_equipment_status(&equipment.id, status.into_status())
        .await?;

    println!("{} is now {}", updated.serial, updated.status);
    Ok(())
}
