use std::path::Path;

use crate::cli::KindArg;
use crate::commands::common::open_service;
use crate::error::CliError;
use gearlog_core::models::EquipmentKind;

impl KindArg {
    pub const fn into_kind(self) -> EquipmentKind {
        match self {
            Self::Harness => EquipmentKind::Harness,
            Self::Helmet => EquipmentKind::Helmet,
            Self::Lanyard => EquipmentKind::Lanyard,
            Self::Gloves => EquipmentKind::Gloves,
            Self::Other => EquipmentKind::Other,
        }
    }
}

pub async fn run_add(
    serial: &str,
    name: &str,
    kind: KindArg,
    interval_days: u32,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let equipment = service
        .add_equipment(serial, name, kind.into_kind(), interval_days)
        .await?;

    println!("{}", equipment.id);
    Ok(())
}
