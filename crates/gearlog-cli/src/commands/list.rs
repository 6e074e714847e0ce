use std::path::Path;

use crate::commands::common::{
    equipment_to_list_item, format_equipment_lines, open_service, EquipmentListItem,
};
use crate::error::CliError;

pub async fn run_list(limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let equipment = service.list_equipment(limit, 0).await?;

    if as_json {
        let items = equipment
            .iter()
            .map(equipment_to_list_item)
            .collect::<Vec<EquipmentListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_equipment_lines(&equipment) {
            println!("{line}");
        }
    }

    Ok(())
}
