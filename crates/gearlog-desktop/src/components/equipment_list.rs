//! Equipment list component

use dioxus::prelude::*;

use super::EquipmentCard;
use crate::state::AppState;

/// List of registered equipment
#[component]
pub fn EquipmentList() -> Element {
    let mut state = use_context::<AppState>();
    let equipment = (state.equipment)();
    let current_id = (state.selected_equipment_id)();

    rsx! {
        div {
            class: "equipment-list",
            style: "
                width: 300px;
                border-right: 1px solid #e0e0e0;
                overflow-y: auto;
                background: white;
            ",

            if equipment.is_empty() {
                div {
                    style: "
                        padding: 20px;
                        text-align: center;
                        color: #90a4ae;
                    ",
                    "No equipment registered yet"
                }
            } else {
                for item in equipment {
                    {
                        let equipment_id = item.id;
                        let is_selected = current_id == Some(equipment_id);

                        rsx! {
                            EquipmentCard {
                                key: "{equipment_id}",
                                serial: item.serial.clone(),
                                name: item.name.clone(),
                                kind_label: item.kind.as_str().to_string(),
                                status_label: item.status.as_str().to_string(),
                                is_selected,
                                onclick: move |_| {
                                    state.selected_equipment_id.set(Some(equipment_id));
                                    state.inspection_form_open.set(false);
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
