//! Toolbar component with actions

use dioxus::prelude::*;

use crate::state::AppState;

/// Toolbar with action buttons
#[component]
pub fn Toolbar() -> Element {
    let mut state = use_context::<AppState>();
    let has_selected = (state.selected_equipment_id)().is_some();

    let open_add_form = move |_| {
        state.add_form_open.set(true);
    };

    let open_inspection_form = move |_| {
        state.inspection_form_open.set(true);
    };

    let retire_equipment = move |_| {
        let Some(id) = (state.selected_equipment_id)() else {
            return;
        };
        let maybe_service = state.service.read().clone();
        spawn(async move {
            let Some(db) = maybe_service else {
                return;
            };
            match db
                .set_equipment_status(&id, gearlog_core::models::EquipmentStatus::Retired)
                .await
            {
                Ok(updated) => {
                    tracing::info!("Retired equipment {}", updated.id);
                    let mut equipment = state.equipment.write();
                    if let Some(slot) = equipment.iter_mut().find(|item| item.id == id) {
                        *slot = updated;
                    }
                }
                Err(error) => tracing::error!("Failed to retire equipment: {error}"),
            }
        });
    };

    rsx! {
        div {
            class: "toolbar",
            style: "
                display: flex;
                gap: 8px;
                padding: 10px 16px;
                border-bottom: 1px solid #e0e0e0;
                background: white;
            ",

            button {
                style: button_style("#1565c0", "white"),
                onclick: open_add_form,
                "+ Add Equipment"
            }

            if has_selected {
                button {
                    style: button_style("#2e7d32", "white"),
                    onclick: open_inspection_form,
                    "Log Inspection"
                }
                button {
                    style: button_style("#eceff1", "#455a64"),
                    onclick: retire_equipment,
                    "Retire"
                }
            }
        }
    }
}

fn button_style(background: &str, color: &str) -> String {
    format!(
        "padding: 6px 14px; border: none; border-radius: 4px; \
         background: {background}; color: {color}; cursor: pointer; font-size: 13px;"
    )
}
