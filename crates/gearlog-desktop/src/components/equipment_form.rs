//! Add-equipment overlay form

use dioxus::prelude::*;

use gearlog_core::models::EquipmentKind;

use crate::state::AppState;

const DEFAULT_INTERVAL_DAYS: u32 = 90;

#[component]
pub fn EquipmentForm() -> Element {
    let mut state = use_context::<AppState>();
    let serial = use_signal(String::new);
    let name = use_signal(String::new);
    let kind = use_signal(|| EquipmentKind::Harness);
    let interval = use_signal(|| DEFAULT_INTERVAL_DAYS);
    let mut form_error = use_signal(|| None::<String>);

    let close = move |_| {
        state.add_form_open.set(false);
    };

    let save = move |_| {
        let maybe_service = state.service.read().clone();
        spawn(async move {
            let Some(db) = maybe_service else {
                return;
            };
            match db
                .add_equipment(&serial(), &name(), kind(), interval())
                .await
            {
                Ok(created) => {
                    tracing::info!("Registered equipment {} ({})", created.id, created.serial);
                    state.equipment.write().insert(0, created.clone());
                    state.selected_equipment_id.set(Some(created.id));
                    state.add_form_open.set(false);
                }
                Err(error) => form_error.set(Some(error.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "equipment-form-overlay",
            style: "
                position: fixed;
                inset: 0;
                background: rgba(0, 0, 0, 0.35);
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 10;
            ",
            onclick: close,

            div {
                style: "
                    width: 360px;
                    background: white;
                    border-radius: 8px;
                    padding: 20px;
                    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.2);
                ",
                onclick: move |evt| evt.stop_propagation(),

                h3 { style: "margin: 0 0 12px 0; font-size: 15px;", "Add equipment" }

                if let Some(error) = form_error() {
                    div {
                        style: "color: #c62828; font-size: 13px; margin-bottom: 8px;",
                        "{error}"
                    }
                }

                input {
                    style: input_style(),
                    placeholder: "Serial number (e.g. HARN-0042)",
                    value: "{serial}",
                    oninput: {
                        let mut serial = serial;
                        move |evt: FormEvent| serial.set(evt.value())
                    },
                }
                input {
                    style: input_style(),
                    placeholder: "Name",
                    value: "{name}",
                    oninput: {
                        let mut name = name;
                        move |evt: FormEvent| name.set(evt.value())
                    },
                }
                select {
                    style: input_style(),
                    onchange: {
                        let mut kind = kind;
                        move |evt: FormEvent| {
                            kind.set(evt.value().parse().unwrap_or(EquipmentKind::Other));
                        }
                    },
                    option { value: "harness", "Harness" }
                    option { value: "helmet", "Helmet" }
                    option { value: "lanyard", "Lanyard" }
                    option { value: "gloves", "Gloves" }
                    option { value: "other", "Other" }
                }
                input {
                    style: input_style(),
                    r#type: "number",
                    min: "1",
                    placeholder: "Inspection interval (days)",
                    value: "{interval}",
                    oninput: {
                        let mut interval = interval;
                        move |evt: FormEvent| {
                            interval.set(evt.value().parse().unwrap_or(DEFAULT_INTERVAL_DAYS));
                        }
                    },
                }

                div {
                    style: "display: flex; gap: 8px; margin-top: 16px; justify-content: flex-end;",
                    button {
                        style: "padding: 6px 16px; border: 1px solid #cfd8dc; border-radius: 4px; background: white; cursor: pointer;",
                        onclick: close,
                        "Cancel"
                    }
                    button {
                        style: "padding: 6px 16px; border: none; border-radius: 4px; background: #1565c0; color: white; cursor: pointer;",
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}

fn input_style() -> &'static str {
    "display: block; width: 100%; box-sizing: border-box; margin-top: 8px; \
     padding: 6px 10px; border: 1px solid #cfd8dc; border-radius: 4px; font-size: 13px;"
}
