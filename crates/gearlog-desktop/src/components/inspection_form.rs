//! Inspection capture form
//!
//! Queue-first capture: the inspection is written to the local queue before
//! anything touches the network, then a sync pass is kicked off
//! opportunistically. A capture therefore survives a crash or a dropped
//! connection at any point after the save.

use dioxus::prelude::*;

use gearlog_core::models::{CheckpointResult, EquipmentKind, InspectionPayload};
use gearlog_core::offline::SyncOutcome;
use gearlog_core::util::normalize_text_option;

use crate::state::{AppState, SyncStatus};

/// Checkpoint lists shown by default for each equipment kind
const fn default_checkpoints(kind: EquipmentKind) -> &'static [&'static str] {
    match kind {
        EquipmentKind::Harness => &[
            "Webbing and stitching",
            "Buckles and adjusters",
            "D-rings and attachment points",
            "Labels and markings",
        ],
        EquipmentKind::Helmet => &[
            "Shell condition",
            "Harness and cradle",
            "Chin strap",
            "Labels and markings",
        ],
        EquipmentKind::Lanyard => &[
            "Rope or webbing",
            "Connectors and karabiners",
            "Energy absorber",
            "Labels and markings",
        ],
        EquipmentKind::Gloves => &["Palm and fingers", "Seams and cuffs"],
        EquipmentKind::Other => &["Overall condition", "Labels and markings"],
    }
}

#[component]
pub fn InspectionForm() -> Element {
    let mut state = use_context::<AppState>();
    let Some(equipment) = state.selected_equipment() else {
        return rsx! {};
    };

    let checkpoints = default_checkpoints(equipment.kind);
    let mut results = use_signal(|| vec![true; checkpoints.len()]);
    let notes = use_signal(String::new);
    let inspector = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let equipment_id = equipment.id;
    let submit = move |_| {
        if submitting() {
            return;
        }
        submitting.set(true);

        let checkpoint_results: Vec<CheckpointResult> = checkpoints
            .iter()
            .zip(results())
            .map(|(name, passed)| CheckpointResult::new(*name, passed))
            .collect();
        let payload = InspectionPayload::from_checkpoints(
            checkpoint_results,
            normalize_text_option(Some(notes())),
            normalize_text_option(Some(inspector())),
        );

        let maybe_service = state.service.read().clone();
        let maybe_engine = state.engine.read().clone();
        spawn(async move {
            let Some(db) = maybe_service else {
                submitting.set(false);
                return;
            };
            match db.capture_inspection(&equipment_id, &payload).await {
                Ok(queued) => {
                    tracing::info!("Captured inspection {}", queued.id);
                    if let Ok(count) = db.pending_count().await {
                        state.pending_count.set(count);
                    }
                    state.inspection_form_open.set(false);

                    // Opportunistic pass; a failure just leaves the entry queued
                    if let Some(engine) = maybe_engine {
                        state.sync_status.set(SyncStatus::Syncing);
                        match engine.sync().await {
                            Ok(SyncOutcome::Completed(report)) => {
                                state.sync_status.set(if report.failed.is_empty() {
                                    SyncStatus::Synced
                                } else {
                                    SyncStatus::Error
                                });
                            }
                            Ok(SyncOutcome::Offline) => {
                                state.sync_status.set(SyncStatus::Offline);
                            }
                            Ok(SyncOutcome::AlreadyRunning) => {}
                            Err(error) => {
                                tracing::warn!("Post-capture sync failed: {error}");
                                state.sync_status.set(SyncStatus::Error);
                            }
                        }
                        if let Ok(count) = db.pending_count().await {
                            state.pending_count.set(count);
                        }
                    }
                }
                Err(error) => {
                    tracing::error!("Failed to save inspection: {error}");
                    state
                        .last_error
                        .set(Some(format!("Failed to save inspection: {error}")));
                }
            }
            submitting.set(false);
        });
    };

    let close = move |_| {
        state.inspection_form_open.set(false);
    };

    rsx! {
        div {
            class: "inspection-form",
            style: "
                border: 1px solid #e0e0e0;
                border-radius: 6px;
                padding: 16px;
                margin-bottom: 16px;
                background: white;
            ",

            h3 { style: "margin: 0 0 12px 0; font-size: 14px;", "New inspection" }

            for (index, name) in checkpoints.iter().enumerate() {
                {
                    let passed = results()[index];
                    rsx! {
                        label {
                            key: "{name}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 4px 0; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: passed,
                                oninput: move |evt| {
                                    results.write()[index] = evt.checked();
                                },
                            }
                            span { "{name}" }
                            if !passed {
                                span { style: "color: #c62828; font-size: 12px;", "fail" }
                            }
                        }
                    }
                }
            }

            input {
                style: input_style(),
                placeholder: "Notes (optional)",
                value: "{notes}",
                oninput: {
                    let mut notes = notes;
                    move |evt: FormEvent| notes.set(evt.value())
                },
            }
            input {
                style: input_style(),
                placeholder: "Inspector (optional)",
                value: "{inspector}",
                oninput: {
                    let mut inspector = inspector;
                    move |evt: FormEvent| inspector.set(evt.value())
                },
            }

            div {
                style: "display: flex; gap: 8px; margin-top: 12px;",
                button {
                    style: "padding: 6px 16px; border: none; border-radius: 4px; background: #1565c0; color: white; cursor: pointer;",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Saving..." } else { "Save inspection" }
                }
                button {
                    style: "padding: 6px 16px; border: 1px solid #cfd8dc; border-radius: 4px; background: white; cursor: pointer;",
                    onclick: close,
                    "Cancel"
                }
            }
        }
    }
}

fn input_style() -> &'static str {
    "display: block; width: 100%; box-sizing: border-box; margin-top: 8px; \
     padding: 6px 10px; border: 1px solid #cfd8dc; border-radius: 4px; font-size: 13px;"
}
