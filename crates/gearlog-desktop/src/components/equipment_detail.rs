//! Equipment detail panel

use chrono::{TimeZone, Utc};
use dioxus::prelude::*;

use gearlog_core::models::{Inspection, InspectionOutcome};

use super::InspectionForm;
use crate::state::AppState;

const HISTORY_LIMIT: usize = 10;

/// Right-hand panel: details and inspection history for the selection
#[component]
pub fn EquipmentDetail() -> Element {
    let state = use_context::<AppState>();
    let selected = state.selected_equipment();
    let form_open = (state.inspection_form_open)();

    let history = use_resource(move || async move {
        // Re-read whenever the selection or the queue moves
        let _pending = (state.pending_count)();
        let id = (state.selected_equipment_id)()?;
        let db = state.service.read().clone()?;
        db.inspection_history(&id, HISTORY_LIMIT).await.ok()
    });

    let Some(equipment) = selected else {
        return rsx! {
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; color: #90a4ae;",
                "Select an item to see its details"
            }
        };
    };

    let interval = equipment.inspection_interval_days;
    let kind = equipment.kind.as_str();
    let status = equipment.status.as_str();

    rsx! {
        div {
            class: "equipment-detail",
            style: "flex: 1; overflow-y: auto; padding: 20px 24px;",

            h2 { style: "margin: 0 0 4px 0; font-size: 18px;", "{equipment.name}" }
            div {
                style: "color: #607d8b; font-size: 13px; margin-bottom: 16px;",
                "{equipment.serial} · {kind} · {status} · inspect every {interval} days"
            }

            if form_open {
                InspectionForm {}
            }

            h3 { style: "font-size: 14px; margin: 20px 0 8px 0;", "Inspection history" }
            match history() {
                Some(Some(inspections)) if !inspections.is_empty() => rsx! {
                    for inspection in inspections {
                        HistoryRow { key: "{inspection.id}", inspection }
                    }
                },
                Some(_) => rsx! {
                    div { style: "color: #90a4ae; font-size: 13px;", "No synced inspections yet" }
                },
                None => rsx! {
                    div { style: "color: #90a4ae; font-size: 13px;", "Loading..." }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(inspection: Inspection) -> Element {
    let outcome = inspection.payload.outcome.as_str();
    let color = if inspection.payload.outcome == InspectionOutcome::Pass {
        "#2e7d32"
    } else {
        "#c62828"
    };
    let performed = format_timestamp(inspection.performed_at);
    let inspector = inspection
        .payload
        .inspector
        .clone()
        .unwrap_or_else(|| "unknown".to_string());
    let checkpoint_count = inspection.payload.checkpoints.len();

    rsx! {
        div {
            style: "
                display: flex;
                gap: 12px;
                padding: 8px 0;
                border-bottom: 1px solid #eeeeee;
                font-size: 13px;
            ",
            span { style: "color: {color}; font-weight: 500; width: 48px;", "{outcome}" }
            span { "{performed}" }
            span { style: "color: #607d8b;", "{checkpoint_count} checkpoints · by {inspector}" }
        }
    }
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| "-".to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
