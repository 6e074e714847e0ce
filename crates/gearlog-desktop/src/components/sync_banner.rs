//! Sync status banner
//!
//! Shown across the top of the window whenever sync state is worth telling
//! the user about: offline with captures queuing locally, back online with a
//! backlog, or everything caught up after a reconnect. Hidden entirely in
//! the steady online-and-empty state.

use dioxus::prelude::*;

use gearlog_core::offline::SyncOutcome;

use crate::state::{AppState, SyncStatus};

#[component]
pub fn SyncBanner() -> Element {
    let mut state = use_context::<AppState>();
    let network = (state.network)();
    let pending = (state.pending_count)();
    let status = (state.sync_status)();
    let has_backend = state.engine.read().is_some();

    if let Some(error) = (state.last_error)() {
        return rsx! {
            div {
                class: "sync-banner error",
                style: banner_style("#fdecea", "#b71c1c"),
                span { "{error}" }
            }
        };
    }

    let noun = plural(pending);

    // Local-only mode: no backend, so nothing will ever sync
    if !has_backend {
        if pending == 0 {
            return rsx! {};
        }
        return rsx! {
            div {
                class: "sync-banner local-only",
                style: banner_style("#eceff1", "#455a64"),
                span { "No backend configured - {pending} {noun} stored locally" }
            }
        };
    }

    let run_sync = move |_| {
        let Some(engine) = state.engine.read().clone() else {
            return;
        };
        spawn(async move {
            state.sync_status.set(SyncStatus::Syncing);
            match engine.sync().await {
                Ok(SyncOutcome::Completed(report)) => {
                    tracing::info!(
                        "Manual sync: {}/{} submitted",
                        report.submitted,
                        report.attempted
                    );
                    state.sync_status.set(if report.failed.is_empty() {
                        SyncStatus::Synced
                    } else {
                        SyncStatus::Error
                    });
                }
                Ok(SyncOutcome::Offline) => state.sync_status.set(SyncStatus::Offline),
                Ok(SyncOutcome::AlreadyRunning) => {}
                Err(error) => {
                    tracing::error!("Manual sync failed: {error}");
                    state.sync_status.set(SyncStatus::Error);
                }
            }
            let maybe_service = state.service.read().clone();
            if let Some(db) = maybe_service {
                if let Ok(count) = db.pending_count().await {
                    state.pending_count.set(count);
                }
            }
        });
    };

    if !network.is_online() {
        let message = if pending == 0 {
            "Offline - inspections will be saved locally".to_string()
        } else {
            format!("Offline - {pending} {} saved locally", plural(pending))
        };
        return rsx! {
            div {
                class: "sync-banner offline",
                style: banner_style("#fff8e1", "#8d6e00"),
                span { "{message}" }
            }
        };
    }

    if status == SyncStatus::Syncing {
        return rsx! {
            div {
                class: "sync-banner syncing",
                style: banner_style("#e3f2fd", "#0d47a1"),
                span { "Syncing {pending} {noun}..." }
            }
        };
    }

    if pending > 0 {
        let label = if status == SyncStatus::Error {
            format!("Some inspections failed to sync - {pending} still queued")
        } else {
            format!("Back online - {pending} {} waiting to sync", plural(pending))
        };
        return rsx! {
            div {
                class: "sync-banner pending",
                style: banner_style("#e3f2fd", "#0d47a1"),
                span { "{label}" }
                button {
                    style: "
                        margin-left: auto;
                        padding: 4px 12px;
                        border: none;
                        border-radius: 4px;
                        background: #1565c0;
                        color: white;
                        cursor: pointer;
                    ",
                    onclick: run_sync,
                    "Sync Now"
                }
            }
        };
    }

    if network.was_offline {
        return rsx! {
            div {
                class: "sync-banner synced",
                style: banner_style("#e8f5e9", "#1b5e20"),
                span { "Back online - all inspections synced" }
            }
        };
    }

    rsx! {}
}

fn banner_style(background: &str, color: &str) -> String {
    format!(
        "display: flex; align-items: center; gap: 12px; \
         padding: 8px 16px; background: {background}; color: {color}; \
         border-bottom: 1px solid rgba(0,0,0,0.08); font-size: 13px;"
    )
}

const fn plural(count: usize) -> &'static str {
    if count == 1 {
        "inspection"
    } else {
        "inspections"
    }
}
