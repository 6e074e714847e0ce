//! Main application component

use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use gearlog_core::config::BackendConfig;
use gearlog_core::offline::{
    spawn_auto_sync, Connectivity, NetworkMonitor, SyncEngine, DEFAULT_SYNC_DELAY,
};
use gearlog_core::remote::InspectionsApiClient;
use gearlog_core::services::GearlogService;

use crate::components::EquipmentForm;
use crate::services::{default_db_path, spawn_connectivity_probe};
use crate::state::{AppState, SyncStatus};
use crate::views::Home;

const EQUIPMENT_PAGE: usize = 200;

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let mut equipment = use_signal(Vec::new);
    let selected_equipment_id = use_signal(|| None);
    let mut service: Signal<Option<GearlogService>> = use_signal(|| None);
    let mut engine: Signal<Option<Arc<SyncEngine<InspectionsApiClient>>>> = use_signal(|| None);
    let mut network = use_signal(AppState::initial_network_state);
    let mut pending_count = use_signal(|| 0_usize);
    let mut sync_status = use_signal(|| SyncStatus::Offline);
    let inspection_form_open = use_signal(|| false);
    let add_form_open = use_signal(|| false);
    let mut last_error: Signal<Option<String>> = use_signal(|| None);
    let mut initialized = use_signal(|| false);

    // Initialize database and sync stack asynchronously (only once)
    use_effect(move || {
        if initialized() {
            return;
        }
        initialized.set(true); // Mark immediately to prevent double init

        spawn(async move {
            let db = match GearlogService::open_path(default_db_path()) {
                Ok(db) => db,
                Err(error) => {
                    tracing::error!("Failed to open database: {error}");
                    last_error.set(Some(format!("Failed to open database: {error}")));
                    return;
                }
            };

            match db.list_equipment(EQUIPMENT_PAGE, 0).await {
                Ok(items) => {
                    tracing::info!("Loaded {} equipment records", items.len());
                    equipment.set(items);
                }
                Err(error) => tracing::error!("Failed to load equipment: {error}"),
            }
            if let Ok(count) = db.pending_count().await {
                pending_count.set(count);
            }
            service.set(Some(db.clone()));

            // Wire up the sync stack when a backend is configured
            match BackendConfig::from_env() {
                Ok(Some(config)) => {
                    let base_url = config.base_url.clone();
                    match InspectionsApiClient::new(&config) {
                        Ok(client) => {
                            let monitor = Arc::new(NetworkMonitor::new(Connectivity::Offline));
                            let sync_engine = Arc::new(SyncEngine::new(
                                db.database(),
                                Arc::clone(&monitor),
                                client,
                            ));
                            spawn_auto_sync(Arc::clone(&sync_engine), DEFAULT_SYNC_DELAY);
                            spawn_connectivity_probe(base_url, Arc::clone(&monitor));
                            engine.set(Some(sync_engine));

                            // Forward monitor transitions into the UI
                            let mut events = monitor.subscribe();
                            spawn(async move {
                                loop {
                                    let snapshot = *events.borrow_and_update();
                                    network.set(snapshot);
                                    if snapshot.is_online() {
                                        if sync_status() == SyncStatus::Offline {
                                            sync_status.set(SyncStatus::Synced);
                                        }
                                    } else {
                                        sync_status.set(SyncStatus::Offline);
                                    }
                                    if events.changed().await.is_err() {
                                        break;
                                    }
                                }
                            });
                        }
                        Err(error) => {
                            tracing::error!("Failed to build API client: {error}");
                            last_error.set(Some(format!("Backend unavailable: {error}")));
                        }
                    }
                }
                Ok(None) => {
                    tracing::info!("No backend configured; running in local-only mode");
                }
                Err(error) => {
                    tracing::error!("Invalid backend configuration: {error}");
                    last_error.set(Some(format!("Invalid backend configuration: {error}")));
                }
            }
        });
    });

    // Keep the pending badge in step with background sync passes
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(2)).await;

            let maybe_engine = engine.read().clone();
            if let Some(sync_engine) = maybe_engine {
                if sync_engine.is_syncing() {
                    sync_status.set(SyncStatus::Syncing);
                } else if sync_status() == SyncStatus::Syncing {
                    sync_status.set(SyncStatus::Synced);
                }
            }

            let maybe_service = service.read().clone();
            if let Some(db) = maybe_service {
                if let Ok(count) = db.pending_count().await {
                    if count != pending_count() {
                        pending_count.set(count);
                    }
                }
            }
        }
    });

    use_context_provider(|| AppState {
        equipment,
        selected_equipment_id,
        service,
        engine,
        network,
        pending_count,
        sync_status,
        inspection_form_open,
        add_form_open,
        last_error,
    });

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: #f7f7f5;
                color: #1f2933;
            ",
            Home {}

            // Add-equipment overlay
            if add_form_open() {
                EquipmentForm {}
            }
        }
    }
}
