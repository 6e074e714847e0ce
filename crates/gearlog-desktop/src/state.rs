//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use std::sync::Arc;

use dioxus::prelude::*;

use gearlog_core::models::{Equipment, EquipmentId};
use gearlog_core::offline::{Connectivity, NetworkState, SyncEngine};
use gearlog_core::remote::InspectionsApiClient;
use gearlog_core::services::GearlogService;

/// Current sync status for the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Offline,
    Error,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// All equipment loaded in the app
    pub equipment: Signal<Vec<Equipment>>,
    /// Currently selected equipment ID
    pub selected_equipment_id: Signal<Option<EquipmentId>>,
    /// Shared database service
    pub service: Signal<Option<GearlogService>>,
    /// Sync engine when a backend is configured
    pub engine: Signal<Option<Arc<SyncEngine<InspectionsApiClient>>>>,
    /// Latest network monitor snapshot
    pub network: Signal<NetworkState>,
    /// Count of inspections queued for sync
    pub pending_count: Signal<usize>,
    /// Current sync status
    pub sync_status: Signal<SyncStatus>,
    /// Whether the inspection form panel is open
    pub inspection_form_open: Signal<bool>,
    /// Whether the add-equipment form is open
    pub add_form_open: Signal<bool>,
    /// Last storage/sync error for banner display
    pub last_error: Signal<Option<String>>,
}

impl AppState {
    /// Get the currently selected equipment record
    #[must_use]
    pub fn selected_equipment(&self) -> Option<Equipment> {
        let selected = (self.selected_equipment_id)();
        selected.and_then(|id| {
            (self.equipment)()
                .into_iter()
                .find(|equipment| equipment.id == id)
        })
    }

    /// Default state before the monitor reports anything
    #[must_use]
    pub const fn initial_network_state() -> NetworkState {
        NetworkState {
            connectivity: Connectivity::Offline,
            was_offline: true,
        }
    }
}
