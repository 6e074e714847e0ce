//! Offline capture and synchronization
//!
//! Inspections captured while the backend is unreachable go into a durable
//! local queue; when connectivity returns, the sync engine drains the queue
//! in creation order.

mod engine;
mod network;

pub use engine::{
    spawn_auto_sync, InspectionSubmitter, SyncEngine, SyncOutcome, SyncReport, DEFAULT_SYNC_DELAY,
};
pub use network::{Connectivity, NetworkMonitor, NetworkState};
