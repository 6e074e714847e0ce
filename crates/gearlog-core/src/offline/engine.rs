//! Sync engine
//!
//! Drains the offline inspection queue into the backend when connectivity
//! allows. At most one pass runs at a time; entries are submitted in
//! creation order and removed individually after each confirmed success, so
//! an interruption loses at most the one in-flight item.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::db::{
    Database, InspectionLogRepository, InspectionQueueRepository, SqliteInspectionLogRepository,
    SqliteInspectionQueueRepository,
};
use crate::error::Result;
use crate::models::{Inspection, InspectionId, QueuedInspection, QueuedInspectionId};

use super::network::{Connectivity, NetworkMonitor};

/// Delay between a reconnect and the automatic sync pass, letting the
/// connection stabilize first.
pub const DEFAULT_SYNC_DELAY: Duration = Duration::from_secs(2);

/// Seam between the engine and the backend: one create-record request per
/// queued inspection. Implemented by the HTTP client and by test spies.
pub trait InspectionSubmitter: Send + Sync {
    /// Submit one queued inspection; `Ok(())` means the backend acknowledged
    /// the write.
    fn submit(&self, inspection: &QueuedInspection) -> impl Future<Output = Result<()>> + Send;
}

/// Result of one completed sync pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Entries in the queue snapshot when the pass started
    pub attempted: usize,
    /// Entries acknowledged and removed
    pub submitted: usize,
    /// Entries that failed and remain queued
    pub failed: Vec<QueuedInspectionId>,
}

/// Outcome of a `sync()` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A pass ran to completion (possibly with per-item failures)
    Completed(SyncReport),
    /// The monitor reported offline; nothing was attempted
    Offline,
    /// Another pass was already running; this call was dropped
    AlreadyRunning,
}

/// Drains the local queue into the backend
pub struct SyncEngine<S> {
    db: Arc<Mutex<Database>>,
    monitor: Arc<NetworkMonitor>,
    submitter: S,
    syncing: AtomicBool,
}

impl<S: InspectionSubmitter> SyncEngine<S> {
    /// Create an engine over the shared database and network monitor
    pub fn new(db: Arc<Mutex<Database>>, monitor: Arc<NetworkMonitor>, submitter: S) -> Self {
        Self {
            db,
            monitor,
            submitter,
            syncing: AtomicBool::new(false),
        }
    }

    /// The network monitor this engine watches
    #[must_use]
    pub fn monitor(&self) -> &Arc<NetworkMonitor> {
        &self.monitor
    }

    /// Whether a pass is currently running
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Attempt one pass over the current queue snapshot.
    ///
    /// Preconditions are checked here: offline or an in-flight pass short-
    /// circuits without touching the queue. Concurrent calls while a pass is
    /// active are dropped, not queued.
    pub async fn sync(&self) -> Result<SyncOutcome> {
        if !self.monitor.is_online() {
            return Ok(SyncOutcome::Offline);
        }
        // Compare-and-swap guard: exactly one drain pass at a time
        if self
            .syncing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Sync already in progress; dropping concurrent call");
            return Ok(SyncOutcome::AlreadyRunning);
        }

        let result = self.drain().await;
        self.syncing.store(false, Ordering::SeqCst);
        result.map(SyncOutcome::Completed)
    }

    /// Submit every queued entry once, in creation order.
    ///
    /// Each successful submission removes its entry immediately and appends
    /// it to the acknowledged-inspection log before the next item is
    /// attempted. A failed submission is logged and skipped; it does not
    /// halt the pass.
    async fn drain(&self) -> Result<SyncReport> {
        let entries = {
            let db = self.db.lock().await;
            SqliteInspectionQueueRepository::new(db.connection()).list()?
        };

        let mut report = SyncReport {
            attempted: entries.len(),
            ..SyncReport::default()
        };

        for entry in entries {
            match self.submitter.submit(&entry).await {
                Ok(()) => {
                    let db = self.db.lock().await;
                    SqliteInspectionQueueRepository::new(db.connection()).remove(&entry.id)?;
                    SqliteInspectionLogRepository::new(db.connection())
                        .record(&acknowledged(&entry))?;
                    report.submitted += 1;
                }
                Err(error) => {
                    tracing::warn!("Failed to submit inspection {}: {}", entry.id, error);
                    report.failed.push(entry.id);
                }
            }
        }

        tracing::info!(
            "Sync pass finished: {}/{} submitted, {} still queued",
            report.submitted,
            report.attempted,
            report.failed.len()
        );
        Ok(report)
    }
}

/// Convert an acknowledged queue entry into a log record
fn acknowledged(entry: &QueuedInspection) -> Inspection {
    Inspection {
        id: InspectionId::new(),
        equipment_id: entry.equipment_id,
        payload: entry.payload.clone(),
        performed_at: entry.created_at,
        recorded_at: chrono::Utc::now().timestamp_millis(),
    }
}

/// Watch the monitor and run a pass after each offline-to-online transition.
///
/// Waits `delay` for the connection to stabilize, then re-checks the monitor
/// before firing - a reconnect that flaps back offline within the delay must
/// not leave a stale pass running while offline.
pub fn spawn_auto_sync<S>(engine: Arc<SyncEngine<S>>, delay: Duration) -> JoinHandle<()>
where
    S: InspectionSubmitter + 'static,
{
    let mut receiver = engine.monitor().subscribe();
    tokio::spawn(async move {
        let mut last = receiver.borrow().connectivity;
        while receiver.changed().await.is_ok() {
            let current = receiver.borrow_and_update().connectivity;
            if last == Connectivity::Offline && current == Connectivity::Online {
                tokio::time::sleep(delay).await;
                if engine.monitor().is_online() {
                    match engine.sync().await {
                        Ok(outcome) => {
                            tracing::debug!("Auto sync finished: {outcome:?}");
                        }
                        Err(error) => tracing::warn!("Auto sync failed: {error}"),
                    }
                } else {
                    tracing::debug!("Connectivity dropped during sync delay; skipping pass");
                }
            }
            last = current;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteInspectionLogRepository;
    use crate::error::Error;
    use crate::models::{CheckpointResult, EquipmentId, InspectionPayload};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;

    /// Records submissions in order; rejects configured equipment ids.
    struct SpySubmitter {
        calls: StdMutex<Vec<EquipmentId>>,
        reject: HashSet<String>,
        delay: Option<Duration>,
    }

    impl SpySubmitter {
        fn accepting() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                reject: HashSet::new(),
                delay: None,
            }
        }

        fn rejecting(ids: &[EquipmentId]) -> Self {
            Self {
                reject: ids.iter().map(ToString::to_string).collect(),
                ..Self::accepting()
            }
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::accepting()
            }
        }

        fn calls(&self) -> Vec<EquipmentId> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl InspectionSubmitter for SpySubmitter {
        fn submit(&self, inspection: &QueuedInspection) -> impl Future<Output = Result<()>> + Send {
            let equipment_id = inspection.equipment_id;
            async move {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.calls.lock().unwrap().push(equipment_id);
                if self.reject.contains(&equipment_id.to_string()) {
                    Err(Error::Api("Internal Server Error (500)".to_string()))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn payload() -> InspectionPayload {
        InspectionPayload::from_checkpoints(
            vec![CheckpointResult::new("Webbing", true)],
            None,
            None,
        )
    }

    async fn setup(initial: Connectivity) -> (Arc<Mutex<Database>>, Arc<NetworkMonitor>) {
        let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
        let monitor = Arc::new(NetworkMonitor::new(initial));
        (db, monitor)
    }

    async fn enqueue(db: &Arc<Mutex<Database>>, count: usize) -> Vec<QueuedInspection> {
        let mut entries = Vec::new();
        for _ in 0..count {
            {
                let db = db.lock().await;
                let repo = SqliteInspectionQueueRepository::new(db.connection());
                entries.push(repo.store(&EquipmentId::new(), &payload()).unwrap());
            }
            // Distinct capture timestamps keep creation order unambiguous
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        entries
    }

    async fn queued_ids(db: &Arc<Mutex<Database>>) -> Vec<QueuedInspectionId> {
        let db = db.lock().await;
        SqliteInspectionQueueRepository::new(db.connection())
            .list()
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }

    #[tokio::test]
    async fn test_sync_drains_queue_in_creation_order() {
        let (db, monitor) = setup(Connectivity::Online).await;
        let entries = enqueue(&db, 3).await;

        let engine = SyncEngine::new(Arc::clone(&db), monitor, SpySubmitter::accepting());
        let outcome = engine.sync().await.unwrap();

        let SyncOutcome::Completed(report) = outcome else {
            panic!("expected completed pass, got {outcome:?}");
        };
        assert_eq!(report.attempted, 3);
        assert_eq!(report.submitted, 3);
        assert!(report.failed.is_empty());

        assert!(queued_ids(&db).await.is_empty());
        let expected: Vec<_> = entries.iter().map(|entry| entry.equipment_id).collect();
        assert_eq!(engine.submitter.calls(), expected);
    }

    #[tokio::test]
    async fn test_acknowledged_entries_land_in_local_log() {
        let (db, monitor) = setup(Connectivity::Online).await;
        let entries = enqueue(&db, 1).await;

        let engine = SyncEngine::new(Arc::clone(&db), monitor, SpySubmitter::accepting());
        engine.sync().await.unwrap();

        let db = db.lock().await;
        let log = SqliteInspectionLogRepository::new(db.connection());
        let latest = log
            .latest_for_equipment(&entries[0].equipment_id)
            .unwrap()
            .unwrap();
        assert_eq!(latest.performed_at, entries[0].created_at);
    }

    #[tokio::test]
    async fn test_failed_item_stays_queued_and_pass_continues() {
        let (db, monitor) = setup(Connectivity::Online).await;
        let entries = enqueue(&db, 3).await;

        // Backend rejects the middle item with a 500
        let engine = SyncEngine::new(
            Arc::clone(&db),
            monitor,
            SpySubmitter::rejecting(&[entries[1].equipment_id]),
        );
        let outcome = engine.sync().await.unwrap();

        let SyncOutcome::Completed(report) = outcome else {
            panic!("expected completed pass, got {outcome:?}");
        };
        assert_eq!(report.submitted, 2);
        assert_eq!(report.failed, vec![entries[1].id]);

        // Only the failed entry remains, and every item was attempted in order
        assert_eq!(queued_ids(&db).await, vec![entries[1].id]);
        let expected: Vec<_> = entries.iter().map(|entry| entry.equipment_id).collect();
        assert_eq!(engine.submitter.calls(), expected);
    }

    #[tokio::test]
    async fn test_sync_is_a_noop_while_offline() {
        let (db, monitor) = setup(Connectivity::Offline).await;
        enqueue(&db, 2).await;

        let engine = SyncEngine::new(Arc::clone(&db), monitor, SpySubmitter::accepting());
        let outcome = engine.sync().await.unwrap();

        assert_eq!(outcome, SyncOutcome::Offline);
        assert!(engine.submitter.calls().is_empty());
        assert_eq!(queued_ids(&db).await.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_sync_calls_run_one_pass() {
        let (db, monitor) = setup(Connectivity::Online).await;
        enqueue(&db, 2).await;

        let engine = Arc::new(SyncEngine::new(
            Arc::clone(&db),
            monitor,
            SpySubmitter::with_delay(Duration::from_millis(20)),
        ));

        let (first, second) = tokio::join!(engine.sync(), engine.sync());
        let outcomes = [first.unwrap(), second.unwrap()];

        assert!(outcomes
            .iter()
            .any(|outcome| *outcome == SyncOutcome::AlreadyRunning));
        assert!(outcomes
            .iter()
            .any(|outcome| matches!(outcome, SyncOutcome::Completed(_))));
        // No entry was submitted twice
        assert_eq!(engine.submitter.calls().len(), 2);
        assert!(queued_ids(&db).await.is_empty());
    }

    #[tokio::test]
    async fn test_reconnect_triggers_auto_sync_after_delay() {
        let (db, monitor) = setup(Connectivity::Offline).await;
        enqueue(&db, 1).await;

        let engine = Arc::new(SyncEngine::new(
            Arc::clone(&db),
            Arc::clone(&monitor),
            SpySubmitter::accepting(),
        ));
        let handle = spawn_auto_sync(Arc::clone(&engine), Duration::from_millis(30));

        monitor.set_online();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(engine.submitter.calls().len(), 1);
        assert!(queued_ids(&db).await.is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_reconnect_flap_does_not_fire_stale_sync() {
        let (db, monitor) = setup(Connectivity::Offline).await;
        enqueue(&db, 1).await;

        let engine = Arc::new(SyncEngine::new(
            Arc::clone(&db),
            Arc::clone(&monitor),
            SpySubmitter::accepting(),
        ));
        let handle = spawn_auto_sync(Arc::clone(&engine), Duration::from_millis(50));

        // Back online, then offline again before the delay elapses
        monitor.set_online();
        tokio::time::sleep(Duration::from_millis(5)).await;
        monitor.set_offline();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(engine.submitter.calls().is_empty());
        assert_eq!(queued_ids(&db).await.len(), 1);
        handle.abort();
    }
}
