use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::plan_store::ItineraryStore;
use crate::{
    core::stage::PipelineStage,
    types::{ItineraryRequest, ItineraryResult, NewItineraryRecord, RequestSummary, Visibility},
};

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Counts reported once the persistence worker has stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub saved: usize,
    pub failed: usize,
    /// Jobs `notify` refused because the queue was full or the worker had stopped.
    pub dropped: usize,
}

/// Fire-and-forget handle for persisting finished itineraries.
///
/// `notify` never waits: jobs go onto a bounded queue and a background worker saves
/// them one at a time. A full or closed queue drops the job with a warning and
/// counts it.
#[derive(Clone, Debug)]
pub struct PersistenceNotifier {
    sender: mpsc::Sender<NewItineraryRecord>,
    visibility: Visibility,
    dropped: Arc<AtomicUsize>,
}

/// Owner of the background save task.
#[derive(Debug)]
pub struct PersistenceWorker {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<DrainReport>,
    dropped: Arc<AtomicUsize>,
}

impl PersistenceNotifier {
    /// Start the worker task on the current Tokio runtime.
    pub fn spawn(
        store: Arc<dyn ItineraryStore>,
        capacity: usize,
    ) -> (PersistenceNotifier, PersistenceWorker) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_worker(store, receiver, shutdown_rx));
        let dropped = Arc::new(AtomicUsize::new(0));

        (
            PersistenceNotifier {
                sender,
                visibility: Visibility::default(),
                dropped: Arc::clone(&dropped),
            },
            PersistenceWorker {
                shutdown,
                handle,
                dropped,
            },
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Jobs dropped so far by this notifier and its clones.
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Queue an itinerary for storage. Returns whether the job was accepted.
    pub fn notify(&self, request: &ItineraryRequest, result: &ItineraryResult) -> bool {
        let record = NewItineraryRecord {
            summary: RequestSummary::from(request),
            plan: result.clone(),
            visibility: self.visibility,
        };

        match self.sender.try_send(record) {
            Ok(()) => return true,
            Err(mpsc::error::TrySendError::Full(record)) => {
                warn!(
                    target: "tripwand::persistence",
                    destination = %record.summary.destination,
                    "persistence queue full, itinerary not stored"
                );
            }
            Err(mpsc::error::TrySendError::Closed(record)) => {
                warn!(
                    target: "tripwand::persistence",
                    destination = %record.summary.destination,
                    "persistence worker stopped, itinerary not stored"
                );
            }
        }

        self.dropped.fetch_add(1, Ordering::Relaxed);
        false
    }
}

impl PersistenceWorker {
    /// Stop accepting jobs, save everything already queued, and wait for the worker.
    pub async fn drain(self) -> DrainReport {
        let _ = self.shutdown.send(());
        let mut report = match self.handle.await {
            Ok(report) => report,
            Err(err) => {
                warn!(target: "tripwand::persistence", error = %err, "persistence worker aborted");
                DrainReport::default()
            }
        };
        report.dropped = self.dropped.load(Ordering::Relaxed);
        report
    }
}

async fn run_worker(
    store: Arc<dyn ItineraryStore>,
    mut receiver: mpsc::Receiver<NewItineraryRecord>,
    mut shutdown: oneshot::Receiver<()>,
) -> DrainReport {
    let mut report = DrainReport::default();

    loop {
        tokio::select! {
            job = receiver.recv() => match job {
                Some(record) => persist(store.as_ref(), record, &mut report).await,
                None => break,
            },
            _ = &mut shutdown => {
                receiver.close();
                while let Some(record) = receiver.recv().await {
                    persist(store.as_ref(), record, &mut report).await;
                }
                break;
            }
        }
    }

    info!(
        target: "tripwand::persistence",
        saved = report.saved,
        failed = report.failed,
        "persistence worker stopped"
    );
    report
}

async fn persist(store: &dyn ItineraryStore, record: NewItineraryRecord, report: &mut DrainReport) {
    let destination = record.summary.destination.clone();

    match store.save(record).await {
        Ok(id) => {
            report.saved += 1;
            debug!(
                target: "tripwand::persistence",
                id,
                destination = %destination,
                stage = %PipelineStage::Notified,
                "itinerary persisted"
            );
        }
        Err(err) => {
            report.failed += 1;
            warn!(
                target: "tripwand::persistence",
                destination = %destination,
                error = %err,
                "failed to persist itinerary"
            );
        }
    }
}
