use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::clock::Clock;
use super::error::StoreError;
use super::models::{JobId, NewPrintJob, PrintJob};

/// How long a print job stays retrievable after it is stored
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Outcome of a read against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(PrintJob),
    /// Was present but past its expiry; it has now been removed
    Expired,
    Missing,
}

impl Lookup {
    pub fn into_job(self) -> Option<PrintJob> {
        match self {
            Lookup::Found(job) => Some(job),
            Lookup::Expired | Lookup::Missing => None,
        }
    }
}

/// Id and expiry of a freshly stored job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredJob {
    pub id: JobId,
    pub expires_at_epoch_ms: i64,
}

#[derive(Default)]
struct Inner {
    jobs: HashMap<JobId, PrintJob>,
    closed: bool,
}

/// In-memory print job store with expiry
///
/// Architecture:
/// - One `Mutex<HashMap>` holds every live job; each operation takes the
///   lock exactly once, so put, get and sweep never interleave
/// - Reads evict: an expired job found by `get` is removed in the same
///   critical section and reported absent
/// - Writes sweep: every `put` also drops all expired jobs
/// - Nothing is persisted; a restart loses every job
///
/// The store lives for the life of the process and is shared behind an
/// `Arc`. After [`PrintJobStore::shutdown`] it holds nothing and refuses
/// new jobs.
pub struct PrintJobStore {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    shutdown: Notify,
}

impl PrintJobStore {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        info!(ttl_secs = ttl.as_secs(), "Creating print job store");

        Self {
            inner: Mutex::new(Inner::default()),
            clock,
            ttl: ttl.max(Duration::from_millis(1)),
            shutdown: Notify::new(),
        }
    }

    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, DEFAULT_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a job under a fresh id, stamping it with `now + ttl`
    pub fn put(&self, job: NewPrintJob) -> Result<StoredJob, StoreError> {
        let now = self.clock.now_ms();
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at_epoch_ms = now.saturating_add(ttl_ms);

        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }

        let id = loop {
            let candidate = JobId::generate();
            if !inner.jobs.contains_key(&candidate) {
                break candidate;
            }
        };

        let labels = job.labels.len();
        inner
            .jobs
            .insert(id.clone(), job.expiring_at(expires_at_epoch_ms));

        let swept = sweep_locked(&mut inner, now);

        debug!(job_id = %id, labels, swept, live = inner.jobs.len(), "Print job stored");

        Ok(StoredJob {
            id,
            expires_at_epoch_ms,
        })
    }

    /// Fetch a live job, evicting it instead if it has expired
    pub fn lookup(&self, id: &JobId) -> Lookup {
        let now = self.clock.now_ms();
        let mut inner = self.lock();

        match inner.jobs.get(id) {
            None => return Lookup::Missing,
            Some(job) if job.is_live_at(now) => return Lookup::Found(job.clone()),
            Some(_) => {}
        }

        inner.jobs.remove(id);
        debug!(job_id = %id, "Evicted expired print job on read");
        Lookup::Expired
    }

    pub fn get(&self, id: &JobId) -> Option<PrintJob> {
        self.lookup(id).into_job()
    }

    /// Drop every job whose expiry has passed; returns how many went
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        sweep_locked(&mut inner, now)
    }

    /// Number of jobs held, expired or not
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Discard all jobs and stop accepting new ones; returns how many were dropped
    pub fn shutdown(&self) -> usize {
        let dropped = {
            let mut inner = self.lock();
            inner.closed = true;
            let dropped = inner.jobs.len();
            inner.jobs.clear();
            dropped
        };

        self.shutdown.notify_waiters();
        info!(dropped, "Print job store shut down");
        dropped
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The map stays consistent even if a holder panicked mid-operation
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sweep_locked(inner: &mut Inner, now: i64) -> usize {
    let before = inner.jobs.len();
    inner.jobs.retain(|_, job| job.is_live_at(now));
    before - inner.jobs.len()
}

/// Sweep `store` every `interval` until it is shut down
pub fn spawn_sweeper(store: Arc<PrintJobStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = store.shutdown.notified() => break,
            }

            if store.is_closed() {
                break;
            }

            let swept = store.sweep();
            if swept > 0 {
                info!(swept, live = store.len(), "Swept expired print jobs");
            }
        }

        debug!("Print job sweeper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print_jobs::Label;
    use crate::print_jobs::clock::ManualClock;
    use std::collections::HashSet;

    const START_MS: i64 = 1_700_000_000_000;

    fn new_job(label_size: &str) -> NewPrintJob {
        NewPrintJob {
            labels: vec![Label {
                title: "Charizard".to_string(),
                variation: Some("Holo".to_string()),
                condition: None,
                identifier: "https://example.com/p/6".to_string(),
                price: "$120".to_string(),
            }],
            label_size: label_size.to_string(),
            show_price: true,
            show_condition: false,
        }
    }

    fn store_with_clock() -> (PrintJobStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(START_MS));
        (PrintJobStore::with_default_ttl(clock.clone()), clock)
    }

    #[test]
    fn test_put_then_get_round_trip() {
        let (store, _clock) = store_with_clock();

        let stored = store.put(new_job("large")).unwrap();
        let job = store.get(&stored.id).unwrap();

        assert_eq!(job, new_job("large").expiring_at(stored.expires_at_epoch_ms));
        assert_eq!(stored.expires_at_epoch_ms, START_MS + 30 * 60 * 1000);
    }

    #[test]
    fn test_get_unknown_id_is_missing() {
        let (store, _clock) = store_with_clock();
        assert_eq!(store.lookup(&JobId::from("nope")), Lookup::Missing);
    }

    #[test]
    fn test_get_after_expiry_evicts() {
        let (store, clock) = store_with_clock();
        let stored = store.put(new_job("small")).unwrap();

        clock.advance(DEFAULT_TTL - Duration::from_millis(1));
        assert!(store.get(&stored.id).is_some());

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.lookup(&stored.id), Lookup::Expired);
        assert!(store.is_empty());

        // Absence is stable
        assert_eq!(store.lookup(&stored.id), Lookup::Missing);
        assert!(store.get(&stored.id).is_none());
    }

    #[test]
    fn test_sequential_puts_get_unique_ids() {
        let (store, _clock) = store_with_clock();

        let ids: HashSet<JobId> = (0..500)
            .map(|_| store.put(new_job("medium")).unwrap().id)
            .collect();

        assert_eq!(ids.len(), 500);
        assert_eq!(store.len(), 500);
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let (store, clock) = store_with_clock();
        store.put(new_job("small")).unwrap();
        store.put(new_job("small")).unwrap();

        clock.advance(Duration::from_secs(20 * 60));
        let fresh = store.put(new_job("large")).unwrap();

        clock.advance(Duration::from_secs(10 * 60));
        assert_eq!(store.sweep(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh.id).is_some());
    }

    #[test]
    fn test_put_sweeps_expired_jobs() {
        let (store, clock) = store_with_clock();
        store.put(new_job("small")).unwrap();
        store.put(new_job("small")).unwrap();

        clock.advance(DEFAULT_TTL);
        store.put(new_job("small")).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_custom_ttl() {
        let clock = Arc::new(ManualClock::new(START_MS));
        let store = PrintJobStore::new(clock.clone(), Duration::from_secs(5));

        let stored = store.put(new_job("small")).unwrap();
        assert_eq!(stored.expires_at_epoch_ms, START_MS + 5_000);

        clock.advance(Duration::from_secs(5));
        assert!(store.get(&stored.id).is_none());
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_wrapping() {
        let clock = Arc::new(ManualClock::new(START_MS));
        let store = PrintJobStore::new(clock.clone(), Duration::from_secs(10_000_000_000_000_000));

        let stored = store.put(new_job("small")).unwrap();
        assert_eq!(stored.expires_at_epoch_ms, i64::MAX);
        assert!(store.get(&stored.id).is_some());

        let store = PrintJobStore::new(clock, Duration::MAX);
        let stored = store.put(new_job("small")).unwrap();
        assert!(stored.expires_at_epoch_ms > START_MS);
    }

    #[test]
    fn test_shutdown_drops_jobs_and_rejects_puts() {
        let (store, _clock) = store_with_clock();
        let stored = store.put(new_job("small")).unwrap();

        assert_eq!(store.shutdown(), 1);
        assert!(store.is_closed());
        assert!(store.get(&stored.id).is_none());
        assert_eq!(store.put(new_job("small")), Err(StoreError::Closed));
    }

    #[test]
    fn test_concurrent_puts_are_not_lost() {
        let (store, _clock) = store_with_clock();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| store.put(new_job("small")).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<JobId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }

    #[test]
    fn test_concurrent_get_and_sweep_agree_on_expired() {
        let (store, clock) = store_with_clock();
        let store = Arc::new(store);
        let stored = store.put(new_job("small")).unwrap();
        clock.advance(DEFAULT_TTL);

        let reader = {
            let store = store.clone();
            let id = stored.id.clone();
            std::thread::spawn(move || store.get(&id))
        };
        let swept = store.sweep();

        assert!(reader.join().unwrap().is_none());
        assert!(swept <= 1);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_and_stops_on_shutdown() {
        let clock = Arc::new(ManualClock::new(START_MS));
        let store = Arc::new(PrintJobStore::with_default_ttl(clock.clone()));
        store.put(new_job("small")).unwrap();

        let handle = spawn_sweeper(store.clone(), Duration::from_secs(60));

        clock.advance(DEFAULT_TTL);
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(store.is_empty());

        store.shutdown();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();
    }
}
