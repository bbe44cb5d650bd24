use std::sync::Arc;

use tracing::{debug, info};

use super::error::{LifecycleError, Result};
use super::models::{JobId, NewPrintJob, PrintJob, RetrievalHandle, SubmitRequest};
use super::store::{Lookup, PrintJobStore};
use crate::layout::{LabelSize, LayoutDescriptor};
use crate::observability::Metrics;

/// A print job as handed to a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedJob {
    pub job: PrintJob,
    pub layout: LayoutDescriptor,
}

/// Submission and retrieval of print jobs
///
/// Flow:
/// 1. `submit` validates the labels and normalizes the size selector
/// 2. The job is stored with the store's TTL; the raw selector is kept
/// 3. The caller gets a `/print/{id}` URL under `public_base_url`
/// 4. `retrieve` looks the id up and resolves the layout from the stored
///    selector, so layout table changes apply to jobs already in flight
#[derive(Clone)]
pub struct PrintJobLifecycle {
    store: Arc<PrintJobStore>,
    public_base_url: String,
    metrics: Arc<Metrics>,
}

impl PrintJobLifecycle {
    pub fn new(
        store: Arc<PrintJobStore>,
        public_base_url: impl Into<String>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            public_base_url,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<PrintJobStore> {
        &self.store
    }

    pub fn submit(&self, request: SubmitRequest) -> Result<RetrievalHandle> {
        // Print batches have no upper bound, only a lower one
        if request.labels.is_empty() {
            return Err(LifecycleError::Validation(
                "labels data is required".to_string(),
            ));
        }

        let size = LabelSize::parse(&request.label_size);
        if !size.is_known() {
            debug!(
                label_size = %size,
                fallback = %size.effective(),
                "Unknown label size, layout falls back to default"
            );
        }

        let label_count = request.labels.len();
        let stored = self.store.put(NewPrintJob {
            labels: request.labels,
            label_size: request.label_size,
            show_price: request.show_price.unwrap_or(true),
            show_condition: request.show_condition.unwrap_or(true),
        })?;

        self.metrics.job_submitted();
        info!(
            job_id = %stored.id,
            labels = label_count,
            label_size = %size,
            expires_at = stored.expires_at_epoch_ms,
            "Print job submitted"
        );

        Ok(RetrievalHandle {
            retrieval_url: self.retrieval_url(&stored.id),
            job_id: stored.id,
            expires_at_epoch_ms: stored.expires_at_epoch_ms,
        })
    }

    pub fn retrieve(&self, id: &str) -> Result<RetrievedJob> {
        let job_id = JobId::from(id);

        match self.store.lookup(&job_id) {
            Lookup::Found(job) => {
                self.metrics.job_retrieved();
                let layout = job.size().descriptor();
                debug!(job_id = %job_id, labels = job.labels.len(), "Print job retrieved");
                Ok(RetrievedJob { job, layout })
            }
            Lookup::Expired => {
                self.metrics.job_expired();
                info!(job_id = %job_id, "Print job requested after expiry");
                Err(LifecycleError::NotFound(id.to_string()))
            }
            Lookup::Missing => {
                self.metrics.job_missing();
                debug!(job_id = %job_id, "Print job not found");
                Err(LifecycleError::NotFound(id.to_string()))
            }
        }
    }

    pub fn retrieval_url(&self, id: &JobId) -> String {
        format!("{}/print/{}", self.public_base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolve;
    use crate::print_jobs::Label;
    use crate::print_jobs::clock::ManualClock;
    use crate::print_jobs::store::DEFAULT_TTL;
    use std::time::Duration;

    fn labels(count: usize) -> Vec<Label> {
        (0..count)
            .map(|n| Label {
                title: format!("Card {n}"),
                variation: None,
                condition: Some("NM".to_string()),
                identifier: format!("SKU-{n}"),
                price: "$2.50".to_string(),
            })
            .collect()
    }

    fn request(label_size: &str, count: usize) -> SubmitRequest {
        SubmitRequest {
            labels: labels(count),
            label_size: label_size.to_string(),
            show_price: None,
            show_condition: None,
        }
    }

    fn lifecycle() -> (PrintJobLifecycle, Arc<ManualClock>, Arc<Metrics>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let store = Arc::new(PrintJobStore::with_default_ttl(clock.clone()));
        let metrics = Arc::new(Metrics::new());
        (
            PrintJobLifecycle::new(store, "https://labels.example.com/", metrics.clone()),
            clock,
            metrics,
        )
    }

    #[test]
    fn test_submit_and_retrieve() {
        let (lifecycle, _clock, metrics) = lifecycle();

        let handle = lifecycle.submit(request("large", 3)).unwrap();
        assert_eq!(
            handle.retrieval_url,
            format!("https://labels.example.com/print/{}", handle.job_id)
        );

        let retrieved = lifecycle.retrieve(handle.job_id.as_str()).unwrap();
        assert_eq!(retrieved.job.labels, labels(3));
        assert_eq!(retrieved.job.expires_at_epoch_ms, handle.expires_at_epoch_ms);
        assert_eq!(retrieved.layout.grid_cols, 2);
        assert_eq!(retrieved.layout.rows_for(retrieved.job.labels.len()), 2);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.jobs_submitted, 1);
        assert_eq!(snapshot.jobs_retrieved, 1);
    }

    #[test]
    fn test_flags_default_to_true() {
        let (lifecycle, _clock, _metrics) = lifecycle();

        let handle = lifecycle.submit(request("small", 1)).unwrap();
        let job = lifecycle.retrieve(handle.job_id.as_str()).unwrap().job;

        assert!(job.show_price);
        assert!(job.show_condition);
    }

    #[test]
    fn test_explicit_flags_are_kept() {
        let (lifecycle, _clock, _metrics) = lifecycle();

        let mut req = request("small", 1);
        req.show_price = Some(false);
        req.show_condition = Some(false);
        let handle = lifecycle.submit(req).unwrap();
        let job = lifecycle.retrieve(handle.job_id.as_str()).unwrap().job;

        assert!(!job.show_price);
        assert!(!job.show_condition);
    }

    #[test]
    fn test_unknown_size_is_stored_raw() {
        let (lifecycle, _clock, _metrics) = lifecycle();

        let handle = lifecycle.submit(request("bogus", 2)).unwrap();
        let retrieved = lifecycle.retrieve(handle.job_id.as_str()).unwrap();

        assert_eq!(retrieved.job.label_size, "bogus");
        assert_eq!(retrieved.layout, resolve("medium"));
    }

    #[test]
    fn test_empty_labels_rejected_without_storing() {
        let (lifecycle, _clock, metrics) = lifecycle();

        let err = lifecycle.submit(request("small", 0)).unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
        assert!(lifecycle.store().is_empty());
        assert_eq!(metrics.snapshot().jobs_submitted, 0);
    }

    #[test]
    fn test_large_batches_are_not_capped() {
        let (lifecycle, _clock, _metrics) = lifecycle();

        let handle = lifecycle.submit(request("dymo5xl", 500)).unwrap();
        let retrieved = lifecycle.retrieve(handle.job_id.as_str()).unwrap();
        assert_eq!(retrieved.job.labels.len(), 500);
    }

    #[test]
    fn test_retrieve_after_ttl_is_not_found_and_evicted() {
        let (lifecycle, clock, metrics) = lifecycle();
        let handle = lifecycle.submit(request("medium", 1)).unwrap();

        clock.advance(DEFAULT_TTL + Duration::from_secs(1));

        let err = lifecycle.retrieve(handle.job_id.as_str()).unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(lifecycle.store().is_empty());

        let err = lifecycle.retrieve(handle.job_id.as_str()).unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.jobs_expired, 1);
        assert_eq!(snapshot.jobs_missing, 1);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let (lifecycle, _clock, _metrics) = lifecycle();
        lifecycle.store().shutdown();

        let err = lifecycle.submit(request("small", 1)).unwrap_err();
        assert!(matches!(err, LifecycleError::Store(_)));
    }
}
