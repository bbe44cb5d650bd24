use std::sync::Arc;

use crate::config::Config;
use crate::observability::Metrics;
use crate::print_jobs::{PrintJobLifecycle, PrintJobStore};
use crate::qr::QrEncoder;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lifecycle: PrintJobLifecycle,
    pub encoder: Arc<dyn QrEncoder>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<PrintJobStore>, encoder: Arc<dyn QrEncoder>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let lifecycle = PrintJobLifecycle::new(
            store,
            config.server.public_base_url.clone(),
            metrics.clone(),
        );

        Self {
            config: Arc::new(config),
            lifecycle,
            encoder,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<PrintJobStore> {
        self.lifecycle.store()
    }
}
