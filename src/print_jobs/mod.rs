//! Print job hand-off
//!
//! A submitted batch of labels is parked in an in-memory store under an
//! opaque id so a second page or device can fetch and print it later.
//!
//! ## Lifetime
//!
//! - Jobs expire 30 minutes after submission (configurable)
//! - An expired job is never served: reads evict it, writes sweep it, and
//!   an optional background sweeper bounds memory between writes
//! - Jobs live in this process only; a restart or another instance will
//!   not see them
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qrlabel::print_jobs::{PrintJobLifecycle, PrintJobStore, SystemClock};
//!
//! let store = Arc::new(PrintJobStore::with_default_ttl(Arc::new(SystemClock)));
//! let lifecycle = PrintJobLifecycle::new(store, "https://labels.example.com", metrics);
//! let handle = lifecycle.submit(request)?;
//! let retrieved = lifecycle.retrieve(handle.job_id.as_str())?;
//! ```

pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LifecycleError, StoreError};
pub use lifecycle::{PrintJobLifecycle, RetrievedJob};
pub use models::{JobId, Label, NewPrintJob, PrintJob, RetrievalHandle, SubmitRequest};
pub use store::{DEFAULT_TTL, Lookup, PrintJobStore, StoredJob, spawn_sweeper};
