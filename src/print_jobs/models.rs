use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::layout::LabelSize;

/// One printable label.
///
/// `identifier` is what the QR code encodes; the other fields are only
/// printed as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub identifier: String,
    pub price: String,
}

/// A stored batch of labels with its display flags.
///
/// `label_size` is the selector exactly as submitted; the layout is resolved
/// from it again whenever the job is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    pub labels: Vec<Label>,
    pub label_size: String,
    pub show_price: bool,
    pub show_condition: bool,
    #[serde(rename = "expires")]
    pub expires_at_epoch_ms: i64,
}

impl PrintJob {
    pub fn size(&self) -> LabelSize {
        LabelSize::parse(&self.label_size)
    }

    pub fn is_live_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_epoch_ms
    }
}

/// Print job contents before the store stamps an expiry on them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrintJob {
    pub labels: Vec<Label>,
    pub label_size: String,
    pub show_price: bool,
    pub show_condition: bool,
}

impl NewPrintJob {
    pub(crate) fn expiring_at(self, expires_at_epoch_ms: i64) -> PrintJob {
        PrintJob {
            labels: self.labels,
            label_size: self.label_size,
            show_price: self.show_price,
            show_condition: self.show_condition,
            expires_at_epoch_ms,
        }
    }
}

/// Opaque print job handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submission payload (`POST /api/print-labels`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default = "default_label_size")]
    pub label_size: String,
    #[serde(default)]
    pub show_price: Option<bool>,
    #[serde(default)]
    pub show_condition: Option<bool>,
}

fn default_label_size() -> String {
    LabelSize::DEFAULT.as_str().to_string()
}

/// What a submitter gets back: where the job can be fetched, and until when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalHandle {
    pub job_id: JobId,
    pub retrieval_url: String,
    pub expires_at_epoch_ms: i64,
}
