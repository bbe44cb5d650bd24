//! API models for the qrlabel HTTP surface.
//!
//! Wire names are camelCase so the browser print page can consume them
//! directly:
//!
//! - `POST /api/print-labels` accepts a [`SubmitRequest`] and answers with
//!   [`PrintLabelsResponse`]
//! - `GET /api/get-print-job?id=` returns the stored [`PrintJob`]
//! - `GET /api/print-jobs/{id}` returns a [`PrintJobView`] (job plus layout)
//! - QR endpoints take [`QrRequest`] / [`QrBatchRequest`]
//!
//! A submission looks like:
//!
//! ```json
//! {
//!   "labels": [
//!     {
//!       "title": "Charizard",
//!       "variation": "Holo",
//!       "condition": "NM",
//!       "identifier": "https://shop.example.com/p/6",
//!       "price": "$120.00"
//!     }
//!   ],
//!   "labelSize": "large",
//!   "showPrice": true,
//!   "showCondition": false
//! }
//! ```
//!
//! [`SubmitRequest`]: crate::print_jobs::SubmitRequest

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::layout::LayoutDescriptor;
use crate::observability::MetricsSnapshot;
use crate::print_jobs::PrintJob;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrintLabelsResponse {
    pub success: bool,
    pub print_url: String,
    pub job_id: String,
    pub expires: i64,
}

#[derive(Debug, Deserialize)]
pub struct PrintJobQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrintJobView {
    pub job: PrintJob,
    pub layout: LayoutDescriptor,
}

/// Size as sent by clients: either a JSON number or a numeric string
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SizeValue {
    Number(serde_json::Number),
    Text(String),
}

impl SizeValue {
    pub fn as_text(&self) -> String {
        match self {
            SizeValue::Number(n) => n.to_string(),
            SizeValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub url: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QrRequest {
    pub url: Option<String>,
    pub size: Option<SizeValue>,
}

#[derive(Debug, Deserialize)]
pub struct QrBatchRequest {
    pub urls: Option<Vec<String>>,
    pub size: Option<SizeValue>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQr {
    pub url: String,
    pub data_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrResponse {
    pub qr_codes: Vec<GeneratedQr>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
    pub live_jobs: usize,
    pub metrics: MetricsSnapshot,
}
