use std::collections::{BTreeMap, HashMap};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use super::{
    error::ApiError,
    models::{
        GenerateQrResponse, GeneratedQr, HealthResponse, PrintJobQuery, PrintJobView,
        PrintLabelsResponse, QrBatchRequest, QrQuery, QrRequest,
    },
    state::AppState,
    utils::read_json,
    validation::{self, QrRequestError},
};
use crate::layout::{LabelSheet, LabelSize, LayoutDescriptor};
use crate::print_jobs::SubmitRequest;
use crate::qr::{QrError, png_data_url, zip_pngs};

const PNG_CACHE_CONTROL: &str = "public, max-age=86400";

/// Print job submission (POST /api/print-labels)
///
/// Stores the labels for later printing and answers with the URL of the
/// print page. Batches are not capped; an empty batch is rejected before
/// anything is stored.
pub async fn submit_print_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let request: SubmitRequest =
        read_json(&headers, body, state.config.server.max_payload_bytes).await?;

    let handle = state.lifecycle.submit(request)?;

    let response = PrintLabelsResponse {
        success: true,
        print_url: handle.retrieval_url,
        job_id: handle.job_id.to_string(),
        expires: handle.expires_at_epoch_ms,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Print job fetch by query (GET /api/get-print-job?id=)
///
/// Returns the stored job as submitted; the print page resolves the layout
/// from `labelSize` itself.
pub async fn get_print_job(
    State(state): State<AppState>,
    Query(query): Query<PrintJobQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidPayload("print job ID is required".to_string()))?;

    let retrieved = state.lifecycle.retrieve(&id)?;

    Ok((StatusCode::OK, Json(retrieved.job)))
}

/// Print job with its resolved layout (GET /api/print-jobs/{id})
pub async fn get_print_job_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let retrieved = state.lifecycle.retrieve(&id)?;

    let view = PrintJobView {
        job: retrieved.job,
        layout: retrieved.layout,
    };

    Ok((StatusCode::OK, Json(view)))
}

/// Print job placed on its label grid (GET /api/print-jobs/{id}/sheet)
pub async fn get_print_sheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let retrieved = state.lifecycle.retrieve(&id)?;
    let sheet = LabelSheet::arrange(&retrieved.job);

    debug!(job_id = %id, rows = sheet.rows, pages = sheet.pages, "Print sheet arranged");

    Ok((StatusCode::OK, Json(sheet)))
}

/// Layout table (GET /api/layouts)
pub async fn list_layouts() -> impl IntoResponse {
    let layouts: BTreeMap<String, LayoutDescriptor> = LabelSize::KNOWN
        .iter()
        .map(|size| (size.as_str().to_string(), size.descriptor()))
        .collect();

    Json(layouts)
}

/// Single QR code as PNG (GET /api/qr?url=&size=)
pub async fn qr_image(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let url = validation::qr_url(query.url).map_err(map_qr_request_error)?;
    let size = validation::qr_size(query.size.as_deref(), &state.config.qr)
        .map_err(map_qr_request_error)?;

    render_png(&state, url, size).await
}

/// Single QR code as PNG (POST /api/qr)
pub async fn qr_image_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let request: QrRequest =
        read_json(&headers, body, state.config.server.max_payload_bytes).await?;

    let url = validation::qr_url(request.url).map_err(map_qr_request_error)?;
    let size = request.size.map(|s| s.as_text());
    let size = validation::qr_size(size.as_deref(), &state.config.qr)
        .map_err(map_qr_request_error)?;

    render_png(&state, url, size).await
}

/// QR codes as PNG data URLs (POST /api/generate-qr)
pub async fn generate_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let request: QrBatchRequest =
        read_json(&headers, body, state.config.server.max_payload_bytes).await?;

    let urls = validation::qr_urls(request.urls, None).map_err(map_qr_request_error)?;
    let size = request.size.map(|s| s.as_text());
    let size = validation::qr_size(size.as_deref(), &state.config.qr)
        .map_err(map_qr_request_error)?;

    let encoder = state.encoder.clone();
    let qr_codes = tokio::task::spawn_blocking(move || {
        urls.into_iter()
            .map(|url| -> Result<GeneratedQr, QrError> {
                let png = encoder.encode_png(&url, size)?;
                Ok(GeneratedQr {
                    data_url: png_data_url(&png),
                    url,
                })
            })
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    state.metrics.qr_rendered(qr_codes.len() as u64);
    info!(count = qr_codes.len(), size, "Generated QR data URLs");

    Ok(Json(GenerateQrResponse { qr_codes }))
}

/// QR codes bundled as a ZIP download (POST /api/batch-qr)
pub async fn batch_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let request: QrBatchRequest =
        read_json(&headers, body, state.config.server.max_payload_bytes).await?;

    let urls = validation::qr_urls(request.urls, Some(state.config.qr.max_batch))
        .map_err(map_qr_request_error)?;
    let size = request.size.map(|s| s.as_text());
    let size = validation::qr_size(size.as_deref(), &state.config.qr)
        .map_err(map_qr_request_error)?;

    let count = urls.len();
    let encoder = state.encoder.clone();
    let archive = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, QrError> {
        let images = urls
            .iter()
            .map(|url| encoder.encode_png(url, size))
            .collect::<Result<Vec<_>, _>>()?;
        zip_pngs(&images)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    state.metrics.qr_rendered(count as u64);
    info!(count, size, bytes = archive.len(), "Built QR code archive");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip"),
            (header::CONTENT_DISPOSITION, "attachment; filename=qrcodes.zip"),
        ],
        archive,
    ))
}

/// Health check endpoint (GET /health)
///
/// Reports 503 once the print job store has been shut down.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store();

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert(
        "print_jobs".to_string(),
        if store.is_closed() { "shut_down" } else { "healthy" }.to_string(),
    );

    let all_healthy = components.values().all(|status| status == "healthy");

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
        live_jobs: store.len(),
        metrics: state.metrics.snapshot(),
    };

    (status_code, Json(response))
}

async fn render_png(state: &AppState, url: String, size: u32) -> Result<Response, ApiError> {
    let encoder = state.encoder.clone();
    let png = tokio::task::spawn_blocking(move || encoder.encode_png(&url, size))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    state.metrics.qr_rendered(1);

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, PNG_CACHE_CONTROL),
        ],
        png,
    )
        .into_response())
}

/// Maps QR request validation errors to API errors
fn map_qr_request_error(err: QrRequestError) -> ApiError {
    ApiError::InvalidPayload(err.to_string())
}
