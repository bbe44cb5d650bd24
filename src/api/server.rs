use std::sync::Arc;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::{decompression::RequestDecompressionLayer, trace::TraceLayer};
use tracing::info;

use super::{
    services::{
        batch_qr, generate_qr, get_print_job, get_print_job_view, get_print_sheet, health,
        list_layouts, qr_image, qr_image_post, submit_print_job,
    },
    state::AppState,
};
use crate::config::Config;
use crate::print_jobs::{PrintJobStore, SystemClock, spawn_sweeper};
use crate::qr::PngQrEncoder;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the HTTP router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/print-labels", post(submit_print_job))
        .route("/api/get-print-job", get(get_print_job))
        .route("/api/print-jobs/{id}", get(get_print_job_view))
        .route("/api/print-jobs/{id}/sheet", get(get_print_sheet))
        .route("/api/layouts", get(list_layouts))
        .route("/api/qr", get(qr_image).post(qr_image_post))
        .route("/api/generate-qr", post(generate_qr))
        .route("/api/batch-qr", post(batch_qr))
        .route("/health", get(health))
        .with_state(state)
        // gzip request bodies are inflated before handlers read them
        .layer(RequestDecompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config) -> Result<(), AnyError> {
    let address = config.server.bind_addr;

    let store = Arc::new(PrintJobStore::new(
        Arc::new(SystemClock),
        config.print_jobs.ttl(),
    ));
    info!(
        ttl_secs = config.print_jobs.ttl_secs,
        sweep_interval_secs = config.print_jobs.sweep_interval_secs,
        "Print job store ready"
    );

    let sweeper = spawn_sweeper(store.clone(), config.print_jobs.sweep_interval());

    let encoder = Arc::new(PngQrEncoder::new(config.qr.margin));
    let state = AppState::new(config, store.clone(), encoder);
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "qrlabel API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown();

    if let Err(err) = sweeper.await {
        tracing::warn!(error = %err, "Print job sweeper did not stop cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
