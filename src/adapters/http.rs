//! HTTP trigger for the reconciliation job.
//!
//! `GET /process-logs` runs one job with the configuration resolved at
//! startup and answers with the plain-text summary line.

use crate::config::local::LocalStorage;
use crate::config::toml_config::TomlConfig;
use crate::core::etl::ReconEngine;
use crate::core::pipeline::LogReconPipeline;
use crate::core::report::ReportWriter;
use crate::core::ConfigProvider;
use crate::utils::error::ReconError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    config: Arc<TomlConfig>,
    storage: LocalStorage,
}

impl AppState {
    pub fn new(config: TomlConfig, storage: LocalStorage) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }
}

pub struct ApiError(ReconError);

impl From<ReconError> for ApiError {
    fn from(err: ReconError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(
            category = ?self.0.category(),
            severity = ?self.0.severity(),
            "❌ Reconciliation failed: {}",
            self.0
        );
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process-logs", get(process_logs))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn process_logs(State(state): State<AppState>) -> Result<String, ApiError> {
    let config = state.config.as_ref().clone();
    let writer = ReportWriter::new(config.report_format()).with_sheet_name(config.sheet_name());
    let monitor_enabled = config.monitoring_enabled();

    let pipeline = LogReconPipeline::new(state.storage.clone(), config)?.with_report_writer(writer);
    let engine = ReconEngine::new_with_monitoring(pipeline, monitor_enabled);

    let summary = engine.run().await?;
    tracing::info!("✅ {}", summary);

    Ok(summary.to_string())
}
