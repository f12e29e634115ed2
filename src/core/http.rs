//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::classifier::{ClassifyError, TransactionClassifier};
use crate::metrics::Metrics;

pub const SERVICE_NAME: &str = "sagefin-classifier";

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<TransactionClassifier>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(classifier: Arc<TransactionClassifier>, metrics: Arc<Metrics>) -> Self {
        Self {
            classifier,
            metrics,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON error body returned for every rejected request
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn invalid_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_request",
            message,
        }
    }
}

impl From<&ClassifyError> for ApiError {
    fn from(err: &ClassifyError) -> Self {
        let status = match err.kind() {
            "schema_mismatch" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.kind, "message": self.message })),
        )
            .into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME,
        "model": state.classifier.summary(),
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Classify a batch of transactions into category labels
async fn classify_transactions(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        state
            .metrics
            .classification_failures_total
            .with_label_values(&["invalid_request"])
            .inc();
        ApiError::invalid_request(rejection.body_text())
    })?;

    match state.classifier.classify(&payload) {
        Ok(labels) => {
            state
                .metrics
                .transactions_classified_total
                .inc_by(labels.len() as u64);
            Ok(Json(labels.iter().map(|l| l.to_string()).collect()))
        }
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Classification request rejected");
            state
                .metrics
                .classification_failures_total
                .with_label_values(&[e.kind()])
                .inc();
            Err(ApiError::from(&e))
        }
    }
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/classify", post(classify_transactions))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    classifier: Arc<TransactionClassifier>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::new(classifier, metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Classification endpoint available at http://0.0.0.0:{}/classify", port);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve until `shutdown` resolves. If the server stops first (the port is
/// taken, the listener fails) its error is returned.
pub async fn serve_until_shutdown<F>(
    port: u16,
    classifier: Arc<TransactionClassifier>,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()>,
{
    let server_handle = tokio::spawn(start_server(port, classifier));

    tokio::select! {
        _ = shutdown => {
            info!("Shutting down classifier server...");
            Ok(())
        }
        joined = server_handle => match joined {
            Ok(Ok(())) => Err("HTTP server stopped unexpectedly".into()),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(e.into()),
        }
    }
}
