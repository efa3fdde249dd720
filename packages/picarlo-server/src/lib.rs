//! Point-source service: streams random 16-byte samples for Monte Carlo pi
//! estimation.

pub mod generator;

use axum::{
    body::Body,
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Deserialize)]
struct PointParams {
    #[serde(default)]
    n: Option<u64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `GET /points?n=<count>` — stream `16 * n` random bytes.
///
/// `n` is required and must be positive; the response contract is a body of
/// exactly `n` 16-byte records, which rules out an open-ended stream.
async fn get_points(Query(params): Query<PointParams>) -> Response {
    let count = match params.n {
        Some(n) if n > 0 => n,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "query parameter n must be a positive integer",
            )
                .into_response();
        }
    };

    tracing::debug!(count, "streaming points");

    let (tx, rx) = mpsc::unbounded_channel::<Bytes>();
    tokio::task::spawn_blocking(move || generator::produce_points(count, tx));

    let stream = UnboundedReceiverStream::new(rx).map(Ok::<Bytes, Infallible>);
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(stream),
    )
        .into_response()
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}

pub fn build_router() -> Router {
    Router::new()
        .route("/points", get(get_points))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
