//! Health check route

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::routes::RouteTable;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Records in the collection, absent if the store could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

/// Health check handler
pub async fn health_handler(State(routes): State<Arc<RouteTable>>) -> impl IntoResponse {
    let records = match routes.control().store().len().await {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::error!(error = %e, "health check could not read store");
            None
        }
    };

    let (status, label) = match records {
        Some(_) => (StatusCode::OK, "ok"),
        None => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
    };

    (status, Json(response))
}
