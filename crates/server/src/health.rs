use axum::{routing::get, Json, Router};
use serde::Serialize;
use trendscope_core::timestamp;

use crate::AppState;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const STATUS_MESSAGE: &str = "Market Analysis API is running correctly";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/status", get(status))
}

/// The catalog is immutable and already loaded once the router exists, so
/// there is nothing further to probe.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        message: STATUS_MESSAGE,
        version: SERVICE_VERSION,
        timestamp: timestamp::now(),
    })
}
