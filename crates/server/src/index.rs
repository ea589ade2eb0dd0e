use axum::{routing::get, Json, Router};
use serde_json::{json, Map, Value};
use trendscope_core::timestamp;

use crate::health::SERVICE_VERSION;
use crate::AppState;

/// Every public route as `(method, path, summary)`, in listing order.
pub const ENDPOINTS: [(&str, &str, &str); 6] = [
    ("GET", "/api/trends/{region}", "Get trends by region"),
    ("GET", "/api/trends/{region}/{category}", "Get trends by region and category"),
    ("POST", "/api/analyze-opportunity", "Analyze market opportunity"),
    ("GET", "/api/regions", "Get available regions"),
    ("GET", "/api/categories", "Get available categories"),
    ("GET", "/api/status", "API status"),
];

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

pub async fn index() -> Json<Value> {
    let endpoints: Map<String, Value> = ENDPOINTS
        .iter()
        .map(|(method, path, summary)| (format!("{method} {path}"), Value::from(*summary)))
        .collect();

    Json(json!({
        "message": "Market Trends Analysis API",
        "version": SERVICE_VERSION,
        "description": "Intelligent API to detect emerging markets and trending products by region",
        "endpoints": endpoints,
        "example": {
            "GET /api/trends/united-states": "View trends in United States",
            "POST /api/analyze-opportunity": {
                "body": {
                    "region": "united-states",
                    "product": "AI-powered devices",
                    "category": "technology"
                }
            }
        },
        "timestamp": timestamp::now(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::Json;

    use super::index;

    #[tokio::test]
    async fn index_lists_every_endpoint_and_an_example() {
        let Json(payload) = index().await;

        let endpoints = payload["endpoints"].as_object().expect("endpoints object");
        assert_eq!(endpoints.len(), 6);
        assert_eq!(endpoints["POST /api/analyze-opportunity"], "Analyze market opportunity");
        assert_eq!(
            payload["example"]["POST /api/analyze-opportunity"]["body"]["product"],
            "AI-powered devices"
        );
        assert!(payload["timestamp"].is_string());
    }
}
