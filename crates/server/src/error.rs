use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};
use trendscope_core::errors::{EvaluationError, InterfaceError, LookupError};
use trendscope_core::timestamp;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Failure returned by a handler; rendered as `{success:false, message, timestamp}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError(pub InterfaceError);

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(InterfaceError::not_found(message))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(InterfaceError::bad_request(message))
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InterfaceError> for ApiError {
    fn from(value: InterfaceError) -> Self {
        Self(value)
    }
}

impl From<EvaluationError> for ApiError {
    fn from(value: EvaluationError) -> Self {
        Self(value.into())
    }
}

impl From<LookupError> for ApiError {
    fn from(value: LookupError) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(event_name = "api.request.failed", error = %self.0, "request failed");
        }

        let body = ErrorBody {
            success: false,
            message: self.0.user_message().to_string(),
            timestamp: timestamp::now(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Panic hook for `CatchPanicLayer`: log the payload, answer with a generic 500.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    warn!(event_name = "api.request.panicked", detail = %detail, "handler panicked");

    ApiError(InterfaceError::internal(detail)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use serde_json::Value;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    use super::handle_panic;

    #[tokio::test]
    async fn panics_become_generic_internal_errors() {
        let app = Router::new()
            .route("/boom", get(|| async { panic!("catalog index 7 out of range") as () }))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload["success"], false);
        assert_eq!(payload["message"], "Internal server error");
        assert!(!bytes.windows(5).any(|window| window == b"index"));
    }
}
