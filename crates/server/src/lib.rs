pub mod bootstrap;
pub mod error;
pub mod health;
pub mod index;
pub mod trends;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use trendscope_core::TrendCatalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TrendCatalog>,
}

impl AppState {
    pub fn new(catalog: TrendCatalog) -> Self {
        Self { catalog: Arc::new(catalog) }
    }
}

/// Every route plus the JSON 404 fallback, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(index::router())
        .merge(health::router())
        .merge(trends::router())
        .fallback(error::route_not_found)
        .with_state(state)
}

/// The router as served: request tracing, panic capture and optional CORS.
pub fn app(state: AppState, cors_enabled: bool) -> Router {
    let router = router(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}
