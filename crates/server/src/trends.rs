//! Catalog and scoring routes.
//!
//! - `GET  /api/trends/{region}`           : every category for a region
//! - `GET  /api/trends/{region}/{category}`: one trend list
//! - `POST /api/analyze-opportunity`       : score a product against a trend list
//! - `GET  /api/regions`                   : catalog regions, in data order
//! - `GET  /api/categories`                : the fixed category list

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info};
use trendscope_core::errors::REQUIRED_FIELDS_MESSAGE;
use trendscope_core::{
    opportunity, timestamp, Category, OpportunityRequest, OpportunityResult, Region,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RegionTrendsResponse {
    pub success: bool,
    pub region: String,
    pub trends: Region,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryTrendsResponse {
    pub success: bool,
    pub region: String,
    pub category: String,
    pub products: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: OpportunityResult,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub success: bool,
    pub regions: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<&'static str>,
    pub timestamp: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/trends/{region}", get(region_trends))
        .route("/api/trends/{region}/{category}", get(category_trends))
        .route("/api/analyze-opportunity", post(analyze_opportunity))
        .route("/api/regions", get(list_regions))
        .route("/api/categories", get(list_categories))
}

pub async fn region_trends(
    Path(region): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RegionTrendsResponse>, ApiError> {
    let trends = state.catalog.lookup_region(&region).map_err(|_| {
        debug!(event_name = "api.trends.region_not_found", region = %region, "unknown region");
        ApiError::not_found(format!(
            "Region not found. Available regions: {}",
            state.catalog.region_ids().join(", ")
        ))
    })?;

    Ok(Json(RegionTrendsResponse {
        success: true,
        trends: trends.clone(),
        region,
        timestamp: timestamp::now(),
    }))
}

pub async fn category_trends(
    Path((region, category)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<CategoryTrendsResponse>, ApiError> {
    let products = state.catalog.lookup(&region, &category)?.to_vec();

    Ok(Json(CategoryTrendsResponse {
        success: true,
        region,
        category,
        products,
        timestamp: timestamp::now(),
    }))
}

/// Bodies that fail to deserialize (not JSON, wrong field types) get the same
/// 400 as a missing field.
pub async fn analyze_opportunity(
    State(state): State<AppState>,
    payload: Result<Json<OpportunityRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| {
        debug!(
            event_name = "api.analyze.rejected_body",
            correlation_id = %correlation_id,
            reason = %rejection.body_text(),
            "analyze request body could not be decoded"
        );
        ApiError::bad_request(REQUIRED_FIELDS_MESSAGE)
    })?;

    let analysis = opportunity::evaluate(&state.catalog, &request).map_err(|error| {
        debug!(
            event_name = "api.analyze.failed",
            correlation_id = %correlation_id,
            error = %error,
            "analyze request failed"
        );
        ApiError::from(error)
    })?;

    info!(
        event_name = "api.analyze.completed",
        correlation_id = %correlation_id,
        region = %analysis.region,
        category = %analysis.category,
        is_trending = analysis.is_trending,
        opportunity_score = analysis.opportunity_score,
        "opportunity analyzed"
    );

    Ok(Json(AnalysisResponse { success: true, analysis }))
}

pub async fn list_regions(State(state): State<AppState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        success: true,
        regions: state.catalog.region_ids().into_iter().map(str::to_string).collect(),
        timestamp: timestamp::now(),
    })
}

pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        success: true,
        categories: Category::identifiers().collect(),
        timestamp: timestamp::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        Json,
    };
    use trendscope_core::{OpportunityRequest, TrendCatalog};

    use super::*;

    fn state() -> State<AppState> {
        State(AppState {
            catalog: Arc::new(TrendCatalog::reference().expect("reference catalog should load")),
        })
    }

    #[tokio::test]
    async fn region_trends_echo_the_requested_spelling() {
        let Json(payload) = region_trends(Path("Europe".to_string()), state())
            .await
            .expect("known region should resolve");

        assert!(payload.success);
        assert_eq!(payload.region, "Europe");
        assert_eq!(payload.trends.id, "europe");
    }

    #[tokio::test]
    async fn unknown_region_lists_available_regions() {
        let error = region_trends(Path("mars".to_string()), state())
            .await
            .expect_err("unknown region should fail");

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error.0.user_message(),
            "Region not found. Available regions: united-states, canada, europe, australia, asia"
        );
    }

    #[tokio::test]
    async fn category_trends_require_both_keys() {
        let Json(payload) =
            category_trends(Path(("ASIA".to_string(), "Finance".to_string())), state())
                .await
                .expect("known pair should resolve");
        assert_eq!(payload.products[0], "mobile payments");
        assert_eq!(payload.category, "Finance");

        let error = category_trends(Path(("asia".to_string(), "toys".to_string())), state())
            .await
            .expect_err("unknown category should fail");
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.0.user_message(), "Region or category not found");
    }

    #[tokio::test]
    async fn analyze_scores_trending_product() {
        let Json(payload) = analyze_opportunity(
            state(),
            Ok(Json(OpportunityRequest::new("united-states", "AI-powered devices", "technology"))),
        )
        .await
        .expect("analysis should succeed");

        assert!(payload.success);
        assert!(payload.analysis.is_trending);
        assert_eq!(payload.analysis.opportunity_score, 85);
    }

    #[tokio::test]
    async fn analyze_maps_missing_field_and_unknown_region() {
        let missing = analyze_opportunity(
            state(),
            Ok(Json(OpportunityRequest {
                product: None,
                ..OpportunityRequest::new("asia", "", "home")
            })),
        )
        .await
        .expect_err("missing product should fail");
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let unknown = analyze_opportunity(
            state(),
            Ok(Json(OpportunityRequest::new("atlantis", "submarines", "technology"))),
        )
        .await
        .expect_err("unknown region should fail");
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.0.user_message(), "Region not supported");
    }

    #[tokio::test]
    async fn categories_are_fixed() {
        let Json(payload) = list_categories().await;
        assert_eq!(payload.categories, vec!["technology", "fashion", "home", "health", "finance"]);
    }
}
