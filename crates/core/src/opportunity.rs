//! Opportunity scoring: does a product match a known trend for a
//! region/category pair?
//!
//! Matching is bidirectional substring containment after lower-casing: the
//! product matches a trend label when either string contains the other. There
//! is no token or word-boundary logic, so `"ai"` matches any label with `ai`
//! anywhere in it. The score is one of two fixed values.

use chrono::{DateTime, Utc};

use crate::catalog::TrendCatalog;
use crate::domain::opportunity::{OpportunityRequest, OpportunityResult};
use crate::errors::EvaluationError;
use crate::timestamp;

pub const TRENDING_SCORE: u8 = 85;
pub const NOT_TRENDING_SCORE: u8 = 45;
pub const MAX_ECHOED_TRENDS: usize = 5;

pub const TRENDING_RECOMMENDATION: &str = "Excellent opportunity! This product is trending.";
pub const NOT_TRENDING_RECOMMENDATION: &str =
    "Product is not currently trending, but may have potential.";

pub fn evaluate(
    catalog: &TrendCatalog,
    request: &OpportunityRequest,
) -> Result<OpportunityResult, EvaluationError> {
    evaluate_at(catalog, request, Utc::now())
}

pub fn evaluate_at(
    catalog: &TrendCatalog,
    request: &OpportunityRequest,
    now: DateTime<Utc>,
) -> Result<OpportunityResult, EvaluationError> {
    let region = required("region", request.region.as_deref())?;
    let product = required("product", request.product.as_deref())?;
    let category = required("category", request.category.as_deref())?;

    // A known region without this category scores against an empty list, so
    // the only lookup failure left is an unknown region.
    let trending_products = catalog
        .trends_or_empty(region, category)
        .map_err(|_| EvaluationError::RegionNotSupported { region: region.to_string() })?;

    let is_trending = matches_any_trend(product, trending_products);

    Ok(OpportunityResult {
        region: region.to_string(),
        product: product.to_string(),
        category: category.to_string(),
        is_trending,
        opportunity_score: score(is_trending),
        recommendation: recommendation(is_trending),
        trending_products: trending_products.iter().take(MAX_ECHOED_TRENDS).cloned().collect(),
        timestamp: timestamp::format(now),
    })
}

/// True when any label contains the product or the product contains the
/// label, ignoring case.
pub fn matches_any_trend(product: &str, trends: &[String]) -> bool {
    let product = product.to_lowercase();
    trends.iter().any(|trend| {
        let trend = trend.to_lowercase();
        trend.contains(&product) || product.contains(&trend)
    })
}

pub fn score(is_trending: bool) -> u8 {
    if is_trending {
        TRENDING_SCORE
    } else {
        NOT_TRENDING_SCORE
    }
}

pub fn recommendation(is_trending: bool) -> &'static str {
    if is_trending {
        TRENDING_RECOMMENDATION
    } else {
        NOT_TRENDING_RECOMMENDATION
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, EvaluationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(EvaluationError::Validation(format!("{field} is required"))),
    }
}
