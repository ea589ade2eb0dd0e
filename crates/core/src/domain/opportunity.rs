use serde::{Deserialize, Serialize};

/// Inbound analyze request. Fields stay optional so that a missing field is
/// reported as a validation failure instead of a deserialization error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl OpportunityRequest {
    pub fn new(
        region: impl Into<String>,
        product: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            region: Some(region.into()),
            product: Some(product.into()),
            category: Some(category.into()),
        }
    }
}

/// Outcome of scoring one product against a region/category trend list.
///
/// `region`, `product` and `category` echo the caller's input verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityResult {
    pub region: String,
    pub product: String,
    pub category: String,
    pub is_trending: bool,
    pub opportunity_score: u8,
    pub recommendation: &'static str,
    pub trending_products: Vec<String>,
    pub timestamp: String,
}
