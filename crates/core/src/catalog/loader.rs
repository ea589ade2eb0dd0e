use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::category::Category;
use crate::domain::region::{CategoryTrends, Region};
use crate::errors::CatalogError;

pub(crate) const REFERENCE_DATA: &str = include_str!("../../data/trends.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    regions: Vec<RegionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionDocument {
    id: String,
    #[serde(default)]
    categories: Vec<CategoryDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryDocument {
    id: String,
    trends: Vec<String>,
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<Region>, CatalogError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
    parse(&raw)
}

pub(crate) fn parse(raw: &str) -> Result<Vec<Region>, CatalogError> {
    let document = toml::from_str::<CatalogDocument>(raw)?;
    if document.regions.is_empty() {
        return Err(CatalogError::Invalid("catalog must define at least one region".to_string()));
    }

    let mut seen_regions = HashSet::new();
    let mut regions = Vec::with_capacity(document.regions.len());
    for region in document.regions {
        if !seen_regions.insert(region.id.clone()) {
            return Err(CatalogError::Invalid(format!("region `{}` is defined twice", region.id)));
        }
        regions.push(build_region(region)?);
    }

    for region in &regions {
        let missing = region.missing_categories();
        if !missing.is_empty() {
            let missing: Vec<&str> = missing.iter().map(|category| category.as_str()).collect();
            warn!(
                event_name = "catalog.region.incomplete",
                region = %region.id,
                missing = %missing.join(","),
                "region does not define every category; lookups for these yield empty lists"
            );
        }
    }

    Ok(regions)
}

fn build_region(document: RegionDocument) -> Result<Region, CatalogError> {
    let id = document.id;
    if id.trim().is_empty() {
        return Err(CatalogError::Invalid("region id must not be empty".to_string()));
    }
    if id != id.to_lowercase() {
        return Err(CatalogError::Invalid(format!("region id `{id}` must be lowercase")));
    }

    let mut categories: Vec<CategoryTrends> = Vec::with_capacity(document.categories.len());
    for entry in document.categories {
        let category = entry
            .id
            .parse::<Category>()
            .ok()
            .filter(|category| category.as_str() == entry.id)
            .ok_or_else(|| {
                CatalogError::Invalid(format!(
                    "region `{id}` uses unknown category `{}` (expected one of {})",
                    entry.id,
                    Category::identifiers().collect::<Vec<_>>().join("|")
                ))
            })?;

        if categories.iter().any(|existing| existing.category == category) {
            return Err(CatalogError::Invalid(format!(
                "region `{id}` defines category `{category}` twice"
            )));
        }
        if entry.trends.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "region `{id}` category `{category}` must list at least one trend"
            )));
        }
        if entry.trends.iter().any(|label| label.trim().is_empty()) {
            return Err(CatalogError::Invalid(format!(
                "region `{id}` category `{category}` contains an empty trend label"
            )));
        }

        categories.push(CategoryTrends { category, trends: entry.trends });
    }

    Ok(Region { id, categories })
}
