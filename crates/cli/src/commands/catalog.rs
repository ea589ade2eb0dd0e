use serde::Serialize;
use trendscope_core::{LookupError, Region};

use crate::commands::{load_catalog, CommandResult, EXIT_NOT_FOUND};

#[derive(Debug, Serialize)]
struct RegionTrends<'a> {
    region: &'a str,
    trends: &'a Region,
}

#[derive(Debug, Serialize)]
struct CategoryTrends<'a> {
    region: &'a str,
    category: &'a str,
    products: &'a [String],
}

pub fn regions() -> CommandResult {
    let catalog = match load_catalog("regions") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    CommandResult::data("regions", catalog.region_ids())
}

pub fn trends(region: &str, category: Option<&str>) -> CommandResult {
    let catalog = match load_catalog("trends") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    match category {
        None => match catalog.lookup_region(region) {
            Ok(trends) => CommandResult::data("trends", RegionTrends { region, trends }),
            Err(error) => not_found(error, &catalog.region_ids()),
        },
        Some(category) => match catalog.lookup(region, category) {
            Ok(products) => {
                CommandResult::data("trends", CategoryTrends { region, category, products })
            }
            Err(error) => not_found(error, &catalog.region_ids()),
        },
    }
}

fn not_found(error: LookupError, regions: &[&str]) -> CommandResult {
    let message = match error {
        LookupError::RegionNotFound { .. } => {
            format!("{error}; available regions: {}", regions.join(", "))
        }
        LookupError::CategoryNotFound { .. } => error.to_string(),
    };
    CommandResult::failure("trends", "not_found", message, EXIT_NOT_FOUND)
}
