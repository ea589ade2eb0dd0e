//! Immutable region → category → trend list table.
//!
//! The catalog is built once at startup (embedded reference data or an
//! operator-supplied TOML file of the same shape) and only read afterwards.
//! Keys are matched by lower-casing the caller's input; nothing else is
//! normalized, so near-misses such as `" asia"` are simply not found.

mod loader;

use std::path::Path;

use crate::domain::category::Category;
use crate::domain::region::Region;
use crate::errors::{CatalogError, LookupError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendCatalog {
    regions: Vec<Region>,
}

impl TrendCatalog {
    /// The hand-curated data shipped with the binary.
    pub fn reference() -> Result<Self, CatalogError> {
        Self::from_toml_str(loader::REFERENCE_DATA)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(Self { regions: loader::parse(raw)? })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self { regions: loader::read_file(path)? })
    }

    /// Embedded reference data unless `path` points at a replacement file.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::reference(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_ids(&self) -> Vec<&str> {
        self.regions.iter().map(|region| region.id.as_str()).collect()
    }

    pub fn lookup_region(&self, region: &str) -> Result<&Region, LookupError> {
        let key = region.to_lowercase();
        self.regions
            .iter()
            .find(|candidate| candidate.id == key)
            .ok_or_else(|| LookupError::RegionNotFound { region: region.to_string() })
    }

    /// Strict lookup: an unknown or undefined category is an error.
    pub fn lookup(&self, region: &str, category: &str) -> Result<&[String], LookupError> {
        let entry = self.lookup_region(region)?;
        category
            .parse::<Category>()
            .ok()
            .and_then(|category| entry.trends(category))
            .ok_or_else(|| LookupError::CategoryNotFound {
                region: region.to_string(),
                category: category.to_string(),
            })
    }

    /// Lenient lookup used for scoring: the region must exist, but a category
    /// the region does not define yields an empty list.
    pub fn trends_or_empty(&self, region: &str, category: &str) -> Result<&[String], LookupError> {
        match self.lookup(region, category) {
            Ok(trends) => Ok(trends),
            Err(LookupError::CategoryNotFound { .. }) => Ok(&[]),
            Err(error) => Err(error),
        }
    }
}
