pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod opportunity;
pub mod timestamp;

pub use catalog::TrendCatalog;
pub use domain::category::{Category, UnknownCategory};
pub use domain::opportunity::{OpportunityRequest, OpportunityResult};
pub use domain::region::{CategoryTrends, Region};
pub use errors::{CatalogError, EvaluationError, InterfaceError, LookupError};
pub use opportunity::evaluate;
