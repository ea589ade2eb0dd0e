use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("region `{region}` is not in the catalog")]
    RegionNotFound { region: String },
    #[error("category `{category}` is not in the catalog for region `{region}`")]
    CategoryNotFound { region: String, category: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("region `{region}` is not supported")]
    RegionNotSupported { region: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog data: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog data is invalid: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

pub const REQUIRED_FIELDS_MESSAGE: &str = "Required fields: region, product, category";
pub const REGION_NOT_SUPPORTED_MESSAGE: &str = "Region not supported";
pub const REGION_OR_CATEGORY_NOT_FOUND_MESSAGE: &str = "Region or category not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl InterfaceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Message safe to hand back to a caller. Internal detail never leaves
    /// the process.
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message } | Self::NotFound { message } => message,
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl From<EvaluationError> for InterfaceError {
    fn from(value: EvaluationError) -> Self {
        match value {
            EvaluationError::Validation(_) => Self::bad_request(REQUIRED_FIELDS_MESSAGE),
            EvaluationError::RegionNotSupported { .. } => {
                Self::not_found(REGION_NOT_SUPPORTED_MESSAGE)
            }
        }
    }
}

impl From<LookupError> for InterfaceError {
    fn from(value: LookupError) -> Self {
        match value {
            LookupError::RegionNotFound { .. } | LookupError::CategoryNotFound { .. } => {
                Self::not_found(REGION_OR_CATEGORY_NOT_FOUND_MESSAGE)
            }
        }
    }
}
