use trendscope_core::{opportunity, EvaluationError, OpportunityRequest};

use crate::commands::{load_catalog, CommandResult, EXIT_NOT_FOUND, EXIT_VALIDATION};

pub fn run(region: &str, category: &str, product: &str) -> CommandResult {
    let catalog = match load_catalog("analyze") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    match opportunity::evaluate(&catalog, &OpportunityRequest::new(region, product, category)) {
        Ok(analysis) => CommandResult::data("analyze", analysis),
        Err(error @ EvaluationError::Validation(_)) => {
            CommandResult::failure("analyze", "validation", error.to_string(), EXIT_VALIDATION)
        }
        Err(error @ EvaluationError::RegionNotSupported { .. }) => {
            CommandResult::failure("analyze", "not_found", error.to_string(), EXIT_NOT_FOUND)
        }
    }
}
