use thiserror::Error;
use tracing::info;
use trendscope_core::config::{AppConfig, ConfigError, LoadOptions};
use trendscope_core::{CatalogError, TrendCatalog};

use crate::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("trend catalog failed to load: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = TrendCatalog::load(config.catalog.path.as_deref())?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        source = %config
            .catalog
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        regions = catalog.regions().len(),
        "trend catalog loaded"
    );

    Ok(Application { config, state: AppState::new(catalog) })
}
