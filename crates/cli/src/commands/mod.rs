pub mod analyze;
pub mod catalog;
pub mod config;
pub mod smoke;

use serde::Serialize;
use serde_json::Value;
use trendscope_core::config::{AppConfig, LoadOptions};
use trendscope_core::TrendCatalog;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_CATALOG: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_VALIDATION: u8 = 5;
pub const EXIT_SMOKE_FAILED: u8 = 6;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct CommandData<'a> {
    command: &'a str,
    status: &'static str,
    data: Value,
}

impl CommandResult {
    pub fn data(command: &str, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let output = serde_json::to_string(&CommandData { command, status: "ok", data })
            .unwrap_or_else(|error| serialization_fallback(command, &error));
        Self { exit_code: 0, output }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Loads configuration and the catalog it points at, or the failure to print.
pub(crate) fn load_catalog(command: &str) -> Result<TrendCatalog, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(command, "config_validation", error.to_string(), EXIT_CONFIG)
    })?;

    TrendCatalog::load(config.catalog.path.as_deref()).map_err(|error| {
        CommandResult::failure(command, "catalog_load", error.to_string(), EXIT_CATALOG)
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload)
        .unwrap_or_else(|error| serialization_fallback(&payload.command, &error))
}

fn serialization_fallback(command: &str, error: &serde_json::Error) -> String {
    format!(
        "{{\"command\":\"{}\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
        escape_json(command),
        escape_json(&error.to_string())
    )
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
