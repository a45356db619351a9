//! Controller and scenario files.

use std::fs;
use std::path::Path;

use ect_core::ControllerConfig;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SimError;
use crate::scenario::Scenario;

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, SimError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?),
        _ => Err(SimError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load and validate a [`ControllerConfig`] from a JSON or YAML file.
///
/// The format is chosen by extension: `.json`, `.yaml` or `.yml`.
///
/// # Errors
///
/// - [`SimError::UnsupportedFormat`] for any other extension
/// - [`SimError::Io`], [`SimError::Json`] or [`SimError::Yaml`] if the file
///   cannot be read or parsed
/// - [`SimError::Controller`] if the parsed configuration is invalid
pub fn load_controller_config(path: &Path) -> Result<ControllerConfig, SimError> {
    let config: ControllerConfig = read_document(path)?;
    config.validate()?;
    debug!(path = %path.display(), "Loaded controller configuration");
    Ok(config)
}

/// Load a complete [`Scenario`] (controller, plant, target, noise, steps)
/// from a JSON or YAML file.
///
/// # Errors
///
/// Same as [`load_controller_config`]; the embedded controller is validated.
pub fn load_scenario(path: &Path) -> Result<Scenario, SimError> {
    let scenario: Scenario = read_document(path)?;
    scenario.controller.validate()?;
    debug!(path = %path.display(), name = %scenario.name, "Loaded scenario");
    Ok(scenario)
}
