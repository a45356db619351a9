//! Error types for the scenario runner

use ect_core::ConfigError;
use thiserror::Error;

/// Scenario runner error.
#[derive(Error, Debug)]
pub enum SimError {
    /// The controller configuration was rejected
    #[error("Invalid controller configuration: {0}")]
    Controller(#[from] ConfigError),

    /// Config file extension is not `.json`, `.yaml` or `.yml`
    #[error("Unsupported config format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config file could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    /// Process exit code for this error.
    ///
    /// `3` for a rejected configuration, `4` for I/O and parse failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            SimError::Controller(_) => 3,
            SimError::UnsupportedFormat(_)
            | SimError::Io(_)
            | SimError::Json(_)
            | SimError::Yaml(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = SimError::from(ConfigError::InvertedBounds {
            u_min: 1.0,
            u_max: -1.0,
        });
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("inverted"));

        let err = SimError::UnsupportedFormat("controller.toml".to_string());
        assert_eq!(err.exit_code(), 4);

        let err = SimError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.exit_code(), 4);
    }
}
