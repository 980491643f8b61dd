//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{GatewayConfig, ServiceConfig};
use crate::config::validation::{
    validate_gateway_config, validate_service_config, ValidationError,
};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a gateway configuration from a TOML file.
pub fn load_gateway_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_gateway_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate a service configuration from a TOML file.
pub fn load_service_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_service_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_minimal_gateway_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:9999"

            [rate_limit]
            replenish_rate = 5
            burst_capacity = 10
            "#
        )
        .unwrap();

        let config = load_gateway_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.rate_limit.replenish_rate, 5);
        assert_eq!(config.rate_limit.burst_capacity, 10);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[routes]]
            name = "bad"
            path_prefix = "oops"
            upstream = "ghost"
            "#
        )
        .unwrap();

        let err = load_gateway_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not toml [[[").unwrap();

        let err = load_gateway_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_service_config_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"bind_address = "127.0.0.1:8000""#).unwrap();

        let config = load_service_config(file.path()).unwrap();
        assert_eq!(config.retrieval.top_k, 4);
        assert!(config.retrieval.corpus_path.is_none());
    }
}
