//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference declared upstreams)
//! - Validate value ranges (timeouts > 0, rate limit parameters > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{GatewayConfig, ServiceConfig};

/// A single semantic validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("route `{route}` has an invalid path prefix `{prefix}` (must start with '/')")]
    InvalidPathPrefix { route: String, prefix: String },

    #[error("route `{route}` references unknown upstream `{upstream}`")]
    UnknownUpstream { route: String, upstream: String },

    #[error("upstream `{upstream}` has an unparseable address `{address}`")]
    InvalidUpstreamAddress { upstream: String, address: String },

    #[error("upstream name `{upstream}` is declared more than once")]
    DuplicateUpstream { upstream: String },

    #[error("rate_limit.{field} must be greater than zero")]
    NonPositiveRateLimit { field: &'static str },

    #[error("timeouts.{field} must be greater than zero")]
    NonPositiveTimeout { field: &'static str },

    #[error("retrieval.top_k must be greater than zero")]
    NonPositiveTopK,
}

/// Validate a gateway configuration, collecting every failure.
pub fn validate_gateway_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut upstream_names: HashSet<&str> = HashSet::new();
    for upstream in &config.upstreams {
        if !upstream_names.insert(&upstream.name) {
            errors.push(ValidationError::DuplicateUpstream {
                upstream: upstream.name.clone(),
            });
        }
        if upstream.address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidUpstreamAddress {
                upstream: upstream.name.clone(),
                address: upstream.address.clone(),
            });
        }
    }

    for route in &config.routes {
        if route.path_prefix.is_empty() || !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPathPrefix {
                route: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        }
        if !upstream_names.contains(route.upstream.as_str()) {
            errors.push(ValidationError::UnknownUpstream {
                route: route.name.clone(),
                upstream: route.upstream.clone(),
            });
        }
    }

    if config.rate_limit.enabled {
        if config.rate_limit.replenish_rate == 0 {
            errors.push(ValidationError::NonPositiveRateLimit {
                field: "replenish_rate",
            });
        }
        if config.rate_limit.burst_capacity == 0 {
            errors.push(ValidationError::NonPositiveRateLimit {
                field: "burst_capacity",
            });
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::NonPositiveTimeout {
            field: "connect_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::NonPositiveTimeout {
            field: "request_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a service configuration, collecting every failure.
pub fn validate_service_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retrieval.top_k == 0 {
        errors.push(ValidationError::NonPositiveTopK);
    }
    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::NonPositiveTimeout {
            field: "request_timeout_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
