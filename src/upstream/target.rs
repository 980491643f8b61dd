//! Upstream target abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream service
//! - Resolve upstream names from the route table to addresses

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use url::Url;

use crate::config::UpstreamConfig;

/// A single upstream service.
#[derive(Debug)]
pub struct Upstream {
    /// Unique upstream identifier.
    pub name: String,
    /// The address of the upstream.
    pub addr: SocketAddr,
    /// Pre-calculated base URL.
    pub base_url: Url,
}

impl Upstream {
    /// Create a new upstream target.
    pub fn new(name: impl Into<String>, addr: SocketAddr) -> Self {
        let base_url = Url::parse(&format!("http://{}", addr))
            .expect("socket address always forms a valid URL");
        Self {
            name: name.into(),
            addr,
            base_url,
        }
    }
}

/// Immutable registry of upstream targets, keyed by name.
#[derive(Debug, Default)]
pub struct UpstreamManager {
    targets: HashMap<String, Arc<Upstream>>,
}

impl UpstreamManager {
    /// Build the registry from configuration.
    ///
    /// Entries with unparseable addresses are skipped with a warning;
    /// validation rejects them before this point in normal startup.
    pub fn from_config(configs: Vec<UpstreamConfig>) -> Self {
        let mut targets = HashMap::new();

        for config in configs {
            match config.address.parse::<SocketAddr>() {
                Ok(addr) => {
                    let upstream = Arc::new(Upstream::new(config.name.clone(), addr));
                    targets.insert(config.name, upstream);
                }
                Err(_) => {
                    tracing::warn!(
                        upstream = %config.name,
                        address = %config.address,
                        "Skipping upstream with invalid address"
                    );
                }
            }
        }

        Self { targets }
    }

    /// Resolve an upstream by name.
    pub fn get(&self, name: &str) -> Option<Arc<Upstream>> {
        self.targets.get(name).cloned()
    }

    /// Number of registered upstreams.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True if no upstreams are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_resolves_by_name() {
        let manager = UpstreamManager::from_config(vec![UpstreamConfig {
            name: "user-service".into(),
            address: "127.0.0.1:8000".into(),
        }]);

        let upstream = manager.get("user-service").unwrap();
        assert_eq!(upstream.addr.port(), 8000);
        assert_eq!(upstream.base_url.as_str(), "http://127.0.0.1:8000/");
        assert!(manager.get("missing").is_none());
    }

    #[test]
    fn test_invalid_address_is_skipped() {
        let manager = UpstreamManager::from_config(vec![UpstreamConfig {
            name: "broken".into(),
            address: "not-an-address".into(),
        }]);

        assert!(manager.is_empty());
    }
}
