//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::{Config, ErrorsConfig, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal config with a fixed instance id
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                errors: ErrorsConfig {
                    instance: Some("test-node".to_owned()),
                    ..ErrorsConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Map a failure kind to a status, overriding the built-in entry
    pub fn with_status(mut self, kind: &str, status: u16) -> Self {
        self.config.errors.statuses.insert(kind.to_owned(), status);
        self
    }

    /// Let the instance id fall back to the host name
    pub fn without_instance(mut self) -> Self {
        self.config.errors.instance = None;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
