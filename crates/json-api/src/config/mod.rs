//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;
use storeops_app::{
    config::{DatabaseConfig, PimArgs, PricingArgs},
    logging::LoggingConfig,
};

use crate::config::{observability::ObservabilityConfig, server::ServerRuntimeConfig};

pub(crate) mod observability;
pub(crate) mod server;

/// Store Operations JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storeops-json", about = "Store Operations JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Campaign database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Akeneo PIM settings.
    #[command(flatten)]
    pub pim: PimArgs,

    /// Pricing policy settings.
    #[command(flatten)]
    pub pricing: PricingArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 11] = [
        "storeops-json",
        "--database-url",
        "postgres://localhost/storeops",
        "--akeneo-url",
        "https://pim.example.com",
        "--akeneo-client-id",
        "client",
        "--akeneo-secret",
        "secret",
        "--akeneo-username",
        "storeops",
    ];

    #[test]
    fn defaults_apply_when_only_required_settings_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED.into_iter().chain(["--akeneo-password", "hunter2"]),
        )?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8698");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(config.pim.akeneo_timeout_seconds, 10);
        assert_eq!(config.pricing.batch_concurrency.get(), 1);

        Ok(())
    }

    #[test]
    fn secrets_are_not_printed_in_debug_output() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED.into_iter().chain(["--akeneo-password", "hunter2"]),
        )?;

        let pim = config.pim.to_config();

        assert!(!format!("{pim:?}").contains("hunter2"), "password leaked");

        Ok(())
    }
}
