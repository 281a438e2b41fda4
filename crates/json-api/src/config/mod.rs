//! Server configuration module

use clap::Parser;
use stockroom_app::{config::PolicyConfig, logging::LoggingConfig};

use crate::config::{db::DatabaseConfig, server::ServerRuntimeConfig};

pub(crate) mod db;
pub(crate) mod server;

/// Stockroom JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom-json", about = "Stockroom JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Inventory policies.
    #[command(flatten)]
    pub policies: PolicyConfig,
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
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use stockroom_app::domain::policies::ConsistencyMode;

    use super::*;

    #[test]
    fn parses_server_and_policy_flags() {
        let config = ServerConfig::parse_from([
            "stockroom-json",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/stockroom",
            "--stock-consistency",
            "atomic",
        ]);

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(
            config.policies.policies().consistency,
            ConsistencyMode::Atomic
        );
    }
}
