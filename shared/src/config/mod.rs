//! Configuration types
//!
//! Organized into logical areas:
//! - `server` - HTTP server bind configuration
//! - `database` - Database connection and pool configuration
//! - `auth` - Token signing and acquire-handshake secrets
//! - `assets` - Base URLs composed onto stored relative paths

pub mod assets;
pub mod auth;
pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

pub use assets::AssetConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Asset URL configuration
    #[serde(default)]
    pub assets: AssetConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            assets: AssetConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }
}
