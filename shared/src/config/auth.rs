//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// Token signing and identity-handshake secrets
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 secret for access tokens
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    pub token_ttl_secs: i64,

    /// Shared secret for the acquire identity hash
    pub acquire_secret: String,
}

impl AuthConfig {
    /// Create from environment variables; secrets are required
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;
        let acquire_secret = std::env::var("ACQUIRE_SECRET")
            .map_err(|_| "ACQUIRE_SECRET must be set".to_string())?;
        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
            acquire_secret,
        })
    }
}

const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
