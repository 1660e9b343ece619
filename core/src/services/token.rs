//! JWT issuance and verification
//!
//! Access tokens are HS256 with a configurable lifetime. The refresh
//! path accepts an expired token but still requires a valid signature;
//! any other defect maps to `InvalidSession`.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Claims carried in every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id
    pub sub: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Signs and verifies access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a fresh token for the given user
    pub fn issue(&self, user_id: Uuid) -> DomainResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))
    }

    /// Verify a live token and return its claims
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::InvalidSession)
    }

    /// Extract the subject from a token that may already be expired
    ///
    /// Signature and algorithm are still enforced. A malformed subject
    /// is treated the same as a bad signature.
    pub fn subject_for_refresh(&self, token: &str) -> DomainResult<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::InvalidSession)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| DomainError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-at-least-32-characters!!", 3600)
    }

    #[test]
    fn test_issue_then_verify() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.issue(id).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid_session() {
        let token = service().issue(Uuid::new_v4()).unwrap();
        let other = TokenService::new("a-completely-different-secret-value", 3600);
        assert!(matches!(
            other.verify(&token),
            Err(DomainError::InvalidSession)
        ));
        assert!(matches!(
            other.subject_for_refresh(&token),
            Err(DomainError::InvalidSession)
        ));
    }

    #[test]
    fn test_expired_token_refreshable_but_not_verifiable() {
        let svc = TokenService::new("test-secret-at-least-32-characters!!", -60);
        let id = Uuid::new_v4();
        let token = svc.issue(id).unwrap();

        assert!(matches!(
            svc.verify(&token),
            Err(DomainError::InvalidSession)
        ));
        assert_eq!(svc.subject_for_refresh(&token).unwrap(), id);
    }

    #[test]
    fn test_garbage_token_is_invalid_session() {
        assert!(matches!(
            service().subject_for_refresh("not-a-jwt"),
            Err(DomainError::InvalidSession)
        ));
    }
}
