//! Bearer token issuing and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Issuer written to and required from every token
pub const DEFAULT_ISSUER: &str = "registry-comments";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub iss: String,
    /// Issued at (Unix epoch)
    pub iat: i64,
    /// Expiration (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create claims for a user valid for `expiration_hours`
    ///
    /// Fails when the lifetime does not fit in a timestamp.
    pub fn new(user: &User, issuer: &str, expiration_hours: u64) -> Result<Self, DomainError> {
        let now = Utc::now();
        let exp = i64::try_from(expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Token expiration of {} hours is out of range",
                    expiration_hours
                ))
            })?;

        Ok(Self {
            sub: user.id().as_str().to_string(),
            username: user.username().to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret
    pub secret: String,
    pub expiration_hours: u64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new("change-me-in-production", 24)
    }
}

/// Issues and verifies bearer tokens
pub trait JwtGenerator: Send + Sync + Debug {
    /// Issue a token for a user
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;
        validation
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, &self.config.issuer, self.config.expiration_hours)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| DomainError::unauthenticated(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn create_test_user() -> User {
        User::new(UserId::new("alice").unwrap(), "alice")
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 24))
    }

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();
        let token = service.generate(&create_test_user()).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.user_id(), "alice");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();
        let result = service.validate("not-a-token");
        assert!(matches!(result, Err(DomainError::Unauthenticated { .. })));
    }

    #[test]
    fn test_out_of_range_expiration_is_rejected() {
        let user = create_test_user();

        for hours in [u64::MAX, i64::MAX as u64, 1 << 62] {
            let service = JwtService::new(JwtConfig::new("test-secret", hours));
            let result = service.generate(&user);
            assert!(
                matches!(result, Err(DomainError::Configuration { .. })),
                "expiration of {} hours should be rejected",
                hours
            );
        }
    }

    #[test]
    fn test_claims_for_long_lifetime() {
        let claims = JwtClaims::new(&create_test_user(), DEFAULT_ISSUER, 24 * 365 * 10).unwrap();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtService::new(JwtConfig::new("secret-1", 24));
        let verifier = JwtService::new(JwtConfig::new("secret-2", 24));

        let token = issuer.generate(&create_test_user()).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let issuer = JwtService::new(JwtConfig::new("secret", 24).with_issuer("elsewhere"));
        let verifier = JwtService::new(JwtConfig::new("secret", 24));

        let token = issuer.generate(&create_test_user()).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new("test-secret", 24));
        let past = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: "alice".to_string(),
            username: "alice".to_string(),
            iss: DEFAULT_ISSUER.to_string(),
            iat: (past - Duration::hours(2)).timestamp(),
            exp: past.timestamp(),
        };

        let token = sign(&claims, "test-secret");
        let result = service.validate(&token);
        assert!(matches!(result, Err(DomainError::Unauthenticated { .. })));
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = create_service();
        let debug = format!("{:?}", service);

        assert!(!debug.contains("test-secret-key-12345"));
        assert!(debug.contains("[hidden]"));
    }
}
