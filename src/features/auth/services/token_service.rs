use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 access tokens for the admin surface.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    /// Returns the signed token together with its lifetime in seconds.
    pub fn issue_token(&self, username: &str) -> Result<(String, i64)> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

        Ok((token, self.ttl_secs))
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthenticatedUser {
            username: data.claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            token_ttl: std::time::Duration::from_secs(3600),
            admin_username: "admin".to_string(),
            admin_password: "admin-password".to_string(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new(&test_config());

        let (token, expires_in) = service.issue_token("admin").unwrap();
        assert_eq!(expires_in, 3600);

        let user = service.validate_token(&token).unwrap();
        assert_eq!(user.username, "admin");
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let service = TokenService::new(&config);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(&test_config());
        assert!(service.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = TokenService::new(&test_config());

        let mut other = test_config();
        other.jwt_secret = "another-secret-that-is-also-long-enough".to_string();
        let (token, _) = TokenService::new(&other).issue_token("admin").unwrap();

        assert!(service.validate_token(&token).is_err());
    }
}
