use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::PgPool;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::auth_dto::{AuthResponseDto, LoginRequestDto};
use crate::features::auth::model::User;
use crate::features::auth::services::token_service::TokenService;

/// Credential checks against the users table plus startup bootstrap
/// of the configured admin account.
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await?;

        let user = user.ok_or_else(|| {
            AppError::Unauthorized("Invalid username or password".to_string())
        })?;

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let (access_token, expires_in) = self.tokens.issue_token(&user.username)?;

        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            username: user.username,
        })
    }

    /// Creates the configured admin account if it does not exist yet.
    pub async fn ensure_admin(&self, config: &AuthConfig) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(&config.admin_username)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Ok(());
        }

        let password_hash = hash_password(&config.admin_password)?;

        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(&config.admin_username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        tracing::info!(username = %config.admin_username, "Created admin account");
        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trips() {
        let hash = hash_password("kota-bersih-2025").unwrap();
        assert!(verify_password("kota-bersih-2025", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
