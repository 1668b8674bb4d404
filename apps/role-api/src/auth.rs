//! Bearer token authentication and the token refresh carried by every reply.
//!
//! Tokens are HS256-signed JWTs whose subject is the caller's user id. Each
//! authenticated request gets a fresh token with a renewed expiry back in the
//! envelope header.

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::constants::{JWT_SECRET, TOKEN_TTL_SECS};
use crate::error::ApiError;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: i64,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token_ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs,
        }
    }

    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `JWT_SECRET`     | **yes**  | --      |
    /// | `TOKEN_TTL_SECS` | no       | `3600`  |
    pub fn from_env() -> Result<Self, String> {
        let secret = std::env::var(JWT_SECRET)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("{} environment variable must be set", JWT_SECRET))?;

        let token_ttl_secs = match std::env::var(TOKEN_TTL_SECS) {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| format!("{} must be a positive number of seconds", TOKEN_TTL_SECS))?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self::new(secret, token_ttl_secs))
    }
}

pub fn issue_token(user_id: i64, config: &AuthConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.token_ttl_secs,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validates signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub refreshed_token: Option<String>,
}

impl AuthUser {
    /// Wraps an operation outcome in the envelope, attaching the refreshed token.
    pub fn reply<T>(&self, result: Result<Payload<T>, ApiError>) -> ResultMap<T> {
        ResultMap::from_result(result, self.refreshed_token.clone())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".to_string())
        })?;

        let claims = validate_token(token, &state.auth).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let refreshed_token = match issue_token(claims.sub, &state.auth) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::error!(user_id = claims.sub, error = %e, "failed to refresh token");
                None
            }
        };

        Ok(AuthUser {
            id: claims.sub,
            refreshed_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("test-secret-that-is-long-enough-for-hmac", 60)
    }

    #[test]
    fn test_issue_and_validate_token() {
        let config = test_config();
        let token = issue_token(42, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well beyond the default 60 second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = issue_token(7, &test_config()).unwrap();
        let other = AuthConfig::new("another-secret-entirely", 60);
        assert!(validate_token(&token, &other).is_err());
    }
}
