//! JWT access-token validation.
//!
//! DriveBox does not issue tokens; the identity service signs them with
//! the shared HMAC secret and this decoder validates them on every
//! request.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use drivebox_core::config::auth::AuthConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::UserId;
use drivebox_entity::user::UserRole;

/// Claims carried by a DriveBox access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: UserId,
    /// Username at issue time.
    pub username: String,
    /// Role at issue time.
    pub role: UserRole,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
}

/// Validates bearer tokens against the shared secret.
#[derive(Clone)]
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl JwtDecoder {
    /// Create a decoder from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate an access token.
    pub fn decode_access_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway_seconds: 0,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token signs")
    }

    fn claims(exp_offset_seconds: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: UserId::new(),
            username: "tester".to_string(),
            role: UserRole::Member,
            exp: now + exp_offset_seconds,
            iat: now,
        }
    }

    #[test]
    fn test_decode_roundtrip() {
        let decoder = JwtDecoder::new(&config());
        let claims = claims(3600);
        let token = sign(&claims, "test-secret");

        let decoded = decoder.decode_access_token(&token).expect("valid token");
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.username, "tester");
        assert_eq!(decoded.role, UserRole::Member);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let decoder = JwtDecoder::new(&config());
        let token = sign(&claims(-3600), "test-secret");
        assert!(decoder.decode_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let decoder = JwtDecoder::new(&config());
        let token = sign(&claims(3600), "other-secret");
        assert!(decoder.decode_access_token(&token).is_err());
    }
}
