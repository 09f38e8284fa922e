//! HS256 token encoding and verification.

use crate::auth::models::JwtClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pydrop_core::AppError;

/// Every authentication failure renders this same message, so a caller
/// cannot distinguish a missing token from an invalid or expired one.
pub const AUTH_FAILED_MESSAGE: &str = "Invalid or expired token";

/// Issue a token for the given user.
pub fn encode_token(
    user_id: &str,
    email: &str,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to encode token: {}", e)))
}

/// Verify a token and return its claims.
///
/// The real failure cause (bad signature, expiry, malformed token) is logged
/// at debug level only; callers always see [`AUTH_FAILED_MESSAGE`].
pub fn decode_token(token: &str, secret: &str) -> Result<JwtClaims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AppError::Unauthorized(AUTH_FAILED_MESSAGE.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn round_trips_claims() {
        let token = encode_token("user-123", "dev@example.com", SECRET, 24).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "dev@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = encode_token("user-123", "dev@example.com", SECRET, 24).unwrap();
        let err = decode_token(&token, "another-secret-another-secret-ab").unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, AUTH_FAILED_MESSAGE),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn rejects_expired_token() {
        let token = encode_token("user-123", "dev@example.com", SECRET, -1).unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, AUTH_FAILED_MESSAGE),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage_token() {
        let err = decode_token("not-a-token", SECRET).unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, AUTH_FAILED_MESSAGE),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}
