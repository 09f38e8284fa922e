use crate::auth::jwt::AUTH_FAILED_MESSAGE;
use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user id
    pub email: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Authenticated user extracted from the JWT and stored in request extensions
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    pub email: String,
}

// Implement FromRequestParts for UserContext to work with Multipart.
// Extension cannot be used with Multipart, so we extract directly from
// request parts.
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: AUTH_FAILED_MESSAGE.to_string(),
                        details: None,
                        code: "UNAUTHORIZED".to_string(),
                    }),
                )
            })
    }
}
