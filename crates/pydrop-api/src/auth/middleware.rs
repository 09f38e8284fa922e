use crate::auth::jwt::{decode_token, AUTH_FAILED_MESSAGE};
use crate::auth::models::UserContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use pydrop_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Bearer token middleware for all `/api` routes.
///
/// Any failure (missing header, bad format, bad signature, expired claims)
/// is a 401 with the same message; the specific cause only reaches the logs.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            tracing::debug!("Missing authorization header");
            return HttpAppError(AppError::Unauthorized(AUTH_FAILED_MESSAGE.to_string()))
                .into_response();
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => {
            tracing::debug!("Authorization header is not a Bearer token");
            return HttpAppError(AppError::Unauthorized(AUTH_FAILED_MESSAGE.to_string()))
                .into_response();
        }
    };

    let claims = match decode_token(token, &auth_state.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    request.extensions_mut().insert(UserContext {
        user_id: claims.sub,
        email: claims.email,
    });
    next.run(request).await
}
