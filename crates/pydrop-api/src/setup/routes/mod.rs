//! Route configuration and setup.
//!
//! Health checks live in [health](health); file endpoints in
//! [crate::handlers::files]. Everything under `/api` requires a Bearer token.

mod health;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers::files;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use pydrop_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let public_routes = public_routes(state.clone());
    let protected_routes = protected_routes(state).layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    // Requests larger than the file limit plus multipart framing are cut off
    // at the transport before the handler runs.
    let body_limit = (config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES) as usize;

    let app = public_routes
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{}/files", API_PREFIX),
            axum::routing::post(files::upload_file).get(files::list_files),
        )
        .route(&format!("{}/files/{{id}}", API_PREFIX), get(files::get_file))
        .route(
            &format!("{}/files/{{id}}/content", API_PREFIX),
            get(files::download_file),
        )
        .with_state(state)
}
