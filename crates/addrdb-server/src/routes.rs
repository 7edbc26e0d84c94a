// crates/addrdb-server/src/routes.rs

//! Router assembly.
//!
//! | Method | Path                     | Handler            |
//! |--------|--------------------------|--------------------|
//! | GET    | `{prefix}search/{query}` | `search_addresses` |
//! | *      | anything else            | 404 envelope       |
//!
//! Layers, outermost first: security headers, panic capture, CORS, request
//! tracing, then the rate limiter (production only).

use crate::error::ApiError;
use crate::handlers::{not_found, search_addresses};
use crate::middleware::rate_limit;
use crate::state::AppState;
use axum::http::{header, HeaderValue};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

/// Build the application router for `state`, mounted under `prefix`.
///
/// `prefix` may be given with or without slashes; `""` and `"/"` both mount
/// at the root.
pub fn create_router(state: AppState, prefix: &str) -> Router {
    let api = Router::new().route("/search/{query}", get(search_addresses));

    let mut app = match normalize_prefix(prefix) {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    }
    .fallback(not_found);

    if state.rate_limit_enabled() {
        app = app.layer(from_fn_with_state(state.clone(), rate_limit));
    }

    let expose_detail = !state.mode.is_production();
    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| {
                ApiError::from_panic(panic, expose_detail).into_response()
            },
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// `"/api/"` -> `Some("/api")`, `"/"` -> `None`
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_matches('/');
    (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
}
