// crates/addrdb-server/src/middleware.rs
use crate::error::{ApiError, RATELIMIT_LIMIT, RATELIMIT_REMAINING, RATELIMIT_RESET};
use crate::state::AppState;
use addrdb_core::Decision;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;

/// Key used when the peer address is unknown (e.g. in-process requests).
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Admit or reject the request by client IP. Admitted responses carry the
/// remaining quota; rejected requests never reach the handler.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = client_key(&request);
    match state.limiter.allow(&key) {
        Decision::Admitted(quota) => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(RATELIMIT_LIMIT, HeaderValue::from(quota.limit));
            headers.insert(RATELIMIT_REMAINING, HeaderValue::from(quota.remaining));
            headers.insert(RATELIMIT_RESET, HeaderValue::from(quota.reset_after_secs()));
            response
        }
        Decision::Denied(denial) => {
            tracing::warn!(
                client = %key,
                retry_after = denial.retry_after_secs(),
                "rate limit exceeded"
            );
            ApiError::RateLimited(denial).into_response()
        }
    }
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
