// crates/addrdb-server/src/error.rs

//! HTTP error envelope.
//!
//! Every error the service produces, including rate-limit rejections and
//! caught panics, is rendered as
//!
//! ```json
//! { "error": { "status": 400, "message": "Query must be at least 3 characters long" } }
//! ```

use addrdb_core::Denial;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;

pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub status: u16,
    pub message: String,
    /// Seconds until the client may retry. Only on 429.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// Internal detail (panic payload). Never present in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("{}", .0.message)]
    RateLimited(Denial),

    #[error("Internal Server Error")]
    Internal { detail: Option<String> },
}

impl ApiError {
    pub fn query_too_short(min_length: usize) -> Self {
        Self::BadRequest(format!(
            "Query must be at least {min_length} characters long"
        ))
    }

    /// Turn a caught panic into a 500. The payload text is kept only when
    /// `expose_detail` is set.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>, expose_detail: bool) -> Self {
        let text = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        tracing::error!(panic = %text, "request handler panicked");
        Self::Internal {
            detail: expose_detail.then_some(text),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (retry_after, detail) = match self {
            ApiError::RateLimited(denial) => (Some(denial.retry_after_secs()), None),
            ApiError::Internal { detail } => (None, detail.clone()),
            _ => (None, None),
        };
        ErrorBody {
            error: ErrorDetail {
                status: self.status_code().as_u16(),
                message: self.to_string(),
                retry_after,
                detail,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(self.body())).into_response();
        if let ApiError::RateLimited(denial) = &self {
            let retry = HeaderValue::from(denial.retry_after_secs());
            let headers = response.headers_mut();
            headers.insert(header::RETRY_AFTER, retry.clone());
            headers.insert(RATELIMIT_LIMIT, HeaderValue::from(denial.limit));
            headers.insert(RATELIMIT_REMAINING, HeaderValue::from(0u32));
            headers.insert(RATELIMIT_RESET, retry);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn bad_request_message() {
        let err = ApiError::query_too_short(3);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body().error.message,
            "Query must be at least 3 characters long"
        );
    }

    #[test]
    fn rate_limited_body_carries_retry_after() {
        let err = ApiError::RateLimited(Denial {
            limit: 25,
            retry_after: Duration::from_millis(1500),
            message: Arc::from("slow down"),
        });
        let body = err.body();
        assert_eq!(body.error.status, 429);
        assert_eq!(body.error.message, "slow down");
        assert_eq!(body.error.retry_after, Some(2));

        let response = err.into_response();
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");
        assert_eq!(response.headers()[RATELIMIT_REMAINING], "0");
    }

    #[test]
    fn panic_detail_is_optional() {
        let hidden = ApiError::from_panic(Box::new("boom"), false);
        assert_eq!(hidden.body().error.detail, None);
        assert_eq!(hidden.body().error.message, "Internal Server Error");

        let shown = ApiError::from_panic(Box::new(String::from("boom")), true);
        assert_eq!(shown.body().error.detail.as_deref(), Some("boom"));
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(ApiError::NotFound.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": {"status": 404, "message": "Not Found"}})
        );
    }
}
