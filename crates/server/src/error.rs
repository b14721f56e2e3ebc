//! The HTTP-layer error taxonomy (A4): maps the pipeline's `core::Error`
//! and this crate's own request-hygiene/auth failures onto status codes
//! and generic wire details — unhandled errors never leak internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::seq::SliceRandom;
use serde_json::json;
use thiserror::Error;

/// A small fixed pool so a 500 body never fingerprints the failure that
/// produced it.
const GENERIC_500_DETAILS: &[&str] = &[
    "internal error",
    "something went wrong",
    "request could not be completed",
    "unexpected server error",
];

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid session id")]
    InvalidSessionId,

    #[error("invalid message")]
    InvalidMessage,

    #[error("missing api key")]
    MissingApiKey,

    #[error("invalid api key")]
    InvalidApiKey,

    #[error("session not found")]
    SessionNotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("internal error")]
    Internal,
}

impl From<scam_honeypot_core::Error> for ApiError {
    fn from(err: scam_honeypot_core::Error) -> Self {
        match err {
            scam_honeypot_core::Error::SessionNotFound(_) => ApiError::SessionNotFound,
            scam_honeypot_core::Error::Validation(_) => ApiError::InvalidMessage,
            _ => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidSessionId => (StatusCode::BAD_REQUEST, "invalid session id".to_string()),
            ApiError::InvalidMessage => (StatusCode::BAD_REQUEST, "invalid message".to_string()),
            ApiError::MissingApiKey => (StatusCode::UNAUTHORIZED, "missing api key".to_string()),
            ApiError::InvalidApiKey => (StatusCode::FORBIDDEN, "invalid api key".to_string()),
            ApiError::SessionNotFound => (StatusCode::NOT_FOUND, "session not found".to_string()),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Too many requests".to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, generic_detail()),
        };
        (status, Json(json!({ "status": "error", "detail": detail }))).into_response()
    }
}

fn generic_detail() -> String {
    GENERIC_500_DETAILS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("internal error")
        .to_string()
}
