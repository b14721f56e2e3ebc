//! A2's authentication middleware: a single `X-API-Key` header check.
//! Absent configured key means auth is disabled (permitted outside
//! production by `Settings::validate`); public paths bypass the check
//! entirely.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use scam_honeypot_config::Settings;

use crate::error::ApiError;
use crate::metrics::record_auth_failure;

/// Paths that never require an API key.
const PUBLIC_PATHS: &[&str] = &["/api/v1/health", "/metrics"];

static AUTH_DISABLED_WARNED: AtomicBool = AtomicBool::new(false);

enum AuthCheck {
    Disabled,
    PublicPath,
    CheckKey(String),
}

fn check_auth_config(config: &Arc<RwLock<Settings>>, path: &str) -> AuthCheck {
    if PUBLIC_PATHS.iter().any(|p| path.starts_with(p)) {
        return AuthCheck::PublicPath;
    }

    let guard = config.read();
    match &guard.auth.api_key {
        Some(key) if !key.is_empty() => AuthCheck::CheckKey(key.clone()),
        _ => {
            if !AUTH_DISABLED_WARNED.swap(true, Ordering::Relaxed) {
                tracing::warn!("API_KEY not configured; authentication is disabled");
            }
            AuthCheck::Disabled
        }
    }
}

pub async fn auth_middleware(
    axum::extract::State(config): axum::extract::State<Arc<RwLock<Settings>>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match check_auth_config(&config, &path) {
        AuthCheck::Disabled | AuthCheck::PublicPath => next.run(request).await,
        AuthCheck::CheckKey(expected) => {
            let provided = request
                .headers()
                .get("X-API-Key")
                .and_then(|v| v.to_str().ok());

            match provided {
                None => {
                    record_auth_failure();
                    ApiError::MissingApiKey.into_response()
                }
                Some(key) if constant_time_compare(key.as_bytes(), expected.as_bytes()) => {
                    next.run(request).await
                }
                Some(_) => {
                    record_auth_failure();
                    ApiError::InvalidApiKey.into_response()
                }
            }
        }
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_compare_matches_equal_slices() {
        assert!(constant_time_compare(b"secret", b"secret"));
        assert!(!constant_time_compare(b"secret", b"secre"));
        assert!(!constant_time_compare(b"secret", b"secreT"));
    }
}
