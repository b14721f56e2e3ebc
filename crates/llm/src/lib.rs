//! The optional LLM text-generation capability (C8's LLM path).
//!
//! A single HTTP-backed provider plus a retry-with-fixed-backoff wrapper.
//! Absent from bootstrap configuration, the response generator falls back
//! to its always-present template path — nothing here is load-bearing.

pub mod gemini;
pub mod retry;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use retry::RetryingGenerator;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("timeout: {err}"))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for scam_honeypot_core::Error {
    fn from(err: LlmError) -> Self {
        scam_honeypot_core::Error::Generator(err.to_string())
    }
}
