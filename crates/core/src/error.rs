//! Shared error type for the honeypot pipeline.

use thiserror::Error;

/// Errors surfaced by the engagement pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("generator error: {0}")]
    Generator(String),

    #[error("callback error: {0}")]
    Callback(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
