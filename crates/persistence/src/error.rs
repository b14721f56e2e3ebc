//! Persistence-layer error type, mapped into the shared `scam_honeypot_core::Error`
//! at the `SessionStore` trait boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("backend connection error: {0}")]
    Connection(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<scylla::transport::errors::NewSessionError> for PersistenceError {
    fn from(err: scylla::transport::errors::NewSessionError) -> Self {
        PersistenceError::Connection(err.to_string())
    }
}

impl From<scylla::transport::errors::QueryError> for PersistenceError {
    fn from(err: scylla::transport::errors::QueryError) -> Self {
        PersistenceError::Query(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Serialization(err.to_string())
    }
}

impl From<PersistenceError> for scam_honeypot_core::Error {
    fn from(err: PersistenceError) -> Self {
        scam_honeypot_core::Error::Store(err.to_string())
    }
}
