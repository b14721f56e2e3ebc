use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("callback endpoint returned {0}")]
    BadStatus(u16),

    #[error("callback URL not configured")]
    NotConfigured,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

impl From<TransportError> for scam_honeypot_core::Error {
    fn from(err: TransportError) -> Self {
        scam_honeypot_core::Error::Callback(err.to_string())
    }
}
