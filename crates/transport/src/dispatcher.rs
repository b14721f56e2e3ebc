//! C11 — posts the dossier to the configured callback URL with bounded
//! retry. Retry delays fall *between* attempts, never before the first —
//! the same attempt/sleep/retry shape the LLM backend client uses.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::warn;

use scam_honeypot_core::Dossier;

use crate::error::TransportError;

/// Delays between retry attempts; three entries means up to three retries
/// after the first attempt (four total tries).
const RETRY_SCHEDULE: &[Duration] = &[
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(2),
];

pub struct CallbackDispatcher {
    client: Client,
    url: Option<String>,
}

impl CallbackDispatcher {
    /// `url: None` means the dispatcher is configured to no-op — every
    /// `dispatch` call returns `Ok(false)` without attempting a request.
    pub fn new(url: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client builds with static config");
        Self { client, url }
    }

    /// Posts the dossier, retrying per `RETRY_SCHEDULE` on connect/read
    /// timeout or 5xx. Returns `Ok(true)` iff the final status is one of
    /// 200/201/202. Never returns `Err` for a non-retryable 4xx — that is
    /// reported as `Ok(false)`, matching "final failure returns false from
    /// the dispatcher but does not fail the turn".
    pub async fn dispatch(&self, dossier: &Dossier) -> Result<bool, TransportError> {
        let Some(url) = self.url.as_deref() else {
            return Ok(false);
        };

        let mut attempt = 0usize;
        loop {
            let result = self
                .client
                .post(url)
                .header("X-Session-Id", &dossier.session_id)
                .header("Accept", "application/json")
                .json(dossier)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if is_success(status) {
                        return Ok(true);
                    }
                    if !status.is_server_error() {
                        return Ok(false);
                    }
                    if attempt >= RETRY_SCHEDULE.len() {
                        warn!(%status, attempts = attempt + 1, "callback exhausted retries");
                        return Ok(false);
                    }
                }
                Err(err) if err.is_timeout() || err.is_connect() => {
                    if attempt >= RETRY_SCHEDULE.len() {
                        warn!(error = %err, attempts = attempt + 1, "callback exhausted retries");
                        return Ok(false);
                    }
                }
                Err(err) => return Err(TransportError::from(err)),
            }

            tokio::time::sleep(RETRY_SCHEDULE[attempt]).await;
            attempt += 1;
        }
    }
}

fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 202)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_exactly_200_201_202() {
        assert!(is_success(StatusCode::OK));
        assert!(is_success(StatusCode::CREATED));
        assert!(is_success(StatusCode::ACCEPTED));
        assert!(!is_success(StatusCode::NO_CONTENT));
        assert!(!is_success(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unconfigured_dispatcher_no_ops() {
        let dispatcher = CallbackDispatcher::new(None);
        let dossier = Dossier {
            session_id: "abc".into(),
            scam_detected: true,
            total_messages_exchanged: 3,
            extracted_intelligence: Default::default(),
            agent_notes: "notes".into(),
        };
        let sent = dispatcher.dispatch(&dossier).await.unwrap();
        assert!(!sent);
    }
}
