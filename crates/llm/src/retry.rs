//! Retry-with-fixed-backoff wrapper around a `TextGenerator`.
//!
//! A single transient failure is retried after a fixed delay rather than
//! immediately falling back to the template path; repeated failure still
//! surfaces an error so the caller can fall back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use scam_honeypot_core::{Result, TextGenerator};

/// Wraps any `TextGenerator` with a bounded number of retries, sleeping a
/// fixed delay between attempts. The capability boundary has already
/// flattened provider-specific error detail into the shared `Error` type,
/// so retry here is coarse: any failure is retried up to `max_attempts`
/// before being surfaced to the caller, which falls back to the template
/// path.
pub struct RetryingGenerator {
    inner: Arc<dyn TextGenerator>,
    max_attempts: u32,
    delay: Duration,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, max_attempts: u32, delay: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn with_defaults(inner: Arc<dyn TextGenerator>) -> Self {
        Self::new(inner, 2, Duration::from_millis(300))
    }
}

#[async_trait]
impl TextGenerator for RetryingGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.inner.generate_text(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    warn!(attempt, error = %err, "generator call failed, retrying after backoff");
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scam_honeypot_core::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyGenerator {
        calls: AtomicU32,
        fail_first_n: u32,
    }

    #[async_trait]
    impl TextGenerator for FlakyGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first_n {
                Err(Error::Generator("network error: connection reset".to_string()))
            } else {
                Ok("recovered".to_string())
            }
        }
    }

    #[tokio::test]
    async fn retries_once_then_succeeds() {
        let flaky = Arc::new(FlakyGenerator {
            calls: AtomicU32::new(0),
            fail_first_n: 1,
        });
        let retrying =
            RetryingGenerator::new(flaky.clone(), 2, Duration::from_millis(1));
        let result = retrying.generate_text("hello").await.unwrap();
        assert_eq!(result, "recovered");
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let flaky = Arc::new(FlakyGenerator {
            calls: AtomicU32::new(0),
            fail_first_n: 10,
        });
        let retrying =
            RetryingGenerator::new(flaky.clone(), 2, Duration::from_millis(1));
        let result = retrying.generate_text("hello").await;
        assert!(result.is_err());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
    }
}
