//! C10's rate-analysis half: a per-client sliding 60-second window of
//! request timestamps, flagged suspicious on request volume or on a
//! too-regular cadence (the timing signature of a scripted probe rather
//! than a human typing). Entries are garbage-collected on a fixed cadence,
//! matching this codebase's rate-limiter-map convention.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;

const WINDOW: Duration = Duration::from_secs(60);
const MAX_REQUESTS_PER_WINDOW: usize = 30;
const REGULAR_CADENCE_SAMPLE: usize = 5;
const REGULAR_CADENCE_MAX_MEAN_INTERVAL: f64 = 0.5;
const REGULAR_CADENCE_MAX_VARIANCE: f64 = 0.01;

pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Outcome of admitting a request into a client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateVerdict {
    Allowed,
    Suspicious,
}

#[derive(Default)]
struct ClientWindow {
    hits: Vec<Instant>,
}

impl ClientWindow {
    fn record_and_evaluate(&mut self, now: Instant) -> RateVerdict {
        self.hits.retain(|t| now.duration_since(*t) <= WINDOW);
        self.hits.push(now);

        if self.hits.len() > MAX_REQUESTS_PER_WINDOW {
            return RateVerdict::Suspicious;
        }
        if has_regular_cadence(&self.hits) {
            return RateVerdict::Suspicious;
        }
        RateVerdict::Allowed
    }
}

fn has_regular_cadence(hits: &[Instant]) -> bool {
    if hits.len() < REGULAR_CADENCE_SAMPLE {
        return false;
    }
    let recent = &hits[hits.len() - REGULAR_CADENCE_SAMPLE..];
    let intervals: Vec<f64> = recent
        .windows(2)
        .map(|w| w[1].duration_since(w[0]).as_secs_f64())
        .collect();
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let variance =
        intervals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / intervals.len() as f64;

    mean < REGULAR_CADENCE_MAX_MEAN_INTERVAL || variance < REGULAR_CADENCE_MAX_VARIANCE
}

/// Process-wide per-client rate tracker, keyed by an opaque client key
/// (IP + user-agent + session hash; callers build the key).
pub struct RateLimiter {
    clients: DashMap<String, Mutex<ClientWindow>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    pub fn check(&self, client_key: &str) -> RateVerdict {
        let now = Instant::now();
        let entry = self
            .clients
            .entry(client_key.to_string())
            .or_insert_with(|| Mutex::new(ClientWindow::default()));
        entry.lock().record_and_evaluate(now)
    }

    /// Drops clients with no activity in the current window; called on
    /// `CLEANUP_INTERVAL` from a background task.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, window| window.lock().hits.iter().any(|t| now.duration_since(*t) <= WINDOW));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_occasional_requests() {
        let limiter = RateLimiter::new();
        for _ in 0..5 {
            assert_eq!(limiter.check("client-a"), RateVerdict::Allowed);
        }
    }

    #[test]
    fn flags_high_volume() {
        let limiter = RateLimiter::new();
        let mut last = RateVerdict::Allowed;
        for _ in 0..(MAX_REQUESTS_PER_WINDOW + 5) {
            last = limiter.check("client-b");
        }
        assert_eq!(last, RateVerdict::Suspicious);
    }

    #[test]
    fn sweep_removes_stale_clients() {
        let limiter = RateLimiter::new();
        limiter.check("client-c");
        assert!(limiter.clients.contains_key("client-c"));
        // Simulate staleness by clearing the recorded hits directly.
        limiter
            .clients
            .get("client-c")
            .unwrap()
            .lock()
            .hits
            .clear();
        limiter.sweep();
        assert!(!limiter.clients.contains_key("client-c"));
    }
}
