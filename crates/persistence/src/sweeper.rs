//! Background TTL sweeper. Runs on a fixed interval for the lifetime of
//! the process, calling the store's own `cleanup_expired` and trimming
//! stale lock entries against the resulting active set.

use std::sync::Arc;
use std::time::Duration;

use scam_honeypot_core::SessionStore;
use tracing::{info, warn};

use crate::locks::LockManager;

/// Spawns the sweeper task and returns its join handle; dropping or
/// aborting the handle stops sweeping. The default five-minute interval
/// matches this codebase's background-maintenance cadence.
pub fn spawn(
    store: Arc<dyn SessionStore>,
    locks: Arc<LockManager>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match store.cleanup_expired().await {
                Ok(count) if count > 0 => info!(count, "swept expired sessions"),
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "session cleanup sweep failed");
                    continue;
                }
            }
            match store.active_ids().await {
                Ok(active) => locks.sweep_stale(&active),
                Err(err) => warn!(error = %err, "active-id lookup failed during sweep"),
            }
        }
    })
}

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sweeper_removes_expired_and_trims_locks() {
        let store: Arc<dyn SessionStore> =
            Arc::new(crate::in_memory::InMemorySessionStore::new(Duration::from_millis(1)));
        store
            .set("abc", &scam_honeypot_core::Session::new("abc"))
            .await
            .unwrap();
        let locks = Arc::new(LockManager::new(10));
        {
            let _guard = locks.acquire("abc").await;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
        let handle = spawn(store.clone(), locks.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        assert!(store.get("abc").await.unwrap().is_none());
    }
}
