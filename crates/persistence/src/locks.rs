//! Per-session locking. The pipeline must hold a session's lock for the
//! whole duration of a turn, so every store mutation is serialized per
//! session id without blocking turns on unrelated sessions.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, Semaphore};

/// Maps session ids to per-session `tokio::sync::Mutex`es, plus a global
/// semaphore bounding total concurrent turns across all sessions.
pub struct LockManager {
    locks: DashMap<String, Arc<Mutex<()>>>,
    concurrency: Arc<Semaphore>,
}

/// Held for the duration of a turn. Releases both the per-session lock and
/// the global concurrency permit on drop.
pub struct SessionGuard {
    _session_lock: OwnedMutexGuard<()>,
    _permit: tokio::sync::OwnedSemaphorePermit,
}

impl LockManager {
    pub fn new(max_concurrent_sessions: usize) -> Self {
        Self {
            locks: DashMap::new(),
            concurrency: Arc::new(Semaphore::new(max_concurrent_sessions)),
        }
    }

    /// Acquires the global concurrency permit, then the session's own
    /// lock, creating the lock entry if this is the session's first turn.
    pub async fn acquire(&self, id: &str) -> SessionGuard {
        let permit = self
            .concurrency
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore is never closed");

        let lock = self
            .locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let session_lock = lock.lock_owned().await;

        SessionGuard {
            _session_lock: session_lock,
            _permit: permit,
        }
    }

    /// Drops lock entries for session ids no longer in the backend's
    /// active set. Safe to call concurrently with `acquire`: a lock held
    /// by an in-flight turn is simply re-inserted on that session's next
    /// `acquire` call, since `entry().or_insert_with` recreates it.
    pub fn sweep_stale(&self, active_ids: &[String]) {
        let active: std::collections::HashSet<&str> =
            active_ids.iter().map(|s| s.as_str()).collect();
        self.locks.retain(|id, lock| {
            active.contains(id.as_str()) || Arc::strong_count(lock) > 1
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_session_serializes_turns() {
        let manager = Arc::new(LockManager::new(10));
        let m1 = manager.clone();
        let m2 = manager.clone();

        let order = Arc::new(Mutex::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();

        let first = tokio::spawn(async move {
            let _guard = m1.acquire("s1").await;
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            o1.lock().await.push(1);
        });
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = tokio::spawn(async move {
            let _guard = m2.acquire("s1").await;
            o2.lock().await.push(2);
        });

        first.await.unwrap();
        second.await.unwrap();
        assert_eq!(*order.lock().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn sweep_drops_inactive_session_locks() {
        let manager = LockManager::new(10);
        {
            let _guard = manager.acquire("gone").await;
        }
        manager.sweep_stale(&[]);
        assert!(manager.locks.is_empty());
    }
}
