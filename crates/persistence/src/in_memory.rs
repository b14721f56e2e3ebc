//! The in-memory `SessionStore` backend: a keyed map plus a last-seen
//! timestamp map, guarded by `dashmap`'s internal sharded locking for
//! per-entry access and a coarse lock only for structural sweeps.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use scam_honeypot_core::{Result, Session, SessionStore};

/// Keeps sessions entirely in process memory. Records are cloned on read
/// and write so callers never alias the stored copy.
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn is_expired(&self, session: &Session) -> bool {
        let age = Utc::now().signed_duration_since(session.last_updated);
        age.to_std().map(|d| d > self.ttl).unwrap_or(false)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>> {
        match self.sessions.get(id) {
            Some(entry) if !self.is_expired(&entry) => Ok(Some(entry.clone())),
            Some(_) => Ok(None),
            None => Ok(None),
        }
    }

    async fn set(&self, id: &str, session: &Session) -> Result<()> {
        self.sessions.insert(id.to_string(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.sessions.remove(id).is_some())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self
            .sessions
            .get(id)
            .map(|entry| !self.is_expired(&entry))
            .unwrap_or(false))
    }

    async fn cleanup_expired(&self) -> Result<usize> {
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| self.is_expired(entry.value()))
            .map(|entry| entry.key().clone())
            .collect();
        let count = expired.len();
        for id in expired {
            self.sessions.remove(&id);
        }
        Ok(count)
    }

    async fn active_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .sessions
            .iter()
            .filter(|entry| !self.is_expired(entry.value()))
            .map(|entry| entry.key().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = InMemorySessionStore::new(Duration::from_secs(3600));
        let session = Session::new("abc");
        store.set("abc", &session).await.unwrap();
        let fetched = store.get("abc").await.unwrap().unwrap();
        assert_eq!(fetched.id, "abc");
    }

    #[tokio::test]
    async fn delete_removes_and_reports_presence() {
        let store = InMemorySessionStore::new(Duration::from_secs(3600));
        store.set("abc", &Session::new("abc")).await.unwrap();
        assert!(store.delete("abc").await.unwrap());
        assert!(!store.delete("abc").await.unwrap());
        assert!(!store.exists("abc").await.unwrap());
    }

    #[tokio::test]
    async fn expired_sessions_are_swept() {
        let store = InMemorySessionStore::new(Duration::from_millis(1));
        store.set("abc", &Session::new("abc")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let removed = store.cleanup_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get("abc").await.unwrap().is_none());
    }
}
