//! The shared-cache `SessionStore` backend, keyed by `scam_session:<id>` in
//! a ScyllaDB table with a server-side TTL column — this codebase's usual
//! choice for durable keyed state, in place of a plain Redis client.

use std::sync::Arc;

use async_trait::async_trait;
use scylla::{IntoTypedRows, Session as ScyllaSession, SessionBuilder};

use scam_honeypot_core::{Error, Result, Session, SessionStore};

use crate::error::PersistenceError;

const KEY_PREFIX: &str = "scam_session:";

/// Connection parameters for the backing cluster.
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub replication_factor: u8,
    pub ttl_seconds: i64,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        let hosts = std::env::var("SCYLLA_HOSTS")
            .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["127.0.0.1:9042".to_string()]);
        let keyspace =
            std::env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "scam_honeypot".to_string());
        Self {
            hosts,
            keyspace,
            replication_factor: 1,
            ttl_seconds: 3600,
        }
    }
}

pub struct ScyllaSessionStore {
    session: Arc<ScyllaSession>,
    keyspace: String,
    ttl_seconds: i64,
}

impl ScyllaSessionStore {
    pub async fn connect(config: ScyllaConfig) -> std::result::Result<Self, PersistenceError> {
        tracing::info!(hosts = ?config.hosts, keyspace = %config.keyspace, "connecting to scylla");
        let session = SessionBuilder::new()
            .known_nodes(&config.hosts)
            .build()
            .await?;

        let create_keyspace = format!(
            "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
            config.keyspace, config.replication_factor
        );
        session.query_unpaged(create_keyspace, &[]).await?;

        let create_table = format!(
            r#"CREATE TABLE IF NOT EXISTS {}.sessions (
                cache_key TEXT PRIMARY KEY,
                payload TEXT,
                updated_at BIGINT
            )"#,
            config.keyspace
        );
        session.query_unpaged(create_table, &[]).await?;

        Ok(Self {
            session: Arc::new(session),
            keyspace: config.keyspace,
            ttl_seconds: config.ttl_seconds,
        })
    }

    fn cache_key(id: &str) -> String {
        format!("{KEY_PREFIX}{id}")
    }

    fn table(&self) -> String {
        format!("{}.sessions", self.keyspace)
    }
}

#[async_trait]
impl SessionStore for ScyllaSessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>> {
        let query = format!(
            "SELECT payload FROM {} WHERE cache_key = ?",
            self.table()
        );
        let result = self
            .session
            .query_unpaged(query, (Self::cache_key(id),))
            .await
            .map_err(PersistenceError::from)?;

        let Some(rows) = result.rows else {
            return Ok(None);
        };
        let mut typed = rows.into_typed::<(String,)>();
        match typed.next() {
            Some(Ok((payload,))) => {
                let session = serde_json::from_str(&payload).map_err(PersistenceError::from)?;
                Ok(Some(session))
            }
            Some(Err(e)) => Err(Error::Store(e.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, id: &str, session: &Session) -> Result<()> {
        let payload = serde_json::to_string(session).map_err(PersistenceError::from)?;
        let query = format!(
            "INSERT INTO {} (cache_key, payload, updated_at) VALUES (?, ?, ?) USING TTL {}",
            self.table(),
            self.ttl_seconds
        );
        self.session
            .query_unpaged(
                query,
                (Self::cache_key(id), payload, chrono::Utc::now().timestamp()),
            )
            .await
            .map_err(PersistenceError::from)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let existed = self.exists(id).await?;
        let query = format!("DELETE FROM {} WHERE cache_key = ?", self.table());
        if let Err(e) = self.session.query_unpaged(query, (Self::cache_key(id),)).await {
            tracing::warn!(error = %e, session_id = id, "best-effort delete failed");
        }
        Ok(existed)
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    async fn cleanup_expired(&self) -> Result<usize> {
        // The backend's own per-row TTL already reclaims expired entries;
        // there is nothing this sweeper needs to do beyond what Scylla does
        // on compaction.
        Ok(0)
    }

    async fn active_ids(&self) -> Result<Vec<String>> {
        let query = format!("SELECT cache_key FROM {}", self.table());
        let result = self
            .session
            .query_unpaged(query, &[])
            .await
            .map_err(PersistenceError::from)?;
        let Some(rows) = result.rows else {
            return Ok(Vec::new());
        };
        let ids = rows
            .into_typed::<(String,)>()
            .filter_map(|r| r.ok())
            .map(|(key,)| key.trim_start_matches(KEY_PREFIX).to_string())
            .collect();
        Ok(ids)
    }
}
