//! Conversation session persistence (in-process map or Redis).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::session::Session;

/// Redis key prefix for serialized sessions.
const KEY_PREFIX: &str = "supportbot:session:";

pub struct MemoryEntry {
    session: Session,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

pub enum SessionStore {
    Memory {
        map: RwLock<HashMap<String, MemoryEntry>>,
        ttl: Duration,
    },
    Redis {
        conn: MultiplexedConnection,
        ttl_secs: u64,
    },
}

impl SessionStore {
    /// In-process store. Sessions expire `ttl` after their last write.
    pub fn memory(ttl: Duration) -> Self {
        Self::Memory {
            map: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Connect to Redis. Sessions expire `ttl_secs` after their last write.
    pub async fn redis(url: &str, ttl_secs: u64) -> Result<Self, AppError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self::Redis {
            conn,
            ttl_secs: ttl_secs.max(1),
        })
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Memory { .. } => "memory",
            Self::Redis { .. } => "redis",
        }
    }

    pub async fn load(&self, id: &str) -> Result<Option<Session>, AppError> {
        match self {
            Self::Memory { map, .. } => {
                let now = Instant::now();
                Ok(map
                    .read()
                    .await
                    .get(id)
                    .filter(|entry| entry.is_live(now))
                    .map(|entry| entry.session.clone()))
            }
            Self::Redis { conn, .. } => {
                let mut conn = conn.clone();
                let raw: Option<String> = redis::cmd("GET")
                    .arg(key(id))
                    .query_async(&mut conn)
                    .await?;
                raw.map(|json| serde_json::from_str(&json))
                    .transpose()
                    .map_err(AppError::from)
            }
        }
    }

    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        match self {
            Self::Memory { map, ttl } => {
                let entry = MemoryEntry {
                    session: session.clone(),
                    expires_at: Instant::now() + *ttl,
                };
                map.write().await.insert(session.id.clone(), entry);
                Ok(())
            }
            Self::Redis { conn, ttl_secs } => {
                let mut conn = conn.clone();
                let json = serde_json::to_string(session)?;
                let _: () = redis::cmd("SET")
                    .arg(key(&session.id))
                    .arg(json)
                    .arg("EX")
                    .arg(*ttl_secs)
                    .query_async(&mut conn)
                    .await?;
                Ok(())
            }
        }
    }

    /// Delete a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> Result<bool, AppError> {
        match self {
            Self::Memory { map, .. } => {
                let now = Instant::now();
                Ok(map
                    .write()
                    .await
                    .remove(id)
                    .is_some_and(|entry| entry.is_live(now)))
            }
            Self::Redis { conn, .. } => {
                let mut conn = conn.clone();
                let removed: i64 = redis::cmd("DEL")
                    .arg(key(id))
                    .query_async(&mut conn)
                    .await?;
                Ok(removed > 0)
            }
        }
    }

    /// Check that the backend is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Self::Memory { .. } => Ok(()),
            Self::Redis { conn, .. } => {
                let mut conn = conn.clone();
                let _: String = redis::cmd("PING").query_async(&mut conn).await?;
                Ok(())
            }
        }
    }

    /// Drop expired in-memory sessions and return how many were removed.
    /// Redis expires keys on its own, so this is a no-op there.
    pub async fn purge_expired(&self) -> usize {
        match self {
            Self::Memory { map, .. } => {
                let now = Instant::now();
                let mut map = map.write().await;
                let before = map.len();
                map.retain(|_, entry| entry.is_live(now));
                before - map.len()
            }
            Self::Redis { .. } => 0,
        }
    }
}

fn key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Role;

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn memory_save_then_load() {
        let store = SessionStore::memory(DAY);
        let mut session = Session::new("abc");
        session.record(Role::User, "hello", 10);
        store.save(&session).await.unwrap();

        let loaded = store.load("abc").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 1);
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_remove_reports_existence() {
        let store = SessionStore::memory(DAY);
        store.save(&Session::new("abc")).await.unwrap();
        assert!(store.remove("abc").await.unwrap());
        assert!(!store.remove("abc").await.unwrap());
    }

    #[tokio::test]
    async fn memory_backend_is_always_ready() {
        let store = SessionStore::memory(DAY);
        assert_eq!(store.backend(), "memory");
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn memory_sessions_expire_after_ttl() {
        let store = SessionStore::memory(Duration::from_millis(20));
        let mut session = Session::new("old");
        session.record(Role::User, "my name is Ana", 10);
        store.save(&session).await.unwrap();
        assert!(store.load("old").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.load("old").await.unwrap().is_none());
        assert!(!store.remove("old").await.unwrap());
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let store = SessionStore::memory(Duration::from_millis(20));
        store.save(&Session::new("stale")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        store.save(&Session::new("fresh")).await.unwrap();

        assert_eq!(store.purge_expired().await, 1);
        assert!(store.load("fresh").await.unwrap().is_some());
        assert_eq!(store.purge_expired().await, 0);
    }

    #[test]
    fn redis_keys_are_namespaced() {
        assert_eq!(key("abc"), "supportbot:session:abc");
    }
}
