//! Per-conversation navigation session storage.
//!
//! One session id maps to at most one pending `NavSession`. Turns for the
//! same id must not interleave (the dialogue machine is a read-modify-write),
//! so the store hands out a per-id lease that serializes them; distinct ids
//! proceed in parallel.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use aeroguide_types::error::SessionStoreError;
use aeroguide_types::session::NavSession;

/// Holds the per-id turn lock for the duration of one inbound turn.
///
/// Dropping the lease releases the id for the next turn.
pub struct SessionLease {
    _guard: OwnedMutexGuard<()>,
}

impl SessionLease {
    pub fn new(guard: OwnedMutexGuard<()>) -> Self {
        Self { _guard: guard }
    }
}

/// Trait for session persistence backends.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
/// The bundled implementation is [`InMemorySessionStore`]; the trait exists
/// so a shared backend can replace it without touching the dialogue code.
pub trait SessionStore: Send + Sync {
    /// Take the per-id turn lock. Held across the whole turn.
    fn acquire(&self, id: &str) -> impl std::future::Future<Output = SessionLease> + Send;

    /// The pending session for an id, if any.
    fn load(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<NavSession>, SessionStoreError>> + Send;

    /// Store (or replace) the pending session for an id.
    fn store(
        &self,
        id: &str,
        session: NavSession,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;

    /// Drop the pending session for an id. Clearing an absent id is fine.
    fn clear(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;
}

impl<T: SessionStore> SessionStore for Arc<T> {
    async fn acquire(&self, id: &str) -> SessionLease {
        (**self).acquire(id).await
    }

    async fn load(&self, id: &str) -> Result<Option<NavSession>, SessionStoreError> {
        (**self).load(id).await
    }

    async fn store(&self, id: &str, session: NavSession) -> Result<(), SessionStoreError> {
        (**self).store(id, session).await
    }

    async fn clear(&self, id: &str) -> Result<(), SessionStoreError> {
        (**self).clear(id).await
    }
}

struct StoredSession {
    session: NavSession,
    touched_at: DateTime<Utc>,
}

/// Process-local session store backed by `DashMap`.
///
/// Sessions and their turn locks live in separate maps: a lock entry must
/// outlive its session (a turn can clear the session while still holding
/// the lease).
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: DashMap<String, StoredSession>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl InMemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            sessions: DashMap::new(),
            locks: DashMap::new(),
        }
    }

    /// Remove sessions idle past the TTL and prune locks nobody holds.
    /// Returns the number of evicted sessions.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| now - stored.touched_at < self.ttl);
        let evicted = before - self.sessions.len();
        self.locks
            .retain(|id, lock| self.sessions.contains_key(id) || Arc::strong_count(lock) > 1);
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn acquire(&self, id: &str) -> SessionLease {
        let lock = self
            .locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        SessionLease::new(lock.lock_owned().await)
    }

    async fn load(&self, id: &str) -> Result<Option<NavSession>, SessionStoreError> {
        Ok(self.sessions.get(id).map(|stored| stored.session.clone()))
    }

    async fn store(&self, id: &str, session: NavSession) -> Result<(), SessionStoreError> {
        self.sessions.insert(
            id.to_string(),
            StoredSession {
                session,
                touched_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<(), SessionStoreError> {
        self.sessions.remove(id);
        Ok(())
    }
}
