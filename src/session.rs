//! Per-user session store.
//!
//! One record per `user_id`, created on first contact and filled in by the
//! conversation engine over subsequent turns. The store hands out shared
//! handles so a turn can hold its own session locked without blocking
//! other users.

use crate::lookup::Coordinates;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// The user's choice between device-supplied coordinates and a named place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMode {
    Current,
    Other,
}

/// Conversation state for one user. Fields start unset and are written
/// exactly once by their capture stage.
#[derive(Debug, Default)]
pub struct SessionRecord {
    pub name: Option<String>,
    pub location: Option<LocationMode>,
    pub coordinates: Option<Coordinates>,
}

/// Handle to one user's record; lock it for the duration of a turn.
pub type SharedSession = Arc<Mutex<SessionRecord>>;

struct Entry {
    record: SharedSession,
    last_seen: Instant,
}

/// In-memory session repository with get-or-create access and idle expiry.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Fetch the session for `user_id`, creating it if absent. Returns the
    /// handle and whether this call created the record — creation is what
    /// routes the request to the greeting stage.
    pub async fn get_or_create(&self, user_id: &str) -> (SharedSession, bool) {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(user_id) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                (entry.record.clone(), false)
            }
            None => {
                let record: SharedSession = Arc::new(Mutex::new(SessionRecord::default()));
                sessions.insert(
                    user_id.to_string(),
                    Entry {
                        record: record.clone(),
                        last_seen: Instant::now(),
                    },
                );
                (record, true)
            }
        }
    }

    /// Drop sessions idle for at least the configured TTL. Records still
    /// held by an in-flight turn are skipped regardless of age. Returns
    /// the number evicted.
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.record) > 1 || entry.last_seen.elapsed() < self.ttl
        });
        before - sessions.len()
    }

    #[allow(dead_code)] // Used in tests
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
