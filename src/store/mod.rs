//! Durable key-value storage for in-flight attempts.
//!
//! A store holds at most one [`QuizAttemptSession`] per quiz kind. Stores must
//! treat undecodable data as absent: a corrupt slot is logged and reported as
//! `Ok(None)` so a fresh attempt can always be started.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::QuizAttemptSession;

pub mod seaorm;
pub mod tower;

pub use self::seaorm::SeaOrmStore;
pub use self::tower::TowerSessionStore;

/// Persistence contract used by the engine.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session stored for `quiz_type_key`.
    ///
    /// Returns `Ok(None)` both when nothing is stored and when the stored
    /// bytes cannot be decoded.
    async fn load(&self, quiz_type_key: &str) -> Result<Option<QuizAttemptSession>>;

    /// Stores `session` under `quiz_type_key`, replacing what was there.
    async fn save(&self, quiz_type_key: &str, session: &QuizAttemptSession) -> Result<()>;

    /// Removes the slot. Clearing an empty slot is not an error.
    async fn clear(&self, quiz_type_key: &str) -> Result<()>;
}

/// Decodes a MessagePack slot, logging and discarding anything unreadable.
pub(crate) fn decode_or_discard(quiz_type_key: &str, data: &[u8]) -> Option<QuizAttemptSession> {
    match rmp_serde::from_slice::<QuizAttemptSession>(data) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(quiz_type_key, error = %e, "discarding undecodable quiz session");
            None
        }
    }
}

/// An in-process store keeping MessagePack-encoded slots in a map.
///
/// Clones share the same map, which lets a test hand one clone to an engine
/// and inspect or tamper with the data through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes raw bytes into a slot, bypassing encoding.
    pub fn insert_raw(&self, quiz_type_key: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.slots().insert(quiz_type_key.into(), data.into());
    }

    /// Whether anything, decodable or not, is stored under `quiz_type_key`.
    pub fn contains(&self, quiz_type_key: &str) -> bool {
        self.slots().contains_key(quiz_type_key)
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, quiz_type_key: &str) -> Result<Option<QuizAttemptSession>> {
        let data = self.slots().get(quiz_type_key).cloned();
        Ok(data.and_then(|bytes| decode_or_discard(quiz_type_key, &bytes)))
    }

    async fn save(&self, quiz_type_key: &str, session: &QuizAttemptSession) -> Result<()> {
        let data = rmp_serde::to_vec(session).map_err(|e| Error::Encode(e.to_string()))?;
        self.slots().insert(quiz_type_key.to_string(), data);
        Ok(())
    }

    async fn clear(&self, quiz_type_key: &str) -> Result<()> {
        self.slots().remove(quiz_type_key);
        Ok(())
    }
}
