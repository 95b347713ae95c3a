//! Tracks which engine instance currently owns each quiz kind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Proof of ownership handed out by [`SessionRegistry::claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptToken(u64);

/// The "active attempt per quiz kind" map.
///
/// Pass the same registry to every engine that shares a session store. An
/// engine whose claim was taken over by a newer one becomes stale and stops
/// writing. Separate registries never see each other, which keeps engines
/// under test isolated.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    active: Arc<Mutex<HashMap<String, AttemptToken>>>,
    next_token: Arc<AtomicU64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `quiz_type_key`, displacing any previous owner.
    pub fn claim(&self, quiz_type_key: &str) -> AttemptToken {
        let token = AttemptToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        if let Some(previous) = self.lock().insert(quiz_type_key.to_string(), token) {
            tracing::debug!(quiz_type_key, ?previous, ?token, "quiz kind claimed by a new attempt");
        }
        token
    }

    /// Whether `token` is still the current claim on `quiz_type_key`.
    pub fn owns(&self, quiz_type_key: &str, token: AttemptToken) -> bool {
        self.lock().get(quiz_type_key) == Some(&token)
    }

    /// Releases the claim if `token` still holds it.
    pub fn release(&self, quiz_type_key: &str, token: AttemptToken) {
        let mut active = self.lock();
        if active.get(quiz_type_key) == Some(&token) {
            active.remove(quiz_type_key);
        }
    }

    /// Quiz kinds that currently have an owner.
    pub fn active_kinds(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AttemptToken>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_claim_displaces_older() {
        let registry = SessionRegistry::new();
        let first = registry.claim("daily");
        let second = registry.claim("daily");

        assert!(!registry.owns("daily", first));
        assert!(registry.owns("daily", second));

        registry.release("daily", first);
        assert!(registry.owns("daily", second));
        registry.release("daily", second);
        assert!(registry.active_kinds().is_empty());
    }

    #[test]
    fn registries_are_independent() {
        let a = SessionRegistry::new();
        let b = SessionRegistry::new();
        let token = a.claim("daily");
        b.claim("daily");
        assert!(a.owns("daily", token));
    }
}
