use async_trait::async_trait;
use tower_sessions::Session;

use crate::error::Result;
use crate::model::QuizAttemptSession;
use crate::store::SessionStore;

/// Key prefix for quiz slots inside a tower session.
pub const SESSION_KEY_PREFIX: &str = "quiz_session.";

/// Keeps quiz slots inside a [`tower_sessions::Session`].
///
/// A tower session is scoped to one browser cookie, which is exactly the
/// "durable within one browser profile" guarantee the engine asks for. Each
/// quiz kind lives under its own key, so several kinds can be in flight at once.
///
/// ```no_run
/// use tower_sessions::Session;
/// use quiz_session_engine::{SessionStore, TowerSessionStore};
///
/// # async fn handler(session: Session) -> quiz_session_engine::Result<()> {
/// let store = TowerSessionStore::new(session);
/// let stored = store.load("daily").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TowerSessionStore {
    session: Session,
}

impl TowerSessionStore {
    /// Wraps the session of the current request.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The wrapped tower session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn key(quiz_type_key: &str) -> String {
        format!("{SESSION_KEY_PREFIX}{quiz_type_key}")
    }
}

#[async_trait]
impl SessionStore for TowerSessionStore {
    async fn load(&self, quiz_type_key: &str) -> Result<Option<QuizAttemptSession>> {
        match self.session.get::<QuizAttemptSession>(&Self::key(quiz_type_key)).await {
            Ok(stored) => Ok(stored),
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::warn!(quiz_type_key, error = %e, "discarding undecodable quiz session");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, quiz_type_key: &str, session: &QuizAttemptSession) -> Result<()> {
        self.session.insert(&Self::key(quiz_type_key), session).await?;
        self.session.save().await?;
        Ok(())
    }

    async fn clear(&self, quiz_type_key: &str) -> Result<()> {
        self.session.remove_value(&Self::key(quiz_type_key)).await?;
        self.session.save().await?;
        Ok(())
    }
}
