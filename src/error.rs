//! Error types for the quiz session engine.
//!
//! Only [`Error::Configuration`] is meant to reach the end user. Corrupt stored
//! sessions are recovered inside the stores and never show up here, and the
//! remaining variants describe contract violations or backend failures.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the engine, its timers and the session stores.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The quiz kind has no definition, no questions, or a question without options.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller broke the engine contract (wrong cursor, unknown option, wrong state).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Another engine instance has claimed this quiz kind since this one started.
    #[error("Stale session for quiz kind '{0}'")]
    StaleSession(String),

    /// A session could not be serialized for storage.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<sea_orm::DbErr> for Error {
    fn from(err: sea_orm::DbErr) -> Self {
        Error::Backend(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Error::Encode(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for Error {
    fn from(err: tower_sessions::session::Error) -> Self {
        Error::Backend(err.to_string())
    }
}
