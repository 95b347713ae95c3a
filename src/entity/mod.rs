//! Database entity models for the SeaORM session store.
//!
//! The store keeps one row per quiz kind. See [`quiz_session`] for the column
//! layout.

/// Quiz session entity model for Sea-ORM database interaction.
pub mod quiz_session;
