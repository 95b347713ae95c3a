//! Quiz session entity model for Sea-ORM database interaction.
//!
//! Maps to the `quiz_sessions` table created by the crate's migration.

use sea_orm::entity::prelude::*;

/// One stored attempt, keyed by quiz kind.
///
/// # Database Schema
///
/// | Column        | Type                    | Description                              |
/// |---------------|-------------------------|------------------------------------------|
/// | quiz_type_key | TEXT (Primary Key)      | Quiz kind, e.g. `daily`                  |
/// | data          | BYTEA / BLOB            | MessagePack serialized attempt           |
/// | updated_at    | TIMESTAMPTZ             | Last save (answer or time checkpoint)    |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_sessions")]
pub struct Model {
    /// The quiz kind this slot belongs to. Only one live attempt exists per kind.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub quiz_type_key: String,

    /// MessagePack encoding of a [`QuizAttemptSession`](crate::QuizAttemptSession).
    pub data: Vec<u8>,

    /// Refreshed on every save; used to purge slots nobody came back to.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
