//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Scheduled date-time.
    pub scheduled_at: DateTime<Utc>,
    /// Status in its storage spelling.
    pub status: String,
    /// Optional location.
    pub location: Option<String>,
    /// Optional recurrence keyword.
    pub recurrence: Option<String>,
    /// Priority in its storage spelling.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Scheduled date-time.
    pub scheduled_at: DateTime<Utc>,
    /// Status in its storage spelling.
    pub status: String,
    /// Optional location.
    pub location: Option<String>,
    /// Optional recurrence keyword.
    pub recurrence: Option<String>,
    /// Priority in its storage spelling.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset writing only the columns a patch sets.
///
/// `None` skips a column; `Some(None)` writes `NULL`. `updated_at` is always
/// written, so the changeset is never empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[expect(
    clippy::option_option,
    reason = "Diesel skips `None` and writes `NULL` for `Some(None)`"
)]
pub struct TaskPatchChangeset {
    /// Task name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<Option<String>>,
    /// Scheduled date-time.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Status in its storage spelling.
    pub status: Option<String>,
    /// Optional location.
    pub location: Option<Option<String>>,
    /// Optional recurrence keyword.
    pub recurrence: Option<Option<String>>,
    /// Priority in its storage spelling.
    pub priority: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
