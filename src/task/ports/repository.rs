//! Repository port for task persistence, lookup, and owner-scoped scans.

use crate::task::domain::{OwnerId, Task, TaskId, TaskPage, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations provide atomic single-record writes only. Updates touch
/// the patched columns and nothing else, so concurrent writers to disjoint
/// fields both survive; writers to the same field resolve last-write-wins.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Applies `patch` to the stored task in one write, stamps `updated_at`,
    /// and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_fields(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Removes a task and returns its last stored state.
    ///
    /// Returns `None` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of the tasks owned by `owner_id`.
    ///
    /// Tasks are ordered by creation time, then by identifier, so that
    /// consecutive pages never overlap.
    async fn find_by_owner(
        &self,
        owner_id: OwnerId,
        page: TaskPage,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every `Pending` task scheduled strictly before `now`.
    async fn find_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
