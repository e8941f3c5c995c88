//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{OwnerId, Task, TaskId, TaskPage, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    owner_index: HashMap<OwnerId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.len())
    }

    /// Returns `true` when no tasks are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Orders tasks the way every adapter pages them: oldest first, then by ID.
fn sort_by_creation(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().cmp(&right.id()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state
            .owner_index
            .entry(task.owner_id())
            .or_default()
            .push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_fields(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        stored.apply_patch(patch.clone(), updated_at);
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(removed) = state.tasks.remove(&id) else {
            return Ok(None);
        };

        let owner_id = removed.owner_id();
        if let Some(ids) = state.owner_index.get_mut(&owner_id) {
            ids.retain(|task_id| *task_id != id);
            if ids.is_empty() {
                state.owner_index.remove(&owner_id);
            }
        }
        Ok(Some(removed))
    }

    async fn find_by_owner(
        &self,
        owner_id: OwnerId,
        page: TaskPage,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut owned: Vec<Task> = state
            .owner_index
            .get(&owner_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        sort_by_creation(&mut owned);

        let offset = usize::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = usize::try_from(page.limit()).map_err(TaskRepositoryError::persistence)?;
        Ok(owned.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut overdue: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.is_overdue(now))
            .cloned()
            .collect();
        sort_by_creation(&mut overdue);
        Ok(overdue)
    }
}
