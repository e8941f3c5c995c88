//! Materializes new tasks when a recurring trigger fires.

use crate::task::{
    domain::{Task, TriggerRegistration},
    ports::{TaskRepository, TaskRepositoryResult, TriggerHandler},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

/// Creates a fresh `Pending` task from a trigger's template on each firing.
///
/// Spawned tasks are independent records. They keep the template's
/// recurrence value but never register triggers of their own.
pub struct RecurringTaskSpawner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RecurringTaskSpawner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a spawner writing into `repository`.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Builds and stores one task from `registration`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn spawn(&self, registration: &TriggerRegistration) -> TaskRepositoryResult<Task> {
        let task = Task::spawn_from_template(
            registration.owner_id(),
            registration.template(),
            &*self.clock,
        );
        self.repository.store(&task).await?;
        Ok(task)
    }
}

#[async_trait]
impl<R, C> TriggerHandler for RecurringTaskSpawner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn on_fire(&self, registration: &TriggerRegistration) {
        match self.spawn(registration).await {
            Ok(task) => info!(
                task_id = %task.id(),
                owner_id = %task.owner_id(),
                name = %task.name(),
                "created recurring task"
            ),
            Err(err) => error!(
                owner_id = %registration.owner_id(),
                error = %err,
                "failed to create recurring task"
            ),
        }
    }
}
