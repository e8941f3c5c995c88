//! Service layer for task creation, mutation, retrieval, and the overdue
//! sweep.

use super::config::TaskLifecycleConfig;
use crate::task::{
    domain::{
        OwnerId, Recurrence, Task, TaskDescription, TaskDomainError, TaskId, TaskName, TaskPage,
        TaskPatch, TaskPriority, TaskStatus, TaskTemplate, TriggerRegistration, TriggerRule,
        parse_scheduled_at, stamp,
    },
    ports::{RecurrenceScheduler, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Request payload for creating a task.
///
/// Fields are raw caller input; the service validates them before any
/// write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    date_time: String,
    description: Option<String>,
    status: Option<String>,
    location: Option<String>,
    recurrence: Option<String>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, date_time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_time: date_time.into(),
            description: None,
            status: None,
            location: None,
            recurrence: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an explicit initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the recurrence keyword.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: impl Into<String>) -> Self {
        self.recurrence = Some(recurrence.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for patching a task. Unset fields stay unchanged.
///
/// Description, location and recurrence can also be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(
    clippy::option_option,
    reason = "optional attributes distinguish keep, replace and clear"
)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    date_time: Option<String>,
    description: Option<Option<String>>,
    status: Option<String>,
    location: Option<Option<String>>,
    recurrence: Option<Option<String>>,
    priority: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the scheduled date-time.
    #[must_use]
    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(Some(location.into()));
        self
    }

    /// Removes the location.
    #[must_use]
    pub fn clear_location(mut self) -> Self {
        self.location = Some(None);
        self
    }

    /// Replaces the recurrence keyword.
    ///
    /// A blank or unrecognized keyword leaves the task without recurrence,
    /// as it would on creation.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: impl Into<String>) -> Self {
        self.recurrence = Some(Some(recurrence.into()));
        self
    }

    /// Removes the recurrence.
    #[must_use]
    pub fn clear_recurrence(mut self) -> Self {
        self.recurrence = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    fn from_repository(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// A task the overdue sweep could not cancel.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    /// Task the sweep tried to cancel.
    pub task_id: TaskId,
    /// Error returned by the repository.
    pub error: TaskRepositoryError,
}

/// Outcome of one overdue sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    cancelled: Vec<TaskId>,
    failures: Vec<SweepFailure>,
}

impl SweepReport {
    /// Returns the tasks that were cancelled and written.
    #[must_use]
    pub fn cancelled(&self) -> &[TaskId] {
        &self.cancelled
    }

    /// Returns the tasks whose cancellation could not be written.
    #[must_use]
    pub fn failures(&self) -> &[SweepFailure] {
        &self.failures
    }

    /// Returns `true` when the sweep found nothing to cancel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cancelled.is_empty() && self.failures.is_empty()
    }
}

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: RecurrenceScheduler,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    scheduler: Arc<S>,
    clock: Arc<C>,
    config: TaskLifecycleConfig,
}

impl<R, S, C> Clone for TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: RecurrenceScheduler,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            scheduler: Arc::clone(&self.scheduler),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<R, S, C> TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: RecurrenceScheduler,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, scheduler: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_config(repository, scheduler, clock, TaskLifecycleConfig::default())
    }

    /// Creates a new task lifecycle service with custom configuration.
    #[must_use]
    pub const fn with_config(
        repository: Arc<R>,
        scheduler: Arc<S>,
        clock: Arc<C>,
        config: TaskLifecycleConfig,
    ) -> Self {
        Self {
            repository,
            scheduler,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskLifecycleConfig {
        &self.config
    }

    /// Creates a task for `owner_id`.
    ///
    /// The status defaults to `Pending`. A recognized recurrence registers
    /// one trigger after the task is stored; a registration failure is
    /// logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails and
    /// [`TaskLifecycleError::Repository`] when the write fails.
    pub async fn create_task(
        &self,
        owner_id: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            name,
            date_time,
            description,
            status,
            location,
            recurrence,
            priority,
        } = request;

        let mut template = TaskTemplate::new(TaskName::new(name)?, parse_scheduled_at(&date_time)?);
        if let Some(raw) = description {
            template = template.with_description(TaskDescription::new(raw)?);
        }
        if let Some(raw) = location {
            template = template.with_location(raw);
        }
        if let Some(raw) = priority {
            template = template.with_priority(TaskPriority::try_from(raw.as_str())?);
        }
        if let Some(parsed) = self.resolve_recurrence(recurrence.as_deref())? {
            template = template.with_recurrence(parsed);
        }
        let initial_status = status
            .map(|raw| TaskStatus::try_from(raw.as_str()))
            .transpose()
            .map_err(TaskDomainError::from)?
            .unwrap_or_default();

        let task = Task::new(owner_id, template.clone(), initial_status, &*self.clock);
        self.repository.store(&task).await?;
        debug!(task_id = %task.id(), owner_id = %owner_id, "created task");

        if let Some(parsed) = template.recurrence() {
            self.register_trigger(owner_id, parsed, template);
        }
        Ok(task)
    }

    /// Applies `request` to an existing task and returns the result.
    ///
    /// Only the fields the request sets are written, so a concurrent write to
    /// other fields of the same task is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Domain`] when validation fails, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let patch = self.build_patch(request)?;
        let task = self
            .repository
            .update_fields(task_id, &patch, stamp(&*self.clock))
            .await
            .map_err(TaskLifecycleError::from_repository)?;
        debug!(task_id = %task_id, "updated task");
        Ok(task)
    }

    /// Deletes a task and returns its final state.
    ///
    /// Tasks already spawned by its trigger, and the trigger itself, are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let deleted = self
            .repository
            .delete(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        debug!(task_id = %task_id, "deleted task");
        Ok(deleted)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn get_task_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Returns one page of the tasks owned by `owner_id`, oldest first.
    ///
    /// An owner without tasks yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the scan fails.
    pub async fn get_tasks_by_owner(
        &self,
        owner_id: OwnerId,
        page: TaskPage,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_owner(owner_id, page).await?)
    }

    /// Builds a page window from optional query values using this service's
    /// default page size.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the configured default is
    /// unusable.
    pub fn page_from_query(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> TaskLifecycleResult<TaskPage> {
        Ok(TaskPage::from_query(
            page,
            limit,
            self.config.default_page_limit,
        )?)
    }

    /// Cancels every `Pending` task scheduled before now.
    ///
    /// Each task is written on its own and only its status changes; a failed
    /// write is recorded in the report and the sweep moves on to the next
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] only when the initial scan
    /// for overdue tasks fails.
    pub async fn mark_overdue_tasks_as_cancelled(&self) -> TaskLifecycleResult<SweepReport> {
        let now = self.clock.utc();
        let overdue = self.repository.find_overdue(now).await?;
        let cancellation = TaskPatch::status_only(TaskStatus::Cancelled);
        let mut report = SweepReport::default();

        for task in overdue {
            let task_id = task.id();
            match self
                .repository
                .update_fields(task_id, &cancellation, stamp(&*self.clock))
                .await
            {
                Ok(cancelled) => {
                    info!(task_id = %task_id, name = %cancelled.name(), "cancelled overdue task");
                    report.cancelled.push(task_id);
                }
                Err(err) => {
                    warn!(task_id = %task_id, error = %err, "failed to cancel overdue task");
                    report.failures.push(SweepFailure {
                        task_id,
                        error: err,
                    });
                }
            }
        }
        Ok(report)
    }

    fn resolve_recurrence(&self, raw: Option<&str>) -> TaskLifecycleResult<Option<Recurrence>> {
        let Some(keyword) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };
        if let Some(recurrence) = Recurrence::from_keyword(keyword) {
            return Ok(Some(recurrence));
        }
        if self.config.reject_unknown_recurrence {
            return Err(TaskDomainError::InvalidRecurrence(keyword.to_owned()).into());
        }
        warn!(recurrence = keyword, "ignoring unrecognized recurrence");
        Ok(None)
    }

    fn build_patch(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<TaskPatch> {
        let UpdateTaskRequest {
            name,
            date_time,
            description,
            status,
            location,
            recurrence,
            priority,
        } = request;

        let recurrence = match recurrence {
            Some(Some(raw)) => Some(self.resolve_recurrence(Some(&raw))?),
            Some(None) => Some(None),
            None => None,
        };

        Ok(TaskPatch {
            name: name.map(TaskName::new).transpose()?,
            description: description
                .map(|value| value.map(TaskDescription::new).transpose())
                .transpose()?,
            scheduled_at: date_time
                .as_deref()
                .map(parse_scheduled_at)
                .transpose()?,
            status: status
                .as_deref()
                .map(TaskStatus::try_from)
                .transpose()
                .map_err(TaskDomainError::from)?,
            location,
            recurrence,
            priority: priority
                .as_deref()
                .map(TaskPriority::try_from)
                .transpose()?,
        })
    }

    fn register_trigger(&self, owner_id: OwnerId, recurrence: Recurrence, template: TaskTemplate) {
        let registration =
            TriggerRegistration::new(owner_id, TriggerRule::for_recurrence(recurrence), template);
        match self.scheduler.register(registration) {
            Ok(trigger_id) => {
                debug!(
                    trigger_id = %trigger_id,
                    recurrence = %recurrence,
                    "registered recurring trigger"
                );
            }
            Err(err) => {
                error!(owner_id = %owner_id, error = %err, "failed to register recurring trigger");
            }
        }
    }
}
