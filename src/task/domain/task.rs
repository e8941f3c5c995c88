//! Task aggregate root and related lifecycle types.

use super::{
    OwnerId, Recurrence, TaskDescription, TaskDomainError, TaskId, TaskName, TaskPriority,
    TaskStatus,
};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated task fields captured at creation time.
///
/// Recurring triggers keep a copy of the template and build every spawned
/// task from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    name: TaskName,
    description: Option<TaskDescription>,
    scheduled_at: DateTime<Utc>,
    location: Option<String>,
    recurrence: Option<Recurrence>,
    priority: TaskPriority,
}

impl TaskTemplate {
    /// Creates a template with the required fields and default priority.
    #[must_use]
    pub const fn new(name: TaskName, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            name,
            description: None,
            scheduled_at,
            location: None,
            recurrence: None,
            priority: TaskPriority::Medium,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the recurrence.
    #[must_use]
    pub const fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the recurrence, if any.
    #[must_use]
    pub const fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    /// Returns the scheduled date-time.
    #[must_use]
    pub const fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }
}

/// Reads `clock` at the microsecond precision that task storage keeps.
#[must_use]
pub fn stamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}

/// Partial set of mutable task attributes.
///
/// `None` leaves a field untouched. Optional attributes are tri-state:
/// `Some(None)` clears the stored value. The owner is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(
    clippy::option_option,
    reason = "optional attributes distinguish keep, replace and clear"
)]
pub struct TaskPatch {
    /// Replacement name.
    pub name: Option<TaskName>,
    /// Replacement or cleared description.
    pub description: Option<Option<TaskDescription>>,
    /// Replacement scheduled date-time.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement or cleared location.
    pub location: Option<Option<String>>,
    /// Replacement or cleared recurrence.
    pub recurrence: Option<Option<Recurrence>>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Creates a patch that only moves the task to `status`.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch sets no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.scheduled_at.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.recurrence.is_none()
            && self.priority.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    name: TaskName,
    description: Option<TaskDescription>,
    scheduled_at: DateTime<Utc>,
    status: TaskStatus,
    location: Option<String>,
    recurrence: Option<Recurrence>,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted scheduled date-time.
    pub scheduled_at: DateTime<Utc>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted location, if any.
    pub location: Option<String>,
    /// Persisted recurrence, if any.
    pub recurrence: Option<Recurrence>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owner_id`.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        template: TaskTemplate,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = stamp(clock);
        let TaskTemplate {
            name,
            description,
            scheduled_at,
            location,
            recurrence,
            priority,
        } = template;

        Self {
            id: TaskId::new(),
            owner_id,
            name,
            description,
            scheduled_at,
            status,
            location,
            recurrence,
            priority,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Creates a fresh `Pending` task from a trigger's captured template.
    #[must_use]
    pub fn spawn_from_template(
        owner_id: OwnerId,
        template: &TaskTemplate,
        clock: &impl Clock,
    ) -> Self {
        Self::new(owner_id, template.clone(), TaskStatus::Pending, clock)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            description: data.description,
            scheduled_at: data.scheduled_at,
            status: data.status,
            location: data.location,
            recurrence: data.recurrence,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the scheduled date-time.
    #[must_use]
    pub const fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the recurrence, if any.
    #[must_use]
    pub const fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task is `Pending` and scheduled before `now`.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Pending && self.scheduled_at < now
    }

    /// Applies every field set on `patch` and stamps `updated_at`.
    pub fn apply_patch(&mut self, patch: TaskPatch, updated_at: DateTime<Utc>) {
        let TaskPatch {
            name,
            description,
            scheduled_at,
            status,
            location,
            recurrence,
            priority,
        } = patch;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = scheduled_at {
            self.scheduled_at = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = location {
            self.location = value;
        }
        if let Some(value) = recurrence {
            self.recurrence = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        self.updated_at = updated_at;
    }
}

/// One page of an owner's task list.
///
/// Pages are 1-based; page `n` covers the window
/// `[(n - 1) * limit, n * limit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPage {
    page: u32,
    limit: u32,
}

impl TaskPage {
    /// Page used when the caller supplies none.
    pub const DEFAULT_PAGE: u32 = 1;

    /// Page size used when the caller supplies none.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Creates a validated page window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPage`] when `page` or `limit` is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, TaskDomainError> {
        if page == 0 || limit == 0 {
            return Err(TaskDomainError::InvalidPage { page, limit });
        }
        Ok(Self { page, limit })
    }

    /// Builds a window from optional query parameters.
    ///
    /// Missing or zero values fall back to the given defaults, which must be
    /// non-zero themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPage`] when a fallback is zero.
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, TaskDomainError> {
        let resolved_page = page.filter(|value| *value > 0).unwrap_or(Self::DEFAULT_PAGE);
        let resolved_limit = limit.filter(|value| *value > 0).unwrap_or(default_limit);
        Self::new(resolved_page, resolved_limit)
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of records skipped before this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * (self.limit as u64)
    }
}

impl Default for TaskPage {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
