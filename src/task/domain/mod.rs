//! Domain model for task lifecycle management.
//!
//! The task domain models owner-scoped tasks, their validated fields, and the
//! calendar rules behind recurring tasks, keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod task;
mod trigger;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use fields::{
    Recurrence, TaskDescription, TaskName, TaskPriority, TaskStatus, parse_scheduled_at,
};
pub use ids::{OwnerId, TaskId, TriggerId};
pub use task::{PersistedTaskData, Task, TaskPage, TaskPatch, TaskTemplate, stamp};
pub use trigger::{
    DayMatcher, MONTHLY_FIRE_DAYS, TriggerRegistration, TriggerRule, WEEKLY_FIRE_DAYS,
};
