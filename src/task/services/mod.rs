//! Application services for task lifecycle orchestration.

mod config;
mod lifecycle;
mod recurrence;
mod sweep;

pub use config::{SweepConfig, TaskLifecycleConfig};
pub use lifecycle::{
    CreateTaskRequest, SweepFailure, SweepReport, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, UpdateTaskRequest,
};
pub use recurrence::RecurringTaskSpawner;
pub use sweep::OverdueSweepLoop;
