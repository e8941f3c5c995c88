//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod scheduler;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use scheduler::{
    RecurrenceScheduler, RecurrenceSchedulerError, RecurrenceSchedulerResult, TriggerHandler,
};
