//! Ports for registering and firing recurring task triggers.

use crate::task::domain::{TriggerId, TriggerRegistration};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for recurrence scheduler operations.
pub type RecurrenceSchedulerResult<T> = Result<T, RecurrenceSchedulerError>;

/// Registers recurring triggers.
///
/// Registered triggers stay active for the lifetime of the process. There is
/// no way to cancel one, and nothing survives a restart.
pub trait RecurrenceScheduler: Send + Sync {
    /// Registers a trigger and starts firing it according to its rule.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceSchedulerError::Runtime`] when the scheduler cannot
    /// accept the registration.
    fn register(&self, registration: TriggerRegistration) -> RecurrenceSchedulerResult<TriggerId>;
}

/// Side effect run each time a trigger fires.
#[async_trait]
pub trait TriggerHandler: Send + Sync {
    /// Handles one firing of `registration`.
    ///
    /// Firings are independent; a handler reports its own failures rather
    /// than returning them to the scheduler.
    async fn on_fire(&self, registration: &TriggerRegistration);
}

/// Errors returned by recurrence scheduler implementations.
#[derive(Debug, Clone, Error)]
pub enum RecurrenceSchedulerError {
    /// The scheduling runtime rejected the registration.
    #[error("scheduler runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecurrenceSchedulerError {
    /// Wraps a runtime error.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
