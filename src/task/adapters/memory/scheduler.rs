//! In-memory recurrence scheduler for deterministic tests.

use crate::task::{
    domain::{TriggerId, TriggerRegistration},
    ports::{RecurrenceScheduler, RecurrenceSchedulerError, RecurrenceSchedulerResult, TriggerHandler},
};
use std::sync::{Arc, RwLock};

/// Recurrence scheduler that records registrations without running timers.
///
/// Tests inspect what was registered and fire triggers on demand with
/// [`Self::fire_all`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecurrenceScheduler {
    registrations: Arc<RwLock<Vec<(TriggerId, TriggerRegistration)>>>,
}

impl InMemoryRecurrenceScheduler {
    /// Creates a scheduler with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every registration, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceSchedulerError::Runtime`] when the lock is
    /// poisoned.
    pub fn registrations(&self) -> RecurrenceSchedulerResult<Vec<(TriggerId, TriggerRegistration)>> {
        let registrations = self.registrations.read().map_err(lock_error)?;
        Ok(registrations.clone())
    }

    /// Fires every registered trigger once, in registration order.
    ///
    /// Returns how many triggers fired.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceSchedulerError::Runtime`] when the lock is
    /// poisoned.
    pub async fn fire_all(&self, handler: &dyn TriggerHandler) -> RecurrenceSchedulerResult<usize> {
        let snapshot = self.registrations()?;
        for (_, registration) in &snapshot {
            handler.on_fire(registration).await;
        }
        Ok(snapshot.len())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> RecurrenceSchedulerError {
    RecurrenceSchedulerError::runtime(std::io::Error::other(err.to_string()))
}

impl RecurrenceScheduler for InMemoryRecurrenceScheduler {
    fn register(&self, registration: TriggerRegistration) -> RecurrenceSchedulerResult<TriggerId> {
        let mut registrations = self.registrations.write().map_err(lock_error)?;
        let trigger_id = TriggerId::new();
        registrations.push((trigger_id, registration));
        Ok(trigger_id)
    }
}
