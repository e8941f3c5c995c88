//! Tokio-backed recurrence scheduler.

use crate::task::{
    domain::{TriggerId, TriggerRegistration},
    ports::{RecurrenceScheduler, RecurrenceSchedulerError, RecurrenceSchedulerResult, TriggerHandler},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Recurrence scheduler that runs one Tokio task per registered trigger.
///
/// Each task sleeps until the rule's next firing, hands the registration to
/// the [`TriggerHandler`], and repeats until the process exits. Triggers
/// live only in memory.
pub struct TokioRecurrenceScheduler<C>
where
    C: Clock + Send + Sync + 'static,
{
    handler: Arc<dyn TriggerHandler>,
    clock: Arc<C>,
    active: Arc<RwLock<HashMap<TriggerId, JoinHandle<()>>>>,
}

impl<C> TokioRecurrenceScheduler<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler that fires into `handler`.
    #[must_use]
    pub fn new(handler: Arc<dyn TriggerHandler>, clock: Arc<C>) -> Self {
        Self {
            handler,
            clock,
            active: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the identifiers of triggers whose timer task is still alive.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceSchedulerError::Runtime`] when the lock is
    /// poisoned.
    pub fn active_triggers(&self) -> RecurrenceSchedulerResult<Vec<TriggerId>> {
        let active = self.active.read().map_err(lock_error)?;
        Ok(active
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(trigger_id, _)| *trigger_id)
            .collect())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> RecurrenceSchedulerError {
    RecurrenceSchedulerError::runtime(std::io::Error::other(err.to_string()))
}

impl<C> RecurrenceScheduler for TokioRecurrenceScheduler<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn register(&self, registration: TriggerRegistration) -> RecurrenceSchedulerResult<TriggerId> {
        let runtime = Handle::try_current().map_err(RecurrenceSchedulerError::runtime)?;
        let mut active = self.active.write().map_err(lock_error)?;
        let trigger_id = TriggerId::new();
        let handle = runtime.spawn(run_trigger(
            trigger_id,
            registration,
            Arc::clone(&self.handler),
            Arc::clone(&self.clock),
        ));
        active.insert(trigger_id, handle);
        Ok(trigger_id)
    }
}

async fn run_trigger<C>(
    trigger_id: TriggerId,
    registration: TriggerRegistration,
    handler: Arc<dyn TriggerHandler>,
    clock: Arc<C>,
) where
    C: Clock + Send + Sync,
{
    let mut cursor = clock.utc();
    while let Some(next_fire) = registration.rule().next_fire_after(cursor) {
        tokio::time::sleep(wait_until(next_fire, clock.utc())).await;
        debug!(trigger_id = %trigger_id, fired_at = %next_fire, "recurring trigger fired");
        handler.on_fire(&registration).await;
        cursor = next_fire;
    }
    warn!(
        trigger_id = %trigger_id,
        rule = ?registration.rule(),
        "recurring trigger has no future firing"
    );
}

/// Time left until `target`, zero when it already passed.
fn wait_until(target: DateTime<Utc>, now: DateTime<Utc>) -> std::time::Duration {
    (target - now).to_std().unwrap_or_default()
}
