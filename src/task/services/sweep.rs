//! Periodic driver for the overdue sweep.

use super::{config::SweepConfig, lifecycle::TaskLifecycleService};
use crate::task::ports::{RecurrenceScheduler, TaskRepository};
use mockable::Clock;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

/// Runs [`TaskLifecycleService::mark_overdue_tasks_as_cancelled`] on a fixed
/// cadence.
///
/// The first sweep runs immediately. A slow sweep delays the next tick
/// rather than triggering a burst of catch-up runs. Scan failures are logged
/// and the loop carries on.
pub struct OverdueSweepLoop<R, S, C>
where
    R: TaskRepository,
    S: RecurrenceScheduler,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, S, C>,
    config: SweepConfig,
}

impl<R, S, C> OverdueSweepLoop<R, S, C>
where
    R: TaskRepository + 'static,
    S: RecurrenceScheduler + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a loop around `service`.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, S, C>, config: SweepConfig) -> Self {
        Self { service, config }
    }

    /// Runs one sweep and logs its outcome.
    ///
    /// Returns the number of tasks cancelled, or `None` when the scan failed.
    pub async fn tick(&self) -> Option<usize> {
        match self.service.mark_overdue_tasks_as_cancelled().await {
            Ok(report) if report.is_empty() => {
                debug!("overdue sweep found nothing to cancel");
                Some(0)
            }
            Ok(report) => {
                info!(
                    cancelled = report.cancelled().len(),
                    failed = report.failures().len(),
                    "overdue sweep finished"
                );
                Some(report.cancelled().len())
            }
            Err(err) => {
                error!(error = %err, "overdue sweep failed");
                None
            }
        }
    }

    /// Sweeps forever at the configured interval.
    pub async fn run(self) {
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Spawns [`Self::run`] onto the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
