//! Shared fixtures for in-memory task lifecycle integration tests.

use std::sync::Arc;

use crate::test_helpers::{TestClock, utc};
use rstest::fixture;
use taskmill::task::{
    adapters::memory::{InMemoryRecurrenceScheduler, InMemoryTaskRepository},
    services::{RecurringTaskSpawner, TaskLifecycleService},
};

/// Service type wired to in-memory adapters.
pub type InMemoryService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryRecurrenceScheduler, TestClock>;

/// Service plus handles on every adapter it was built from.
pub struct TaskHarness {
    pub service: InMemoryService,
    pub repository: Arc<InMemoryTaskRepository>,
    pub scheduler: Arc<InMemoryRecurrenceScheduler>,
    pub spawner: RecurringTaskSpawner<InMemoryTaskRepository, TestClock>,
    pub clock: Arc<TestClock>,
}

impl TaskHarness {
    /// Fires every registered trigger once and returns how many fired.
    ///
    /// # Errors
    ///
    /// Returns an error when the scheduler state cannot be read.
    pub async fn fire_triggers(&self) -> Result<usize, eyre::Report> {
        Ok(self.scheduler.fire_all(&self.spawner).await?)
    }
}

/// Provides a harness whose clock starts at 2024-03-15 09:00 UTC.
#[fixture]
pub fn harness() -> TaskHarness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let scheduler = Arc::new(InMemoryRecurrenceScheduler::new());
    let clock = Arc::new(TestClock::at(utc(2024, 3, 15, 9, 0)));
    let service = TaskLifecycleService::new(
        Arc::clone(&repository),
        Arc::clone(&scheduler),
        Arc::clone(&clock),
    );
    let spawner = RecurringTaskSpawner::new(Arc::clone(&repository), Arc::clone(&clock));
    TaskHarness {
        service,
        repository,
        scheduler,
        spawner,
        clock,
    }
}
