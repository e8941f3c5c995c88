//! Shared world state for task scheduling BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crate::test_helpers::{TestClock, utc};
use rstest::fixture;
use taskmill::task::{
    adapters::memory::{InMemoryRecurrenceScheduler, InMemoryTaskRepository},
    domain::{OwnerId, TaskId},
    services::{RecurringTaskSpawner, SweepReport, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryRecurrenceScheduler, TestClock>;

/// Scenario world for scheduling behaviour tests.
pub struct TaskSchedulingWorld {
    pub service: TestTaskService,
    pub scheduler: Arc<InMemoryRecurrenceScheduler>,
    pub spawner: RecurringTaskSpawner<InMemoryTaskRepository, TestClock>,
    pub clock: Arc<TestClock>,
    pub owner: OwnerId,
    pub tasks_by_name: HashMap<String, TaskId>,
    pub last_report: Option<SweepReport>,
}

impl TaskSchedulingWorld {
    /// Creates a world for one owner with an empty store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let scheduler = Arc::new(InMemoryRecurrenceScheduler::new());
        let clock = Arc::new(TestClock::at(utc(2024, 1, 1, 0, 0)));
        let service = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&scheduler),
            Arc::clone(&clock),
        );
        let spawner = RecurringTaskSpawner::new(repository, Arc::clone(&clock));

        Self {
            service,
            scheduler,
            spawner,
            clock,
            owner: OwnerId::new(),
            tasks_by_name: HashMap::new(),
            last_report: None,
        }
    }

    /// Looks up a task created by name in this scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created under `name`.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {name:?} in scenario world"))
    }
}

impl Default for TaskSchedulingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskSchedulingWorld {
    TaskSchedulingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
