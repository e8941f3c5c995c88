//! Configuration for task lifecycle services.

use crate::task::domain::TaskPage;
use std::time::Duration;

/// Behaviour switches for [`super::TaskLifecycleService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLifecycleConfig {
    /// Page size applied when a listing request names none.
    pub default_page_limit: u32,
    /// Whether an unrecognized recurrence keyword fails the request.
    ///
    /// When `false` the keyword is dropped with a warning and the task is
    /// stored as non-recurring.
    pub reject_unknown_recurrence: bool,
}

impl Default for TaskLifecycleConfig {
    fn default() -> Self {
        Self {
            default_page_limit: TaskPage::DEFAULT_LIMIT,
            reject_unknown_recurrence: false,
        }
    }
}

impl TaskLifecycleConfig {
    /// Creates a configuration that rejects unknown recurrence keywords.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            default_page_limit: TaskPage::DEFAULT_LIMIT,
            reject_unknown_recurrence: true,
        }
    }

    /// Sets the default page size. Zero is ignored.
    #[must_use]
    pub const fn with_default_page_limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.default_page_limit = limit;
        }
        self
    }
}

/// Cadence of the overdue sweep loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Time between two sweep runs.
    pub interval: Duration,
}

impl SweepConfig {
    /// Default time between sweeps.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a configuration with the given interval.
    ///
    /// A zero interval falls back to [`Self::DEFAULT_INTERVAL`], since
    /// `tokio::time::interval` rejects it.
    #[must_use]
    pub const fn every(interval: Duration) -> Self {
        if interval.is_zero() {
            return Self::default_const();
        }
        Self { interval }
    }

    const fn default_const() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::default_const()
    }
}
