//! In-memory adapters for tests and local runs.

mod scheduler;
mod task;

pub use scheduler::InMemoryRecurrenceScheduler;
pub use task::InMemoryTaskRepository;
