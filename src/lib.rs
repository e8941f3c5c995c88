//! Taskmill: owner-scoped task lifecycle and scheduling.
//!
//! This crate stores tasks for their owners, materializes fresh tasks when a
//! recurring trigger fires, and periodically cancels pending tasks whose
//! scheduled time has passed.
//!
//! # Architecture
//!
//! Taskmill follows hexagonal architecture principles:
//!
//! - **Domain**: Validated task fields, the task aggregate, and trigger rules
//! - **Ports**: Repository and recurrence scheduler traits
//! - **Services**: Task CRUD, recurring task spawning, and the overdue sweep
//! - **Adapters**: In-memory, `PostgreSQL`, and Tokio timer implementations
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, recurrence, and overdue handling

pub mod task;
