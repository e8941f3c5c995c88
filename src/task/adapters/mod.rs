//! Adapter implementations of the task ports.
//!
//! - [`memory`]: in-memory repository and recording scheduler
//! - [`postgres`]: Diesel-backed repository
//! - [`runtime`]: Tokio timer-driven recurrence scheduler

pub mod memory;
pub mod postgres;
pub mod runtime;
