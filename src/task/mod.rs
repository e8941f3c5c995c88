//! Task lifecycle management for Taskmill.
//!
//! Owners create, update, list, and delete tasks; recurring tasks register a
//! calendar trigger that materializes fresh `Pending` copies; and a periodic
//! sweep cancels `Pending` tasks whose scheduled time has passed. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
