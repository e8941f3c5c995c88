//! Step definitions for task scheduling behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
