//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the maximum length.
    #[error("task name is {length} characters, maximum is {max}")]
    TaskNameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The task description exceeds the maximum length.
    #[error("description is {length} characters, maximum is {max}")]
    DescriptionTooLong {
        /// Length of the rejected description in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The status value is not one of the known spellings.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The priority value is not one of the known spellings.
    #[error("invalid priority '{0}', expected Low, Medium, or High")]
    InvalidPriority(String),

    /// The recurrence keyword is not recognized.
    #[error("invalid recurrence '{0}', expected daily, weekly, or monthly")]
    InvalidRecurrence(String),

    /// The scheduled date-time could not be parsed.
    #[error("invalid date '{0}', expected YYYY-MM-DD or an RFC 3339 date-time")]
    InvalidScheduledAt(String),

    /// Pagination parameters are out of range.
    #[error("invalid page window: page {page}, limit {limit}")]
    InvalidPage {
        /// Requested 1-based page.
        page: u32,
        /// Requested page size.
        limit: u32,
    },
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status '{0}', expected Pending, In Progress, Completed, or Cancelled")]
pub struct ParseTaskStatusError(pub String);
