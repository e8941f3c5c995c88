//! Validated scalar fields carried by a task.

use super::{ParseTaskStatusError, TaskDomainError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable task name, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Maximum name length in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the trimmed value is
    /// empty or [`TaskDomainError::TaskNameTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TaskDomainError::TaskNameTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free-text description, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Maximum description length in characters.
    pub const MAX_LENGTH: usize = 500;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when the value exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task status.
///
/// The stored model does not constrain transitions; the overdue sweep is the
/// only system-driven writer and only moves `Pending` to `Cancelled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    Completed,
    /// Cancelled by the owner or by the overdue sweep.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(TaskDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Repeats every day.
    Daily,
    /// Repeats on a fixed set of weekdays.
    Weekly,
    /// Repeats on a fixed range of month days.
    Monthly,
}

impl Recurrence {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Matches the leading keyword of a free-form recurrence string.
    ///
    /// Only the first whitespace-separated token is inspected, so
    /// `"weekly standup"` yields [`Recurrence::Weekly`]. Returns `None` for
    /// unknown keywords.
    #[must_use]
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.split_whitespace().next()? {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Recurrence {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_keyword(value).ok_or_else(|| TaskDomainError::InvalidRecurrence(value.to_owned()))
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the scheduled date-time of a task.
///
/// Accepts a calendar date (`2024-03-15`, read as midnight UTC), an RFC 3339
/// date-time, or a naive date-time (`2024-03-15T09:30[:00]`, read as UTC).
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidScheduledAt`] for any other input.
pub fn parse_scheduled_at(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.with_timezone(&Utc).trunc_subsecs(6));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidScheduledAt(value.to_owned()))
}
