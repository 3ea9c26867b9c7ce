//! Task lifecycle states, as consumed by blocking derivation.
//!
//! The status state machine (who may move a task from `todo` to
//! `in_progress`, whether `done` can reopen, ...) is owned by the task
//! service. This crate only *reads* statuses: blocking rules care about two
//! projections of the lifecycle, has the task started and has it finished.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of task lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Whether work on the task has begun (anything past `todo`).
    #[must_use]
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::Todo)
    }

    /// Whether the task has finished.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Error returned when parsing a status from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task status: '{0}'")]
pub struct ParseStatusError(String);

impl ParseStatusError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> crate::error::ErrorCode {
        crate::error::ErrorCode::InvalidEnumValue
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
