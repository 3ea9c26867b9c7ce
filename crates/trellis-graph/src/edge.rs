//! Dependency edge rows and the blocking-kind table.
//!
//! An edge `dependent → depends_on` reads "dependent waits on depends_on".
//! The kind decides *what* it waits for: the classic scheduling quartet of
//! finish-to-start and friends. Whether an edge currently blocks is pure
//! lookup over `(kind, status)` and is never stored anywhere.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trellis_core::{ErrorCode, ItemId, TaskStatus};

// ---------------------------------------------------------------------------
// DependencyKind
// ---------------------------------------------------------------------------

/// How a dependent task waits on its depends-on task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Dependent may not start until the depends-on task finishes.
    FinishToStart,
    /// Dependent may not start until the depends-on task starts.
    StartToStart,
    /// Dependent may not finish until the depends-on task finishes.
    FinishToFinish,
    /// Dependent may not finish until the depends-on task starts.
    StartToFinish,
}

impl DependencyKind {
    pub const ALL: [Self; 4] = [
        Self::FinishToStart,
        Self::StartToStart,
        Self::FinishToFinish,
        Self::StartToFinish,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FinishToStart => "finish_to_start",
            Self::StartToStart => "start_to_start",
            Self::FinishToFinish => "finish_to_finish",
            Self::StartToFinish => "start_to_finish",
        }
    }

    /// Whether an edge of this kind blocks while its depends-on task has
    /// `status`.
    ///
    /// Finish-gated kinds block until the depends-on task is done;
    /// start-gated kinds block only until it has started.
    #[must_use]
    pub const fn is_blocking(self, status: TaskStatus) -> bool {
        match self {
            Self::FinishToStart | Self::FinishToFinish => !status.is_done(),
            Self::StartToStart | Self::StartToFinish => !status.is_started(),
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized dependency kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dependency kind '{0}'")]
pub struct ParseKindError(String);

impl ParseKindError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidEnumValue
    }
}

impl FromStr for DependencyKind {
    type Err = ParseKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "finish_to_start" => Ok(Self::FinishToStart),
            "start_to_start" => Ok(Self::StartToStart),
            "finish_to_finish" => Ok(Self::FinishToFinish),
            "start_to_finish" => Ok(Self::StartToFinish),
            _ => Err(ParseKindError(raw.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DependencyEdge
// ---------------------------------------------------------------------------

/// One persisted dependency: `dependent` waits on `depends_on`.
///
/// Identity for graph purposes is the ordered `(dependent, depends_on)`
/// pair; `id` is the storage row key and `kind` an attribute of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub id: ItemId,
    pub dependent: ItemId,
    pub depends_on: ItemId,
    pub kind: DependencyKind,
    pub created_at: DateTime<Utc>,
}

impl DependencyEdge {
    /// A fresh edge stamped with the current time.
    #[must_use]
    pub fn new(id: ItemId, dependent: ItemId, depends_on: ItemId, kind: DependencyKind) -> Self {
        Self {
            id,
            dependent,
            depends_on,
            kind,
            created_at: Utc::now(),
        }
    }

    /// The ordered pair that identifies this edge within a graph.
    #[must_use]
    pub fn endpoints(&self) -> (&ItemId, &ItemId) {
        (&self.dependent, &self.depends_on)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
