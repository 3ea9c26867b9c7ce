use std::fmt;

/// Machine-readable error codes for host services and API layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidItemId,
    InvalidEnumValue,
    PositionOutOfRange,
    UnknownMember,
    DuplicateMember,
    ReindexMismatch,
    GroupNotDense,
    SelfDependency,
    DuplicateDependency,
    CycleDetected,
    CommitRemoveMissing,
    CommitWouldBreakDensity,
    StorageBackendFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidItemId => "E1002",
            Self::InvalidEnumValue => "E1003",
            Self::PositionOutOfRange => "E2001",
            Self::UnknownMember => "E2002",
            Self::DuplicateMember => "E2003",
            Self::ReindexMismatch => "E2004",
            Self::GroupNotDense => "E2005",
            Self::SelfDependency => "E3001",
            Self::DuplicateDependency => "E3002",
            Self::CycleDetected => "E3003",
            Self::CommitRemoveMissing => "E5001",
            Self::CommitWouldBreakDensity => "E5002",
            Self::StorageBackendFailed => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and API error bodies.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidItemId => "Empty or blank item id",
            Self::InvalidEnumValue => "Invalid status or dependency kind value",
            Self::PositionOutOfRange => "Position target out of range",
            Self::UnknownMember => "Item is not in the sibling group",
            Self::DuplicateMember => "Item is already in the sibling group",
            Self::ReindexMismatch => "Reindex list does not match the group",
            Self::GroupNotDense => "Sibling group positions are not dense",
            Self::SelfDependency => "Task cannot depend on itself",
            Self::DuplicateDependency => "Dependency already exists",
            Self::CycleDetected => "Cycle would be created",
            Self::CommitRemoveMissing => "Commit removal names a missing row",
            Self::CommitWouldBreakDensity => "Commit would break dense positions",
            Self::StorageBackendFailed => "Storage backend failure",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the engine config TOML and retry."),
            Self::InvalidItemId => Some("Supply a non-empty id."),
            Self::InvalidEnumValue => Some("Use one of the documented status/kind values."),
            Self::PositionOutOfRange => {
                Some("Pass a target within the group, or enable clamping.")
            }
            Self::UnknownMember => {
                Some("Reload the group; the item may have been moved or deleted.")
            }
            Self::DuplicateMember => None,
            Self::ReindexMismatch => Some("Name every member of the group exactly once."),
            Self::GroupNotDense => Some("Run a rebalance to repair the group's positions."),
            Self::SelfDependency => None,
            Self::DuplicateDependency => None,
            Self::CycleDetected => {
                Some("Remove/adjust dependency links to keep the graph acyclic.")
            }
            Self::CommitRemoveMissing => {
                Some("Reload and replan; the row changed under the snapshot.")
            }
            Self::CommitWouldBreakDensity => Some("Reload and replan from a fresh snapshot."),
            Self::StorageBackendFailed => Some("Check the backing store's connectivity and logs."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
