//! Storage contract for positioned sibling groups.
//!
//! The planner computes write sets; a [`PositionStore`] applies them. The
//! contract is deliberately narrow (load the rows of one group, commit a
//! batch of group changes atomically) so that a SQL table, a KV store, or
//! the bundled [`MemoryStore`] can all sit behind it.
//!
//! A commit batch covers every group an operation touched (one for a
//! reorder, two for a cross-group transfer) and must land as a unit:
//! either all groups take their writes and removals, or none do.

pub mod memory;

use crate::error::ErrorCode;
use crate::model::{GroupScope, ItemId};
use crate::order::{DensityViolation, Member, WriteSet};

pub use memory::MemoryStore;

// ---------------------------------------------------------------------------
// Commit unit
// ---------------------------------------------------------------------------

/// Everything that changes in one sibling group during a commit.
///
/// `writes` are upserts: an id already in the group takes its new position,
/// an unknown id becomes a new row. `removals` delete rows outright and are
/// applied before the writes, so a transfer can remove from one group and
/// upsert into another in the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCommit {
    pub scope: GroupScope,
    pub writes: WriteSet,
    pub removals: Vec<ItemId>,
}

impl GroupCommit {
    #[must_use]
    pub const fn new(scope: GroupScope, writes: WriteSet, removals: Vec<ItemId>) -> Self {
        Self {
            scope,
            writes,
            removals,
        }
    }

    /// A commit that only rewrites positions, removing nothing.
    #[must_use]
    pub const fn writes_only(scope: GroupScope, writes: WriteSet) -> Self {
        Self {
            scope,
            writes,
            removals: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a store refused or failed an operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A removal named an id with no row in the group.
    #[error("cannot remove '{id}': no such row in {scope}")]
    RemoveMissing { scope: GroupScope, id: ItemId },

    /// Applying the batch would leave a group's positions non-dense.
    ///
    /// Raised before anything is written; the batch as planned is wrong
    /// (usually a stale snapshot) and the caller should reload and replan.
    #[error("commit would leave {scope} non-dense: {violation}")]
    WouldBreakDensity {
        scope: GroupScope,
        violation: DensityViolation,
    },

    /// The backing storage itself failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RemoveMissing { .. } => ErrorCode::CommitRemoveMissing,
            Self::WouldBreakDensity { .. } => ErrorCode::CommitWouldBreakDensity,
            Self::Backend(_) => ErrorCode::StorageBackendFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Persistence for positioned sibling groups.
///
/// Implementations must make [`commit`](Self::commit) atomic across the
/// whole batch and must reject batches that would leave any touched group
/// with gapped or duplicated positions. Concurrency control is the
/// caller's: serialize load → plan → commit per scope.
pub trait PositionStore {
    /// All rows of one sibling group, in no particular order.
    ///
    /// A scope with no rows is an empty group, not an error.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if the underlying storage fails.
    fn load(&self, scope: &GroupScope) -> Result<Vec<Member>, StoreError>;

    /// Apply a batch of group changes as one atomic unit.
    ///
    /// # Errors
    ///
    /// [`StoreError::RemoveMissing`] or [`StoreError::WouldBreakDensity`]
    /// reject the batch with nothing applied; [`StoreError::Backend`]
    /// reports a storage failure.
    fn commit(&mut self, commits: &[GroupCommit]) -> Result<(), StoreError>;
}
