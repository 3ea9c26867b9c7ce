//! Verified sibling-group snapshots.
//!
//! # Overview
//!
//! Position planning is only sound over a group whose positions are *dense*:
//! exactly `{0, 1, ..., n-1}`, no gaps, no duplicates. [`GroupSnapshot`]
//! makes that a construction-time guarantee: planners receive a snapshot
//! and may assume density instead of re-checking it per operation.
//!
//! Raw rows loaded from a store are not always that clean (imports, partial
//! writes from pre-engine code paths). [`audit`] reports every violation in
//! a raw member list without refusing to look at it; repair is the planner's
//! `rebalance` operation.
//!
//! # Ordering
//!
//! A valid snapshot is held sorted by position, so the member at index `i`
//! has position `i`. Lookups lean on that instead of a side map.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::model::{GroupScope, ItemId};

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// One positioned row of a sibling group, as loaded from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ItemId,
    /// Zero-based rank within the sibling group.
    pub position: usize,
}

impl Member {
    /// Convenience constructor for callers assembling snapshots.
    #[must_use]
    pub const fn new(id: ItemId, position: usize) -> Self {
        Self { id, position }
    }
}

// ---------------------------------------------------------------------------
// Density violations
// ---------------------------------------------------------------------------

/// A way in which a raw member list fails the dense-positions contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DensityViolation {
    /// The same id appears on more than one row.
    #[error("duplicate member id '{id}' in sibling group")]
    DuplicateId { id: ItemId },

    /// Two members claim the same position.
    #[error("position {position} held by both '{first}' and '{second}'")]
    DuplicatePosition {
        position: usize,
        first: ItemId,
        second: ItemId,
    },

    /// Positions jump over a value (e.g. `0, 1, 3`).
    #[error("position gap: expected {expected}, found {found} ('{id}')")]
    Gap {
        expected: usize,
        found: usize,
        id: ItemId,
    },
}

impl DensityViolation {
    /// Machine-readable code for this violation.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateId { .. } | Self::DuplicatePosition { .. } | Self::Gap { .. } => {
                ErrorCode::GroupNotDense
            }
        }
    }
}

/// Report every density violation in a raw member list.
///
/// Members are examined in `(position, id)` order. The report is best-effort
/// diagnostics for operators: once positions are broken, later entries are
/// judged against the positions that *should* have followed, so one root
/// cause can surface as several entries.
#[must_use]
pub fn audit(members: &[Member]) -> Vec<DensityViolation> {
    let mut violations = Vec::new();

    let mut seen_ids: Vec<&ItemId> = members.iter().map(|m| &m.id).collect();
    seen_ids.sort_unstable();
    for pair in seen_ids.windows(2) {
        if pair[0] == pair[1] {
            // Report each duplicated id once, not once per extra row.
            if violations.iter().any(|v| {
                matches!(v, DensityViolation::DuplicateId { id } if id == pair[0])
            }) {
                continue;
            }
            violations.push(DensityViolation::DuplicateId {
                id: pair[0].clone(),
            });
        }
    }

    let mut sorted: Vec<&Member> = members.iter().collect();
    sorted.sort_unstable_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));

    let mut expected = 0usize;
    let mut prev: Option<&Member> = None;
    for member in sorted {
        if let Some(p) = prev {
            if p.position == member.position {
                violations.push(DensityViolation::DuplicatePosition {
                    position: member.position,
                    first: p.id.clone(),
                    second: member.id.clone(),
                });
                prev = Some(member);
                continue;
            }
        }
        if member.position > expected {
            violations.push(DensityViolation::Gap {
                expected,
                found: member.position,
                id: member.id.clone(),
            });
        }
        expected = member.position + 1;
        prev = Some(member);
    }

    violations
}

// ---------------------------------------------------------------------------
// GroupSnapshot
// ---------------------------------------------------------------------------

/// A density-verified, position-sorted view of one sibling group.
///
/// Constructing a snapshot is where the dense-positions invariant is
/// enforced; everything downstream (planning, write-set computation) relies
/// on it. The snapshot never outlives one load → plan → commit round trip;
/// after a commit it is stale by definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSnapshot {
    scope: GroupScope,
    /// Sorted by position; `members[i].position == i`.
    members: Vec<Member>,
}

impl GroupSnapshot {
    /// Build a snapshot from raw rows, verifying density.
    ///
    /// Rows may arrive in any order; they are sorted by position here.
    ///
    /// # Errors
    ///
    /// Returns the first [`DensityViolation`] found. Use [`audit`] for the
    /// full report and the planner's rebalance operation for repair.
    pub fn new(scope: GroupScope, mut members: Vec<Member>) -> Result<Self, DensityViolation> {
        members.sort_unstable_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));

        // Duplicate slots first, so `0, 1, 1` reads as a duplicate rather
        // than as a gap at index 2.
        for pair in members.windows(2) {
            if pair[0].position == pair[1].position {
                return Err(DensityViolation::DuplicatePosition {
                    position: pair[0].position,
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
        }

        for (index, member) in members.iter().enumerate() {
            if member.position != index {
                return Err(DensityViolation::Gap {
                    expected: index,
                    found: member.position,
                    id: member.id.clone(),
                });
            }
        }

        let mut ids: Vec<&ItemId> = members.iter().map(|m| &m.id).collect();
        ids.sort_unstable();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                return Err(DensityViolation::DuplicateId {
                    id: pair[0].clone(),
                });
            }
        }

        Ok(Self { scope, members })
    }

    /// An empty group (trivially dense).
    #[must_use]
    pub const fn empty(scope: GroupScope) -> Self {
        Self {
            scope,
            members: Vec::new(),
        }
    }

    /// The sibling-group key this snapshot was loaded for.
    #[must_use]
    pub const fn scope(&self) -> &GroupScope {
        &self.scope
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in position order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The position held by `id`, if it is a member.
    #[must_use]
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.members
            .iter()
            .find(|m| &m.id == id)
            .map(|m| m.position)
    }

    /// Whether `id` is a member of this group.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.position_of(id).is_some()
    }

    /// Member ids in position order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.members.iter().map(|m| &m.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
