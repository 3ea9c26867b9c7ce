//! Position planning over verified group snapshots.
//!
//! # Overview
//!
//! [`Positioner`] turns an intent ("move task B to slot 2") into the
//! minimal set of position updates that keeps the group dense. It never
//! touches storage: callers load a [`GroupSnapshot`], plan against it, and
//! hand the resulting [`WriteSet`] to a store for atomic application.
//!
//! Every operation shifts only the half-open range of members that actually
//! sits between the old and new slots, so a move of one member writes at
//! most `|new - old| + 1` rows, not the whole group.
//!
//! # Write sets
//!
//! A [`WriteSet`] lists shifted members in ascending original position,
//! with the moved or inserted member's write last. The order is stable so
//! that commits, logs, and tests all see the same bytes for the same plan.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::PositionConfig;
use crate::error::ErrorCode;
use crate::model::{GroupScope, ItemId};
use crate::order::snapshot::{DensityViolation, GroupSnapshot, Member};

// ---------------------------------------------------------------------------
// Write sets
// ---------------------------------------------------------------------------

/// One pending position update: `id` takes `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionWrite {
    pub id: ItemId,
    pub position: usize,
}

impl PositionWrite {
    #[must_use]
    pub const fn new(id: ItemId, position: usize) -> Self {
        Self { id, position }
    }
}

/// An ordered batch of position updates produced by one planning call.
///
/// Empty write sets are legal and mean "nothing to do" (for example a move
/// to the position the member already holds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteSet {
    writes: Vec<PositionWrite>,
}

impl WriteSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { writes: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Updates in application order.
    #[must_use]
    pub fn writes(&self) -> &[PositionWrite] {
        &self.writes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PositionWrite> {
        self.writes.iter()
    }

    fn push(&mut self, id: ItemId, position: usize) {
        self.writes.push(PositionWrite::new(id, position));
    }
}

impl From<Vec<PositionWrite>> for WriteSet {
    fn from(writes: Vec<PositionWrite>) -> Self {
        Self { writes }
    }
}

impl IntoIterator for WriteSet {
    type Item = PositionWrite;
    type IntoIter = std::vec::IntoIter<PositionWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

impl<'a> IntoIterator for &'a WriteSet {
    type Item = &'a PositionWrite;
    type IntoIter = std::slice::Iter<'a, PositionWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.iter()
    }
}

/// The two write sets produced by moving a member across groups.
///
/// The member's own write (its slot in the destination) is the last entry
/// of `dest`; `source` only closes the hole it left behind. The caller is
/// responsible for updating the row's group membership alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub source: WriteSet,
    pub dest: WriteSet,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a planning call was refused.
///
/// Out-of-range targets are only reported when clamping is disabled in
/// [`PositionConfig`]; the structural errors below always fail hard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Requested slot is beyond the largest valid target for the operation.
    #[error("position {requested} is out of range (largest valid target is {max})")]
    OutOfRange { requested: usize, max: usize },

    /// The named id is not in the group the operation targets.
    #[error("'{id}' is not a member of {scope}")]
    UnknownMember { scope: GroupScope, id: ItemId },

    /// The named id is already in the group it would be added to.
    #[error("'{id}' is already a member of {scope}")]
    DuplicateMember { scope: GroupScope, id: ItemId },

    /// A reindex list had the wrong number of entries.
    #[error("reindex list has {got} ids but the group has {expected} members")]
    ReindexLength { expected: usize, got: usize },

    /// A reindex list named the same id twice.
    #[error("reindex list contains '{id}' more than once")]
    ReindexDuplicate { id: ItemId },

    /// A reindex list named an id outside the group.
    #[error("reindex list names '{id}', which is not in the group")]
    ReindexUnknown { id: ItemId },
}

impl PositionError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::OutOfRange { .. } => ErrorCode::PositionOutOfRange,
            Self::UnknownMember { .. } => ErrorCode::UnknownMember,
            Self::DuplicateMember { .. } => ErrorCode::DuplicateMember,
            Self::ReindexLength { .. }
            | Self::ReindexDuplicate { .. }
            | Self::ReindexUnknown { .. } => ErrorCode::ReindexMismatch,
        }
    }
}

// ---------------------------------------------------------------------------
// Positioner
// ---------------------------------------------------------------------------

/// Stateless planner for dense sibling-group positions.
///
/// Cheap to construct and freely shareable; all state lives in the
/// snapshots passed to each call.
#[derive(Debug, Clone, Default)]
pub struct Positioner {
    config: PositionConfig,
}

impl Positioner {
    #[must_use]
    pub const fn new(config: PositionConfig) -> Self {
        Self { config }
    }

    /// Plan appending `id` after the current last member.
    ///
    /// Never shifts anyone; the new member takes position `len`.
    ///
    /// # Errors
    ///
    /// [`PositionError::DuplicateMember`] if `id` is already in the group.
    pub fn append(
        &self,
        group: &GroupSnapshot,
        id: &ItemId,
    ) -> Result<PositionWrite, PositionError> {
        if group.contains(id) {
            return Err(PositionError::DuplicateMember {
                scope: group.scope().clone(),
                id: id.clone(),
            });
        }
        Ok(PositionWrite::new(id.clone(), group.len()))
    }

    /// Plan inserting `id` at `target`, shifting later members down the
    /// list by one.
    ///
    /// Valid targets are `0..=len`; `len` means append. Out-of-range
    /// targets clamp to `len` unless clamping is disabled.
    ///
    /// # Errors
    ///
    /// [`PositionError::DuplicateMember`] if `id` is already in the group,
    /// [`PositionError::OutOfRange`] if `target > len` and clamping is off.
    pub fn insert_at(
        &self,
        group: &GroupSnapshot,
        id: &ItemId,
        target: usize,
    ) -> Result<WriteSet, PositionError> {
        if group.contains(id) {
            return Err(PositionError::DuplicateMember {
                scope: group.scope().clone(),
                id: id.clone(),
            });
        }
        let target = self.resolve_target(group.scope(), target, group.len())?;

        let mut writes = WriteSet::new();
        for member in &group.members()[target..] {
            writes.push(member.id.clone(), member.position + 1);
        }
        writes.push(id.clone(), target);
        Ok(writes)
    }

    /// Plan moving an existing member to `target` within its group.
    ///
    /// Only the members strictly between the old and new slots shift:
    /// moving later pulls `(old, target]` back by one, moving earlier
    /// pushes `[target, old)` forward by one. Moving to the current slot
    /// is a no-op and yields an empty write set.
    ///
    /// Valid targets are `0..=len - 1`; out-of-range targets clamp to the
    /// last slot unless clamping is disabled.
    ///
    /// # Errors
    ///
    /// [`PositionError::UnknownMember`] if `id` is not in the group,
    /// [`PositionError::OutOfRange`] if `target >= len` and clamping is off.
    #[instrument(level = "debug", skip_all, fields(scope = %group.scope(), id = %id, target))]
    pub fn move_to(
        &self,
        group: &GroupSnapshot,
        id: &ItemId,
        target: usize,
    ) -> Result<WriteSet, PositionError> {
        let old = group
            .position_of(id)
            .ok_or_else(|| PositionError::UnknownMember {
                scope: group.scope().clone(),
                id: id.clone(),
            })?;
        let target = self.resolve_target(group.scope(), target, group.len() - 1)?;

        let mut writes = WriteSet::new();
        if target == old {
            return Ok(writes);
        }
        if target > old {
            // Members in (old, target] each step one slot earlier.
            for member in &group.members()[old + 1..=target] {
                writes.push(member.id.clone(), member.position - 1);
            }
        } else {
            // Members in [target, old) each step one slot later.
            for member in &group.members()[target..old] {
                writes.push(member.id.clone(), member.position + 1);
            }
        }
        writes.push(id.clone(), target);
        Ok(writes)
    }

    /// Plan removing a member, closing the gap it leaves.
    ///
    /// The write set holds only the members that slide back by one; the
    /// removal of the member's own row is the caller's to record (see
    /// `GroupCommit::removals`).
    ///
    /// # Errors
    ///
    /// [`PositionError::UnknownMember`] if `id` is not in the group.
    pub fn remove(&self, group: &GroupSnapshot, id: &ItemId) -> Result<WriteSet, PositionError> {
        let old = group
            .position_of(id)
            .ok_or_else(|| PositionError::UnknownMember {
                scope: group.scope().clone(),
                id: id.clone(),
            })?;

        let mut writes = WriteSet::new();
        for member in &group.members()[old + 1..] {
            writes.push(member.id.clone(), member.position - 1);
        }
        Ok(writes)
    }

    /// Plan rewriting the whole group to match a caller-supplied order.
    ///
    /// `ordered` must be exactly the group's members, each named once.
    /// Members already in their target slot are skipped, so a reindex to
    /// the current order yields an empty write set.
    ///
    /// # Errors
    ///
    /// [`PositionError::ReindexLength`], [`PositionError::ReindexUnknown`],
    /// or [`PositionError::ReindexDuplicate`] when `ordered` is not a
    /// permutation of the group.
    pub fn reindex(
        &self,
        group: &GroupSnapshot,
        ordered: &[ItemId],
    ) -> Result<WriteSet, PositionError> {
        if ordered.len() != group.len() {
            return Err(PositionError::ReindexLength {
                expected: group.len(),
                got: ordered.len(),
            });
        }
        let mut seen: HashSet<&ItemId> = HashSet::with_capacity(ordered.len());
        for id in ordered {
            if !group.contains(id) {
                return Err(PositionError::ReindexUnknown { id: id.clone() });
            }
            if !seen.insert(id) {
                return Err(PositionError::ReindexDuplicate { id: id.clone() });
            }
        }

        let mut writes = WriteSet::new();
        for (index, id) in ordered.iter().enumerate() {
            if group.position_of(id) != Some(index) {
                writes.push(id.clone(), index);
            }
        }
        Ok(writes)
    }

    /// Plan moving a member out of one group and into another.
    ///
    /// Equivalent to a remove from `source` plus an insert into `dest`,
    /// validated together so a half-planned transfer cannot exist. Both
    /// write sets must be committed in the same transaction.
    ///
    /// # Errors
    ///
    /// [`PositionError::UnknownMember`] if `id` is not in `source`,
    /// [`PositionError::DuplicateMember`] if it is already in `dest`, and
    /// [`PositionError::OutOfRange`] per [`Self::insert_at`] on the
    /// destination target.
    #[instrument(
        level = "debug",
        skip_all,
        fields(from = %source.scope(), to = %dest.scope(), id = %id, target)
    )]
    pub fn transfer(
        &self,
        source: &GroupSnapshot,
        dest: &GroupSnapshot,
        id: &ItemId,
        target: usize,
    ) -> Result<TransferPlan, PositionError> {
        let source_writes = self.remove(source, id)?;
        let dest_writes = self.insert_at(dest, id, target)?;
        Ok(TransferPlan {
            source: source_writes,
            dest: dest_writes,
        })
    }

    /// Plan the writes that make a broken group dense again.
    ///
    /// Members are ranked by `(position, id)` and renumbered `0..n`; ties
    /// and gaps collapse in that order. Only members whose position
    /// actually changes are written. Dense input yields an empty write set.
    ///
    /// Works on raw rows rather than a [`GroupSnapshot`] precisely because
    /// the input is expected to violate density.
    ///
    /// # Errors
    ///
    /// [`DensityViolation::DuplicateId`] when the same id appears on more
    /// than one row; renumbering cannot repair identity.
    pub fn rebalance(&self, members: &[Member]) -> Result<WriteSet, DensityViolation> {
        let mut ids: Vec<&ItemId> = members.iter().map(|m| &m.id).collect();
        ids.sort_unstable();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                return Err(DensityViolation::DuplicateId {
                    id: pair[0].clone(),
                });
            }
        }

        let mut ranked: Vec<&Member> = members.iter().collect();
        ranked.sort_unstable_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));

        let mut writes = WriteSet::new();
        for (index, member) in ranked.iter().enumerate() {
            if member.position != index {
                writes.push(member.id.clone(), index);
            }
        }
        Ok(writes)
    }

    fn resolve_target(
        &self,
        scope: &GroupScope,
        requested: usize,
        max: usize,
    ) -> Result<usize, PositionError> {
        if requested <= max {
            return Ok(requested);
        }
        if self.config.clamp_out_of_range {
            debug!(scope = %scope, requested, max, "clamped out-of-range position target");
            return Ok(max);
        }
        Err(PositionError::OutOfRange { requested, max })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
