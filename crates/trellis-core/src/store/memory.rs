//! In-memory [`PositionStore`] backed by per-scope hash maps.
//!
//! Fast, ephemeral, and the reference for what a commit batch must do:
//! stage every touched group, verify density on the staged state, then
//! swap, so a rejected batch leaves the store untouched. Suitable for
//! tests and single-process embedding; wrap it in a lock to share it.

use std::collections::HashMap;

use tracing::trace;

use crate::model::{GroupScope, ItemId};
use crate::order::{audit, Member};
use crate::store::{GroupCommit, PositionStore, StoreError};

/// Ephemeral position storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Position by id, per scope. Density is a commit-time check, not a
    /// structural guarantee of the map.
    groups: HashMap<GroupScope, HashMap<ItemId, usize>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored for `scope`.
    #[must_use]
    pub fn group_len(&self, scope: &GroupScope) -> usize {
        self.groups.get(scope).map_or(0, HashMap::len)
    }

    fn materialize(rows: &HashMap<ItemId, usize>) -> Vec<Member> {
        let mut members: Vec<Member> = rows
            .iter()
            .map(|(id, position)| Member::new(id.clone(), *position))
            .collect();
        members.sort_unstable_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        members
    }
}

impl PositionStore for MemoryStore {
    fn load(&self, scope: &GroupScope) -> Result<Vec<Member>, StoreError> {
        Ok(self
            .groups
            .get(scope)
            .map(Self::materialize)
            .unwrap_or_default())
    }

    fn commit(&mut self, commits: &[GroupCommit]) -> Result<(), StoreError> {
        // Stage changes per scope; two commits naming the same scope stack.
        let mut staged: HashMap<&GroupScope, HashMap<ItemId, usize>> = HashMap::new();

        for commit in commits {
            let rows = staged
                .entry(&commit.scope)
                .or_insert_with(|| self.groups.get(&commit.scope).cloned().unwrap_or_default());

            for id in &commit.removals {
                if rows.remove(id).is_none() {
                    return Err(StoreError::RemoveMissing {
                        scope: commit.scope.clone(),
                        id: id.clone(),
                    });
                }
            }
            for write in &commit.writes {
                rows.insert(write.id.clone(), write.position);
            }
        }

        for (scope, rows) in &staged {
            let members = Self::materialize(rows);
            if let Some(violation) = audit(&members).into_iter().next() {
                return Err(StoreError::WouldBreakDensity {
                    scope: (*scope).clone(),
                    violation,
                });
            }
        }

        trace!(groups = staged.len(), "committing staged position batch");
        for (scope, rows) in staged {
            if rows.is_empty() {
                self.groups.remove(scope);
            } else {
                self.groups.insert(scope.clone(), rows);
            }
        }
        Ok(())
    }
}
