//! Sibling-group scope keys.
//!
//! Every positioned entity lives in exactly one *sibling group*: the set of
//! rows that compete for the same dense `0..n-1` position range. The scope
//! key identifies that group. Five collections share the ordering engine,
//! and each gets its own scope shape:
//!
//! - tasks at the top of a list: `ListTasks { parent_task_id: None, .. }`
//! - subtasks under a parent task: `ListTasks { parent_task_id: Some(..), .. }`
//! - task lists within a project: [`GroupScope::ProjectLists`]
//! - checklist items within a checklist: [`GroupScope::ChecklistItems`]
//! - a user's favorites: [`GroupScope::UserFavorites`]
//!
//! The ordering engine itself never inspects the variant; the scope is an
//! opaque partition key from its point of view. Stores use it as the index
//! key; services use it to name the lock they must hold across
//! load → plan → commit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::ItemId;

/// Identifies one sibling group.
///
/// Two positioned rows are siblings iff their scopes compare equal. `Ord` and
/// `Hash` make the scope directly usable as a store or lock-table key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupScope {
    /// Tasks within a task list. `parent_task_id` is `None` for top-level
    /// tasks; each parent task's subtasks form their own group.
    ListTasks {
        list_id: ItemId,
        parent_task_id: Option<ItemId>,
    },
    /// Task lists within a project.
    ProjectLists { project_id: ItemId },
    /// Checklist items within a checklist.
    ChecklistItems { checklist_id: ItemId },
    /// A user's favorites list.
    UserFavorites { user_id: ItemId },
}

impl GroupScope {
    /// Scope for a list's top-level tasks.
    #[must_use]
    pub const fn top_level_tasks(list_id: ItemId) -> Self {
        Self::ListTasks {
            list_id,
            parent_task_id: None,
        }
    }

    /// Scope for one task's subtasks.
    #[must_use]
    pub const fn subtasks(list_id: ItemId, parent_task_id: ItemId) -> Self {
        Self::ListTasks {
            list_id,
            parent_task_id: Some(parent_task_id),
        }
    }

    /// Short label for the collection this scope belongs to, for logging.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::ListTasks {
                parent_task_id: None,
                ..
            } => "tasks",
            Self::ListTasks {
                parent_task_id: Some(_),
                ..
            } => "subtasks",
            Self::ProjectLists { .. } => "task_lists",
            Self::ChecklistItems { .. } => "checklist_items",
            Self::UserFavorites { .. } => "favorites",
        }
    }
}

impl fmt::Display for GroupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListTasks {
                list_id,
                parent_task_id: None,
            } => write!(f, "tasks:{list_id}"),
            Self::ListTasks {
                list_id,
                parent_task_id: Some(parent),
            } => write!(f, "subtasks:{list_id}/{parent}"),
            Self::ProjectLists { project_id } => write!(f, "task_lists:{project_id}"),
            Self::ChecklistItems { checklist_id } => write!(f, "checklist_items:{checklist_id}"),
            Self::UserFavorites { user_id } => write!(f, "favorites:{user_id}"),
        }
    }
}
