//! Blocked and ready projections over the dependency graph.
//!
//! A task is *blocked* while at least one of its dependency edges still
//! gates on the upstream task's status (see
//! [`DependencyKind::is_blocking`](crate::edge::DependencyKind::is_blocking)).
//! Statuses live with the calling service, so every projection takes a
//! status map; tasks missing from the map read as [`TaskStatus::Todo`],
//! the conservative choice for an upstream task nobody has touched.
//!
//! Only tasks that actually have dependencies appear in the
//! blocked/ready split. The two sets partition
//! [`DependencyGraph::dependent_ids`]: every dependent lands in exactly
//! one of them.

use std::collections::{BTreeSet, HashMap, HashSet};

use trellis_core::{ItemId, TaskStatus};

use crate::edge::DependencyEdge;
use crate::graph::DependencyGraph;

fn status_of(statuses: &HashMap<ItemId, TaskStatus>, id: &ItemId) -> TaskStatus {
    statuses.get(id).copied().unwrap_or(TaskStatus::Todo)
}

/// The edges currently holding `task` back, in insertion order.
///
/// Empty when the task has no dependencies or every one of them has
/// progressed past the state its edge kind gates on.
#[must_use]
pub fn blocking_edges<'a>(
    graph: &'a DependencyGraph,
    task: &ItemId,
    statuses: &HashMap<ItemId, TaskStatus>,
) -> Vec<&'a DependencyEdge> {
    graph
        .edges()
        .iter()
        .filter(|edge| {
            &edge.dependent == task && edge.kind.is_blocking(status_of(statuses, &edge.depends_on))
        })
        .collect()
}

/// Whether `task` has at least one blocking edge.
#[must_use]
pub fn is_task_blocked(
    graph: &DependencyGraph,
    task: &ItemId,
    statuses: &HashMap<ItemId, TaskStatus>,
) -> bool {
    graph.edges().iter().any(|edge| {
        &edge.dependent == task && edge.kind.is_blocking(status_of(statuses, &edge.depends_on))
    })
}

/// All blocked tasks, sorted by id.
#[must_use]
pub fn blocked_tasks(
    graph: &DependencyGraph,
    statuses: &HashMap<ItemId, TaskStatus>,
) -> Vec<ItemId> {
    let blocked: BTreeSet<ItemId> = graph
        .edges()
        .iter()
        .filter(|edge| edge.kind.is_blocking(status_of(statuses, &edge.depends_on)))
        .map(|edge| edge.dependent.clone())
        .collect();
    blocked.into_iter().collect()
}

/// All tasks whose dependencies are fully satisfied, sorted by id.
///
/// The complement of [`blocked_tasks`] within the graph's dependents.
#[must_use]
pub fn ready_tasks(graph: &DependencyGraph, statuses: &HashMap<ItemId, TaskStatus>) -> Vec<ItemId> {
    let blocked: HashSet<&ItemId> = graph
        .edges()
        .iter()
        .filter(|edge| edge.kind.is_blocking(status_of(statuses, &edge.depends_on)))
        .map(|edge| &edge.dependent)
        .collect();
    let mut ready: Vec<ItemId> = graph
        .dependent_ids()
        .filter(|id| !blocked.contains(*id))
        .cloned()
        .collect();
    ready.sort();
    ready
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
