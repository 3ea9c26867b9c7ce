use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use trellis_core::{ItemId, TaskStatus};
use trellis_graph::{DependencyEdge, DependencyKind};

pub fn task_id(n: usize) -> ItemId {
    ItemId::new_unchecked(format!("task-{n}"))
}

pub fn arb_kind() -> impl Strategy<Value = DependencyKind> + Clone {
    prop_oneof![
        Just(DependencyKind::FinishToStart),
        Just(DependencyKind::StartToStart),
        Just(DependencyKind::FinishToFinish),
        Just(DependencyKind::StartToFinish),
    ]
}

pub fn arb_status() -> impl Strategy<Value = TaskStatus> + Clone {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

/// Edges of a random DAG over `task-0 .. task-{nodes-1}`.
///
/// Every edge points from a higher-numbered dependent to a lower-numbered
/// dependency, so no generated set can contain a cycle. Duplicate pairs
/// are dropped here rather than left for the graph to drop.
pub fn arb_dag_edges(max_nodes: usize) -> impl Strategy<Value = Vec<DependencyEdge>> {
    (2..max_nodes).prop_flat_map(move |nodes| {
        prop::collection::vec((0..nodes, 0..nodes, arb_kind()), 0..nodes * 2).prop_map(|raw| {
            let mut seen = BTreeSet::new();
            let mut edges = Vec::new();
            for (a, b, kind) in raw {
                if a == b {
                    continue;
                }
                let (dependent, depends_on) = (a.max(b), a.min(b));
                if !seen.insert((dependent, depends_on)) {
                    continue;
                }
                edges.push(DependencyEdge::new(
                    ItemId::new_unchecked(format!("dep-{dependent}-{depends_on}")),
                    task_id(dependent),
                    task_id(depends_on),
                    kind,
                ));
            }
            edges
        })
    })
}

/// A partial status map over the same `task-N` id space.
pub fn arb_statuses(max_nodes: usize) -> impl Strategy<Value = HashMap<ItemId, TaskStatus>> {
    prop::collection::hash_map(0..max_nodes, arb_status(), 0..max_nodes)
        .prop_map(|raw| raw.into_iter().map(|(n, s)| (task_id(n), s)).collect())
}
