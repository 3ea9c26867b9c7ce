//! Randomized workloads over the dependency graph.
//!
//! Two invariants carry everything here: a graph mutated only through
//! validated inserts never contains a cycle, and the blocked/ready
//! projections always partition the set of dependents.

#[path = "generators.rs"]
mod generators;
use generators::*;

use proptest::prelude::*;
use trellis_core::ItemId;
use trellis_graph::{
    blocked_tasks, blocking_edges, find_all_cycles, has_cycles, ready_tasks, would_create_cycle,
    DependencyEdge, DependencyGraph,
};

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Feeding arbitrary candidate edges through `insert` may refuse any
    /// number of them, but the survivors never form a cycle.
    #[test]
    fn validated_inserts_never_leave_a_cycle(
        candidates in prop::collection::vec((0usize..12, 0usize..12, arb_kind()), 1..60),
    ) {
        let mut graph = DependencyGraph::new();
        let mut accepted = 0usize;
        for (i, (a, b, kind)) in candidates.into_iter().enumerate() {
            let edge = DependencyEdge::new(
                ItemId::new_unchecked(format!("dep-{i}")),
                task_id(a),
                task_id(b),
                kind,
            );
            if graph.insert(edge).is_ok() {
                accepted += 1;
            }
            prop_assert!(!has_cycles(&graph));
        }
        prop_assert_eq!(graph.edge_count(), accepted);
        prop_assert!(find_all_cycles(&graph).is_empty());
    }

    /// Every edge of a DAG passes validation when inserted in any order
    /// the generator produced it in.
    #[test]
    fn dag_edges_insert_cleanly(edges in arb_dag_edges(16)) {
        let mut graph = DependencyGraph::new();
        for edge in edges {
            let outcome = graph.insert(edge);
            prop_assert!(outcome.is_ok(), "refused: {:?}", outcome);
        }
        prop_assert!(!has_cycles(&graph));
    }

    /// Reversing any existing edge must be refused, and the reported path
    /// is a genuine closed walk through existing dependency edges.
    #[test]
    fn reversed_edges_report_closed_walks(edges in arb_dag_edges(14)) {
        let graph = DependencyGraph::from_edges(edges);
        for edge in graph.edges() {
            let path = would_create_cycle(&graph, &edge.depends_on, &edge.dependent);
            let path = path.expect("reversing an edge closes a cycle");

            prop_assert!(path.len() >= 3);
            prop_assert_eq!(path.first(), Some(&edge.depends_on));
            prop_assert_eq!(path.last(), Some(&edge.depends_on));
            prop_assert_eq!(&path[1], &edge.dependent);
            // Past the candidate hop, every step follows a stored edge.
            for pair in path[1..].windows(2) {
                prop_assert!(
                    graph.dependencies_of(&pair[0]).contains(&pair[1]),
                    "no edge {} -> {}",
                    pair[0],
                    pair[1],
                );
            }
        }
    }

    /// `blocked_tasks` and `ready_tasks` are disjoint, cover every
    /// dependent, and agree with the per-task projections.
    #[test]
    fn blocked_and_ready_partition_dependents(
        edges in arb_dag_edges(14),
        statuses in arb_statuses(14),
    ) {
        let graph = DependencyGraph::from_edges(edges);
        let blocked = blocked_tasks(&graph, &statuses);
        let ready = ready_tasks(&graph, &statuses);

        for id in &blocked {
            prop_assert!(!ready.contains(id));
            prop_assert!(!blocking_edges(&graph, id, &statuses).is_empty());
        }
        for id in &ready {
            prop_assert!(blocking_edges(&graph, id, &statuses).is_empty());
        }

        let mut union: Vec<ItemId> = blocked.iter().chain(ready.iter()).cloned().collect();
        union.sort();
        let mut dependents: Vec<ItemId> = graph.dependent_ids().cloned().collect();
        dependents.sort();
        prop_assert_eq!(union, dependents);
    }

    /// The content hash identifies the edge set, not the storage order or
    /// the mutation history.
    #[test]
    fn content_hash_tracks_the_edge_set(edges in arb_dag_edges(14)) {
        let forward = DependencyGraph::from_edges(edges.clone());

        let mut reversed = edges;
        reversed.reverse();
        let backward = DependencyGraph::from_edges(reversed);
        prop_assert_eq!(forward.content_hash(), backward.content_hash());

        let mut mutated = forward.clone();
        let before = mutated.content_hash();
        let extra = DependencyEdge::new(
            ItemId::new_unchecked("dep-extra"),
            task_id(999),
            task_id(0),
            trellis_graph::DependencyKind::FinishToStart,
        );
        mutated.insert(extra).expect("fresh dependent cannot cycle");
        prop_assert_ne!(mutated.content_hash(), before.clone());

        mutated.remove(&task_id(999), &task_id(0)).expect("edge was just added");
        prop_assert_eq!(mutated.content_hash(), before);
    }
}
