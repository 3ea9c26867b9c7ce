//! Cycle prevention and whole-graph cycle audits.
//!
//! # Edge direction
//!
//! An edge `dependent → depends_on` means the dependent waits. Adding a
//! new edge `D → P` closes a cycle exactly when `D` is already reachable
//! from `P` along existing depends-on pointers, so the check is a
//! reachability walk from `P`.
//!
//! The walk is an explicit work-queue BFS, never recursion: dependency
//! chains are user data and must not be able to overflow the stack.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use trellis_core::ItemId;

use crate::graph::DependencyGraph;

/// Check whether adding `dependent → depends_on` would close a cycle.
///
/// Returns the concrete closed path `dependent → depends_on → ... →
/// dependent` for diagnostics when it would; `None` means the edge is safe.
/// A self-edge returns the trivial two-entry path without traversal, and a
/// pair that is already an edge returns `None` (re-adding it creates no
/// new cycle).
///
/// # Complexity
///
/// O(V + E) over the reachable subgraph; BFS yields a shortest closed
/// path, which keeps diagnostics small on dense graphs.
#[must_use]
pub fn would_create_cycle(
    graph: &DependencyGraph,
    dependent: &ItemId,
    depends_on: &ItemId,
) -> Option<Vec<ItemId>> {
    if dependent == depends_on {
        return Some(vec![dependent.clone(), dependent.clone()]);
    }
    if graph.contains_edge(dependent, depends_on) {
        return None;
    }

    // BFS from `depends_on` looking for `dependent`.
    let mut queue: VecDeque<&ItemId> = VecDeque::from([depends_on]);
    let mut visited: HashSet<&ItemId> = HashSet::from([depends_on]);
    let mut parent: HashMap<&ItemId, &ItemId> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        if current == dependent {
            return Some(closed_path(dependent, depends_on, &parent));
        }
        for next in graph.dependencies_of(current) {
            if visited.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Rebuild `dependent → depends_on → ... → dependent` from BFS parents.
fn closed_path(
    dependent: &ItemId,
    depends_on: &ItemId,
    parent: &HashMap<&ItemId, &ItemId>,
) -> Vec<ItemId> {
    // Parent links encode the discovered chain depends_on → ... →
    // dependent; walk it backwards from `dependent`.
    let mut chain: Vec<&ItemId> = vec![dependent];
    let mut cursor = dependent;
    while cursor != depends_on {
        cursor = parent[cursor];
        chain.push(cursor);
    }
    chain.reverse();

    let mut path = Vec::with_capacity(chain.len() + 1);
    path.push(dependent.clone());
    path.extend(chain.into_iter().cloned());
    path
}

/// Find every cycle currently present in the graph.
///
/// Each entry is the sorted id list of one strongly connected component
/// with more than one member, or a single id with a self-edge. Validated
/// graphs return nothing; this exists to audit edge sets that entered
/// storage without validation (imports, historic rows).
#[must_use]
pub fn find_all_cycles(graph: &DependencyGraph) -> Vec<Vec<ItemId>> {
    let digraph = materialize(graph);

    let mut cycles: Vec<Vec<ItemId>> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| digraph.find_edge(*node, *node).is_some())
        })
        .map(|component| {
            let mut ids: Vec<ItemId> = component
                .into_iter()
                .map(|idx| digraph[idx].clone())
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Whether any cycle exists at all.
#[must_use]
pub fn has_cycles(graph: &DependencyGraph) -> bool {
    !find_all_cycles(graph).is_empty()
}

/// Build a petgraph view of the edge set for SCC analysis.
fn materialize(graph: &DependencyGraph) -> DiGraph<ItemId, ()> {
    let mut digraph = DiGraph::<ItemId, ()>::new();
    let mut node_map: HashMap<&ItemId, NodeIndex> = HashMap::new();

    for edge in graph.edges() {
        let dependent = *node_map
            .entry(&edge.dependent)
            .or_insert_with(|| digraph.add_node(edge.dependent.clone()));
        let depends_on = *node_map
            .entry(&edge.depends_on)
            .or_insert_with(|| digraph.add_node(edge.depends_on.clone()));
        digraph.add_edge(dependent, depends_on, ());
    }

    digraph
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
