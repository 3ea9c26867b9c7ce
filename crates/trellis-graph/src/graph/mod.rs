//! Dependency graph construction and queries.
//!
//! # Overview
//!
//! [`DependencyGraph`] is built per request from an edge snapshot and
//! queried for cycle prevention ([`cycles`], [`validate`]) and derived
//! blocking state ([`blocking`]). It never performs I/O and never persists
//! anything; the caller owns edge storage and rebuilds (or caches by
//! [`DependencyGraph::content_hash`]) as edits land.
//!
//! # Edge direction
//!
//! Edges point `dependent → depends_on`: the task doing the waiting comes
//! first. Reachability questions for cycle prevention therefore walk
//! depends-on pointers, starting from the prospective depends-on task.

pub mod blocking;
pub mod cycles;
pub mod validate;

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};
use trellis_core::ItemId;

use crate::edge::DependencyEdge;
use crate::graph::validate::DependencyViolation;

/// An in-memory dependency graph over one project's edge set.
///
/// Nodes exist implicitly: any id appearing as an endpoint is a node.
/// Tasks with no dependencies in either direction simply never appear;
/// every query treats an absent id as unconnected.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
    /// dependent → the ids it waits on.
    deps_of: HashMap<ItemId, Vec<ItemId>>,
    /// depends-on → the ids waiting on it.
    dependents_of: HashMap<ItemId, Vec<ItemId>>,
}

impl DependencyGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loaded edge rows.
    ///
    /// Rows violating pair uniqueness (same ordered `(dependent,
    /// depends_on)` twice) are dropped after the first occurrence. The
    /// graph tolerates dirty historic data; [`cycles::find_all_cycles`]
    /// exists to report the rest of it.
    #[must_use]
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn from_edges(edges: Vec<DependencyEdge>) -> Self {
        let mut graph = Self::new();
        let mut dropped = 0usize;
        for edge in edges {
            if graph.contains_edge(&edge.dependent, &edge.depends_on) {
                dropped += 1;
                continue;
            }
            graph.insert_unchecked(edge);
        }
        if dropped > 0 {
            debug!(dropped, "dropped duplicate dependency rows");
        }
        graph
    }

    /// Validate and add a new edge.
    ///
    /// On success the edge is part of the graph and the caller may persist
    /// it; on failure the graph is untouched.
    ///
    /// # Errors
    ///
    /// [`DependencyViolation`] per [`validate::validate_new_edge`].
    pub fn insert(&mut self, edge: DependencyEdge) -> Result<(), DependencyViolation> {
        if let Err(violation) = validate::validate_new_edge(self, &edge.dependent, &edge.depends_on)
        {
            debug!(code = %violation.code(), "refused dependency edge: {violation}");
            return Err(violation);
        }
        self.insert_unchecked(edge);
        Ok(())
    }

    /// Remove the edge for an ordered pair, returning it if present.
    ///
    /// Removal needs no validation: deleting an edge can only break
    /// cycles, never create them.
    pub fn remove(&mut self, dependent: &ItemId, depends_on: &ItemId) -> Option<DependencyEdge> {
        let index = self
            .edges
            .iter()
            .position(|e| &e.dependent == dependent && &e.depends_on == depends_on)?;
        let edge = self.edges.remove(index);

        detach(&mut self.deps_of, dependent, depends_on);
        detach(&mut self.dependents_of, depends_on, dependent);
        Some(edge)
    }

    fn insert_unchecked(&mut self, edge: DependencyEdge) {
        self.deps_of
            .entry(edge.dependent.clone())
            .or_default()
            .push(edge.depends_on.clone());
        self.dependents_of
            .entry(edge.depends_on.clone())
            .or_default()
            .push(edge.dependent.clone());
        self.edges.push(edge);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// All edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of distinct tasks appearing as an endpoint.
    #[must_use]
    pub fn task_count(&self) -> usize {
        let ids: HashSet<&ItemId> = self
            .deps_of
            .keys()
            .chain(self.dependents_of.keys())
            .collect();
        ids.len()
    }

    /// Whether the ordered pair is an edge.
    #[must_use]
    pub fn contains_edge(&self, dependent: &ItemId, depends_on: &ItemId) -> bool {
        self.deps_of
            .get(dependent)
            .is_some_and(|deps| deps.contains(depends_on))
    }

    /// The full edge row for an ordered pair.
    #[must_use]
    pub fn edge(&self, dependent: &ItemId, depends_on: &ItemId) -> Option<&DependencyEdge> {
        self.edges
            .iter()
            .find(|e| &e.dependent == dependent && &e.depends_on == depends_on)
    }

    /// Ids that `id` directly waits on.
    #[must_use]
    pub fn dependencies_of(&self, id: &ItemId) -> &[ItemId] {
        self.deps_of.get(id).map_or(&[], Vec::as_slice)
    }

    /// Ids directly waiting on `id`.
    #[must_use]
    pub fn dependents_of(&self, id: &ItemId) -> &[ItemId] {
        self.dependents_of.get(id).map_or(&[], Vec::as_slice)
    }

    /// Every task that waits on something (has at least one outgoing
    /// dependency).
    pub fn dependent_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.deps_of.keys()
    }

    /// BLAKE3 hash of the sorted `(dependent, depends_on, kind)` triples.
    ///
    /// Stable across edge insertion order, so callers can cache derived
    /// structures and invalidate only when the edge set really changed.
    /// Computed per call because the graph is mutable.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut triples: Vec<(&str, &str, &str)> = self
            .edges
            .iter()
            .map(|e| (e.dependent.as_str(), e.depends_on.as_str(), e.kind.as_str()))
            .collect();
        triples.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for (dependent, depends_on, kind) in triples {
            hasher.update(dependent.as_bytes());
            hasher.update(b"\x00");
            hasher.update(depends_on.as_bytes());
            hasher.update(b"\x00");
            hasher.update(kind.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Drop one occurrence of `value` from the adjacency list under `key`,
/// removing the list when it empties.
fn detach(map: &mut HashMap<ItemId, Vec<ItemId>>, key: &ItemId, value: &ItemId) {
    if let Some(list) = map.get_mut(key) {
        if let Some(at) = list.iter().position(|v| v == value) {
            list.remove(at);
        }
        if list.is_empty() {
            map.remove(key);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
