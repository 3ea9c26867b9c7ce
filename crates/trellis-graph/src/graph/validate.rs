//! Pre-persist validation for new dependency edges.

use trellis_core::{ErrorCode, ItemId};

use crate::graph::{cycles, DependencyGraph};

/// Why a proposed edge was refused.
///
/// All three are terminal: the request is wrong, not the timing. Checks
/// run in this order, so a self-edge reports as `SelfDependency` even
/// though it is also trivially circular.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyViolation {
    /// The two endpoints are the same task.
    #[error("task '{task}' cannot depend on itself")]
    SelfDependency { task: ItemId },

    /// The ordered pair is already an edge.
    #[error("dependency of '{dependent}' on '{depends_on}' already exists")]
    DuplicateDependency {
        dependent: ItemId,
        depends_on: ItemId,
    },

    /// The edge would close a dependency cycle; `path` is the closed walk
    /// `dependent → depends_on → ... → dependent`.
    #[error("dependency would create a cycle: {}", format_path(.path))]
    CircularDependency { path: Vec<ItemId> },
}

impl DependencyViolation {
    /// Machine-readable code for this violation.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::SelfDependency { .. } => ErrorCode::SelfDependency,
            Self::DuplicateDependency { .. } => ErrorCode::DuplicateDependency,
            Self::CircularDependency { .. } => ErrorCode::CycleDetected,
        }
    }
}

fn format_path(path: &[ItemId]) -> String {
    path.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Validate a proposed `dependent → depends_on` edge against the graph.
///
/// Passing means the edge can be persisted and added; the graph itself is
/// never touched here.
///
/// # Errors
///
/// [`DependencyViolation::SelfDependency`] when the endpoints match,
/// [`DependencyViolation::DuplicateDependency`] when the pair is already
/// an edge, [`DependencyViolation::CircularDependency`] when the edge
/// would close a cycle.
pub fn validate_new_edge(
    graph: &DependencyGraph,
    dependent: &ItemId,
    depends_on: &ItemId,
) -> Result<(), DependencyViolation> {
    if dependent == depends_on {
        return Err(DependencyViolation::SelfDependency {
            task: dependent.clone(),
        });
    }
    if graph.contains_edge(dependent, depends_on) {
        return Err(DependencyViolation::DuplicateDependency {
            dependent: dependent.clone(),
            depends_on: depends_on.clone(),
        });
    }
    if let Some(path) = cycles::would_create_cycle(graph, dependent, depends_on) {
        return Err(DependencyViolation::CircularDependency { path });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{DependencyEdge, DependencyKind};

    fn id(raw: &str) -> ItemId {
        ItemId::new_unchecked(raw)
    }

    fn edge(dependent: &str, depends_on: &str) -> DependencyEdge {
        DependencyEdge::new(
            id(&format!("dep-{dependent}-{depends_on}")),
            id(dependent),
            id(depends_on),
            DependencyKind::FinishToStart,
        )
    }

    #[test]
    fn valid_edge_passes() {
        let graph = DependencyGraph::from_edges(vec![edge("t1", "t2")]);
        assert_eq!(validate_new_edge(&graph, &id("t2"), &id("t3")), Ok(()));
    }

    #[test]
    fn self_dependency_is_refused_even_on_an_empty_graph() {
        let err = validate_new_edge(&DependencyGraph::new(), &id("t5"), &id("t5"))
            .expect_err("self edge");
        assert_eq!(err, DependencyViolation::SelfDependency { task: id("t5") });
        assert_eq!(err.code(), ErrorCode::SelfDependency);
    }

    #[test]
    fn duplicate_pair_is_refused() {
        let graph = DependencyGraph::from_edges(vec![edge("t1", "t2")]);
        let err = validate_new_edge(&graph, &id("t1"), &id("t2")).expect_err("duplicate");
        assert_eq!(
            err,
            DependencyViolation::DuplicateDependency {
                dependent: id("t1"),
                depends_on: id("t2"),
            }
        );
        assert_eq!(err.code(), ErrorCode::DuplicateDependency);
    }

    #[test]
    fn reverse_of_an_existing_pair_is_circular_not_duplicate() {
        let graph = DependencyGraph::from_edges(vec![edge("t1", "t2")]);
        let err = validate_new_edge(&graph, &id("t2"), &id("t1")).expect_err("cycle");
        assert_eq!(
            err,
            DependencyViolation::CircularDependency {
                path: vec![id("t2"), id("t1"), id("t2")],
            }
        );
        assert_eq!(err.code(), ErrorCode::CycleDetected);
    }

    #[test]
    fn circular_violation_names_the_closed_walk() {
        let graph = DependencyGraph::from_edges(vec![edge("t1", "t2"), edge("t2", "t3")]);
        let err = validate_new_edge(&graph, &id("t3"), &id("t1")).expect_err("cycle");
        assert_eq!(
            err.to_string(),
            "dependency would create a cycle: t3 -> t1 -> t2 -> t3"
        );
    }
}
