//! Task dependency graphs: validation, cycle detection, and blocking state.
//!
//! This crate keeps the dependency edges of one project as an in-memory
//! [`DependencyGraph`] and answers the questions the task service asks of
//! it: may this edge be added ([`validate_new_edge`]), which tasks are
//! currently blocked ([`blocked_tasks`] / [`ready_tasks`]), and does the
//! stored set of edges contain cycles ([`find_all_cycles`])?
//!
//! # Edge direction
//!
//! An edge runs `dependent → depends_on`: the dependent waits, the
//! depends-on side is waited upon. "t2 depends on t1" is one edge with
//! `dependent = t2`, `depends_on = t1`.
//!
//! # Conventions
//!
//! - Graphs are per project; callers never mix tenants in one graph.
//! - Mutation goes through [`DependencyGraph::insert`], which validates.
//!   [`DependencyGraph::from_edges`] is for loading rows already on disk
//!   and only drops exact duplicate pairs.
//! - Task statuses live with the caller and are passed in per query.
//! - Every violation carries a stable [`ErrorCode`](trellis_core::ErrorCode)
//!   via its `code()` method.

#![forbid(unsafe_code)]

pub mod edge;
pub mod graph;

pub use edge::{DependencyEdge, DependencyKind, ParseKindError};
pub use graph::blocking::{blocked_tasks, blocking_edges, is_task_blocked, ready_tasks};
pub use graph::cycles::{find_all_cycles, has_cycles, would_create_cycle};
pub use graph::validate::{validate_new_edge, DependencyViolation};
pub use graph::DependencyGraph;
