//! Dense position maintenance for sibling groups.
//!
//! Split in two layers: [`snapshot`] verifies that a loaded group really is
//! dense and gives planners something safe to index into, and [`plan`]
//! computes minimal write sets for the reorder operations. Neither layer
//! performs I/O; storage is behind [`crate::store::PositionStore`].

pub mod plan;
pub mod snapshot;

pub use plan::{PositionError, PositionWrite, Positioner, TransferPlan, WriteSet};
pub use snapshot::{audit, DensityViolation, GroupSnapshot, Member};
