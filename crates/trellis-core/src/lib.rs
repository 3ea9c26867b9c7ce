#![forbid(unsafe_code)]
//! trellis-core: ordering engine for positioned sibling groups.
//!
//! Tasks in a list, subtasks under a parent, lists in a project, checklist
//! items, and a user's favorites are all the same shape: a group of
//! siblings holding dense positions `0..n`. This crate keeps that shape
//! true through inserts, moves, removals, and full reorders, computing the
//! minimal writes per operation instead of rewriting whole groups.
//!
//! The engine is deliberately storage-free: load rows through a
//! [`store::PositionStore`], verify them into an [`order::GroupSnapshot`],
//! plan with [`order::Positioner`], commit the resulting write sets. The
//! host service owns transactions and per-group serialization.
//!
//! # Conventions
//!
//! - **Errors**: typed per module, with [`error::ErrorCode`] for machine
//!   consumers; `anyhow::Result` only at config/storage edges.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`); planning stays
//!   quiet except for clamps and commits.

pub mod config;
pub mod error;
pub mod model;
pub mod order;
pub mod store;

pub use config::{EngineConfig, PositionConfig, load_engine_config};
pub use error::ErrorCode;
pub use model::{GroupScope, ItemId, TaskStatus};
pub use order::{
    GroupSnapshot, Member, PositionError, PositionWrite, Positioner, TransferPlan, WriteSet,
};
pub use store::{GroupCommit, MemoryStore, PositionStore, StoreError};
