//! Shared domain model: identifiers, sibling-group scopes, task statuses.

pub mod id;
pub mod scope;
pub mod status;

pub use id::{EmptyIdError, ItemId};
pub use scope::GroupScope;
pub use status::{ParseStatusError, TaskStatus};
