//! Opaque item identifiers.
//!
//! The engine never mints ids; every id arrives from a calling service
//! (task service, checklist service, favorites service, ...). `ItemId` only
//! guarantees the one property the engine relies on: ids are non-empty and
//! carry no surrounding whitespace, so they are usable as map keys and log
//! fields without normalization surprises.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when constructing an [`ItemId`] from unusable input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("item id must be non-empty")]
pub struct EmptyIdError;

impl EmptyIdError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> crate::error::ErrorCode {
        crate::error::ErrorCode::InvalidItemId
    }
}

/// An opaque identifier for any positioned entity or task.
///
/// Uniqueness is the calling service's contract; the engine treats two equal
/// strings as the same entity and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Construct an id, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdError`] if the trimmed input is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyIdError);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Construct an id from input already known to be non-empty.
    ///
    /// Intended for fixtures and for rows loaded from a store that enforces
    /// non-empty keys. Empty input is preserved as-is (no panic) and will
    /// simply never match a real entity.
    #[must_use]
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as a borrowed string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ids() {
        let id = ItemId::new("task-42").expect("valid id");
        assert_eq!(id.as_str(), "task-42");
        assert_eq!(id.to_string(), "task-42");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = ItemId::new("  task-42\n").expect("valid id");
        assert_eq!(id.as_str(), "task-42");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(ItemId::new(""), Err(EmptyIdError));
        assert_eq!(ItemId::new("   "), Err(EmptyIdError));
        assert!("".parse::<ItemId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let id = ItemId::new("chk-7").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"chk-7\"");
        let back: ItemId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
