//! Action slugs and the control identifier derivation rule.

use std::fmt;

use crate::core::id::ElementId;

/// Opaque machine name for a possible user choice ("play", "quit").
///
/// The host owns the vocabulary; this crate never inspects the contents beyond
/// equality.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ActionSlug(String);

impl ActionSlug {
    /// Panics on an empty or whitespace-only slug; a nameless action can never
    /// be addressed by the harness.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        assert!(!raw.trim().is_empty(), "action slug must be non-empty");
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionSlug {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ActionSlug {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Identifier carried by the interactive control rendered for `slug`.
///
/// Every conforming scene derives its control identifiers through this one
/// rule so the harness can map an action set onto rendered elements without
/// extra negotiation.
pub fn control_id(slug: &ActionSlug) -> ElementId {
    ElementId::new(format!("{}-button", slug.as_str()))
}
