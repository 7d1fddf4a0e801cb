//! Stable element identifiers.

use std::fmt;

/// Stable identifier attached to a rendered element so an external harness can
/// address it.
///
/// Semantics:
/// - Unique within a rendered screen (audited by `Screen`).
/// - Stable across re-renders while the underlying logical element is unchanged.
/// - Never encoded into rendered text or styling; carried as frame metadata.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementId(String);

impl ElementId {
    /// Panics when `raw` is empty or whitespace-only. An unidentifiable
    /// interactive element breaks the harness contract, so construction fails
    /// loudly instead of rendering an unaddressable node.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        assert!(
            !raw.trim().is_empty(),
            "element identifier must be non-empty"
        );
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derived identifier for one node of a widget that renders multiple
    /// top-level nodes (e.g. `card` -> `card-trigger`).
    pub fn derived(&self, role: &str) -> Self {
        Self::new(format!("{}-{role}", self.0))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ElementId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
