//! Structured input events delivered to components.

use crate::core::id::ElementId;

/// Input event delivered to components.
///
/// Notes:
/// - `key_id` is a normalized key identifier ("up", "down", "enter") supplied
///   by the embedding front-end; this crate does not parse terminal byte
///   sequences.
/// - `Activate` is the harness-driven path: a targeted activation of an
///   addressable element, routed down the component tree by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { key_id: String },
    Activate { target: ElementId },
}

impl InputEvent {
    pub fn key(key_id: impl Into<String>) -> Self {
        Self::Key {
            key_id: key_id.into(),
        }
    }

    pub fn activate(target: ElementId) -> Self {
        Self::Activate { target }
    }
}
