//! Screen: root ownership, identifier audit, and harness routing.

use std::collections::HashSet;

use crate::config::EnvConfig;
use crate::core::component::Component;
use crate::core::id::ElementId;
use crate::core::input_event::InputEvent;
use crate::render::{Frame, Mark};

/// Owns the root component of one rendered screen.
///
/// Renders audit identifier uniqueness: a duplicate identifier makes harness
/// addressing ambiguous, so strict mode (debug builds, or `PROBE_STRICT_IDS=1`)
/// panics at render time, and lenient mode logs an error and resolves lookups
/// to the first mark. The audit never alters rendered lines; instrumentation
/// failures stay isolated from unrelated elements.
pub struct Screen {
    root: Box<dyn Component>,
    strict_ids: bool,
    last_frame: Option<Frame>,
}

impl Screen {
    pub fn new(root: Box<dyn Component>) -> Self {
        let config = EnvConfig::from_env();
        Self {
            root,
            strict_ids: cfg!(debug_assertions) || config.strict_ids,
            last_frame: None,
        }
    }

    pub fn with_strict_ids(root: Box<dyn Component>, strict_ids: bool) -> Self {
        Self {
            root,
            strict_ids,
            last_frame: None,
        }
    }

    pub fn render(&mut self, width: usize) -> &Frame {
        let frame = self.root.render(width);
        self.audit(&frame);
        self.last_frame = Some(frame);
        self.last_frame.as_ref().expect("frame was just stored")
    }

    fn audit(&self, frame: &Frame) {
        let mut seen: HashSet<&ElementId> = HashSet::new();
        for mark in frame.marks() {
            if seen.insert(mark.id()) {
                continue;
            }
            if self.strict_ids {
                panic!(
                    "duplicate element identifier '{}' within one screen",
                    mark.id()
                );
            }
            log::error!(
                "duplicate element identifier '{}' within one screen; harness lookups resolve to the first mark",
                mark.id()
            );
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Harness lookup against the last rendered frame.
    pub fn find(&self, id: &ElementId) -> Option<&Mark> {
        self.last_frame.as_ref().and_then(|frame| frame.find(id))
    }

    /// Route a harness activation to the component tree. Returns `false` (and
    /// logs) when `id` is absent from the last rendered frame, so a stale
    /// harness script cannot press controls that are no longer on screen.
    pub fn activate(&mut self, id: &ElementId) -> bool {
        if self.find(id).is_none() {
            log::warn!("activation of unknown element '{id}' ignored");
            return false;
        }
        let event = InputEvent::Activate { target: id.clone() };
        self.root.handle_event(&event);
        true
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.root.handle_event(event);
    }

    pub fn invalidate(&mut self) {
        self.root.invalidate();
    }
}
