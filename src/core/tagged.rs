//! Identity wrapper: attach a stable identifier to any component.

use crate::core::component::Component;
use crate::core::id::ElementId;
use crate::core::input_event::InputEvent;
use crate::render::Frame;

/// Behavior-preserving adapter that stamps an [`ElementId`] onto whatever the
/// wrapped component renders.
///
/// Guarantees:
/// - Lossless pass-through: rendering, events, and invalidation reach the
///   inner component unchanged; the identifier rides on frame metadata only.
/// - Handle forwarding: `inner`/`inner_mut`/`into_inner` expose the wrapped
///   component directly.
/// - Idempotent composition: wrapping an already-wrapped component does not
///   accumulate marks (see [`Frame::tag`]); tagging twice with the same
///   identifier is observably identical to tagging once.
///
/// One adapter per wrapped instance; the adapter holds no render state of its
/// own.
pub struct Tagged<C> {
    id: ElementId,
    inner: C,
}

impl<C: Component> Tagged<C> {
    /// Wrap `inner` under `id`. Panics on an empty identifier: an
    /// unidentifiable interactive element breaks the harness contract, so the
    /// failure happens at wrap time, not at lookup time.
    pub fn new(id: impl Into<ElementId>, inner: C) -> Self {
        Self {
            id: id.into(),
            inner,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Component> Component for Tagged<C> {
    fn render(&mut self, width: usize) -> Frame {
        let mut frame = self.inner.render(width);
        frame.tag(&self.id);
        frame
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.inner.handle_event(event);
    }

    fn invalidate(&mut self) {
        self.inner.invalidate();
    }
}
