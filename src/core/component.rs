//! Component trait.

use crate::core::input_event::InputEvent;
use crate::render::Frame;

/// Renderable component interface.
pub trait Component {
    /// Render to a typed frame at the given width.
    fn render(&mut self, width: usize) -> Frame;

    /// Handle an input event.
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Invalidate any cached state.
    fn invalidate(&mut self) {}
}

impl Component for Box<dyn Component> {
    fn render(&mut self, width: usize) -> Frame {
        (**self).render(width)
    }

    fn handle_event(&mut self, event: &InputEvent) {
        (**self).handle_event(event)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}
