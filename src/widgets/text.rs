//! Text widget.

use crate::core::component::Component;
use crate::core::text::pad_to_width;
use crate::render::Frame;

/// Static multi-line text, padded to the render width. Caches its last frame
/// until the text or width changes.
pub struct Text {
    text: String,
    cached_width: Option<usize>,
    cached_frame: Option<Frame>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cached_width: None,
            cached_frame: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }
}

impl Component for Text {
    fn render(&mut self, width: usize) -> Frame {
        if let Some(cached) = self.cached_frame.as_ref() {
            if self.cached_width == Some(width) {
                return cached.clone();
            }
        }

        let lines: Vec<String> = self
            .text
            .split('\n')
            .map(|line| pad_to_width(line, width))
            .collect();
        let frame = Frame::from(lines);

        self.cached_width = Some(width);
        self.cached_frame = Some(frame.clone());
        frame
    }

    fn invalidate(&mut self) {
        self.cached_width = None;
        self.cached_frame = None;
    }
}
