//! Button widget.

use crate::core::component::Component;
use crate::core::text::truncate_to_width;
use crate::render::Frame;

pub type ButtonStyleFn = Box<dyn Fn(&str) -> String>;

/// One-line interactive control. Presentational only: activation routing lives
/// in whatever owns the button (a menu, a screen), which calls
/// [`Button::press`].
pub struct Button {
    label: String,
    selected: bool,
    on_press: Option<Box<dyn FnMut()>>,
    selected_style: Option<ButtonStyleFn>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: false,
            on_press: None,
            selected_style: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_on_press(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.on_press = handler;
    }

    pub fn set_selected_style(&mut self, style: Option<ButtonStyleFn>) {
        self.selected_style = style;
    }

    pub fn press(&mut self) {
        if let Some(handler) = self.on_press.as_mut() {
            handler();
        }
    }
}

impl Component for Button {
    fn render(&mut self, width: usize) -> Frame {
        let prefix = if self.selected { "→ " } else { "  " };
        let label = truncate_to_width(&self.label, width.saturating_sub(2));
        let line = format!("{prefix}{label}");
        let line = match (self.selected, self.selected_style.as_ref()) {
            (true, Some(style)) => style(&line),
            _ => line,
        };
        Frame::from(vec![line])
    }
}

#[cfg(test)]
mod tests {
    use super::Button;
    use crate::core::component::Component;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn selection_changes_the_prefix_only() {
        let mut button = Button::new("Play");
        let unselected = button.render(20).into_strings();
        assert_eq!(unselected, vec!["  Play"]);

        button.set_selected(true);
        let selected = button.render(20).into_strings();
        assert_eq!(selected, vec!["→ Play"]);
    }

    #[test]
    fn press_fires_the_handler() {
        let pressed = Rc::new(RefCell::new(0));
        let pressed_ref = Rc::clone(&pressed);
        let mut button = Button::new("Quit");
        button.set_on_press(Some(Box::new(move || {
            *pressed_ref.borrow_mut() += 1;
        })));

        button.press();
        button.press();
        assert_eq!(*pressed.borrow(), 2);
    }

    #[test]
    fn press_without_handler_is_harmless() {
        let mut button = Button::new("Noop");
        button.press();
    }

    #[test]
    fn selected_style_applies_to_selected_renders_only() {
        let mut button = Button::new("Play");
        button.set_selected_style(Some(Box::new(|line| format!("<{line}>"))));

        assert_eq!(button.render(20).into_strings(), vec!["  Play"]);
        button.set_selected(true);
        assert_eq!(button.render(20).into_strings(), vec!["<→ Play>"]);
    }

    #[test]
    fn long_labels_truncate_to_width() {
        let mut button = Button::new("Extremely long label");
        let lines = button.render(8).into_strings();
        assert_eq!(lines, vec!["  Extrem"]);
    }
}
