//! Simple container widget.

use crate::core::component::Component;
use crate::core::input_event::InputEvent;
use crate::render::Frame;

/// Stacks children vertically. Child frames are appended in order, which keeps
/// every child's identifier marks addressable (shifted to their on-screen
/// positions). Events are broadcast to all children so targeted activations
/// reach nested scenes.
#[derive(Default)]
pub struct Container {
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, component: Box<dyn Component>) {
        self.children.push(component);
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

impl Component for Container {
    fn render(&mut self, width: usize) -> Frame {
        let mut frame = Frame::empty();
        for child in self.children.iter_mut() {
            frame.append(child.render(width));
        }
        frame
    }

    fn handle_event(&mut self, event: &InputEvent) {
        for child in self.children.iter_mut() {
            child.handle_event(event);
        }
    }

    fn invalidate(&mut self) {
        for child in self.children.iter_mut() {
            child.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::core::component::Component;
    use crate::core::id::ElementId;
    use crate::core::tagged::Tagged;
    use crate::render::Frame;

    struct StaticComponent {
        lines: Vec<String>,
    }

    impl Component for StaticComponent {
        fn render(&mut self, _width: usize) -> Frame {
            Frame::from(self.lines.clone())
        }
    }

    #[test]
    fn container_concatenates_children() {
        let mut container = Container::new();
        container.add_child(Box::new(StaticComponent {
            lines: vec!["one".to_string()],
        }));
        container.add_child(Box::new(StaticComponent {
            lines: vec!["two".to_string(), "three".to_string()],
        }));

        let result = container.render(10).into_strings();
        assert_eq!(result, vec!["one", "two", "three"]);
    }

    #[test]
    fn container_preserves_child_marks_at_shifted_positions() {
        let mut container = Container::new();
        container.add_child(Box::new(StaticComponent {
            lines: vec!["header".to_string()],
        }));
        container.add_child(Box::new(Tagged::new(
            "play-button",
            StaticComponent {
                lines: vec!["Play".to_string()],
            },
        )));

        let frame = container.render(10);
        let mark = frame
            .find(&ElementId::new("play-button"))
            .expect("nested mark survives");
        assert_eq!(mark.range(), 1..2);
    }
}
