//! Choice menu: the conforming scene widget.
//!
//! Renders exactly one tagged control per currently-available action and wires
//! activation to the channel's emit path. The rendered control set always
//! mirrors the latest snapshot (no extra controls, no missing ones), which is
//! the parity property the harness drives against.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::action::{control_id, ActionSlug};
use crate::core::component::Component;
use crate::core::id::ElementId;
use crate::core::input_event::InputEvent;
use crate::core::keys::{get_menu_keybindings, MenuAction};
use crate::core::tagged::Tagged;
use crate::render::Frame;
use crate::runtime::channel::{ChoiceChannel, Subscription};
use crate::widgets::button::Button;

pub type LabelFn = Box<dyn Fn(&ActionSlug) -> String>;

fn default_label(slug: &ActionSlug) -> String {
    let mut chars = slug.as_str().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Scene widget bound to a [`ChoiceChannel`] for its whole lifetime.
///
/// Mounting subscribes; dropping the menu releases the subscription, so no
/// snapshot callback can ever fire for an unmounted scene.
pub struct ChoiceMenu {
    channel: ChoiceChannel,
    actions: Rc<RefCell<Vec<ActionSlug>>>,
    stale: Rc<Cell<bool>>,
    selected: usize,
    controls: Vec<(ActionSlug, Tagged<Button>)>,
    label_fn: Option<LabelFn>,
    _subscription: Subscription,
}

impl ChoiceMenu {
    pub fn mount(channel: &ChoiceChannel) -> Self {
        let actions = Rc::new(RefCell::new(channel.available()));
        let stale = Rc::new(Cell::new(true));
        let subscription = channel.subscribe(Box::new({
            let actions = Rc::clone(&actions);
            let stale = Rc::clone(&stale);
            move |snapshot: &[ActionSlug]| {
                *actions.borrow_mut() = snapshot.to_vec();
                stale.set(true);
            }
        }));

        Self {
            channel: channel.clone(),
            actions,
            stale,
            selected: 0,
            controls: Vec::new(),
            label_fn: None,
            _subscription: subscription,
        }
    }

    /// Override the slug-to-label rendering (default: capitalized slug).
    pub fn set_label_fn(&mut self, label_fn: Option<LabelFn>) {
        self.label_fn = label_fn;
        self.stale.set(true);
    }

    pub fn selected_slug(&self) -> Option<&ActionSlug> {
        self.controls.get(self.selected).map(|(slug, _)| slug)
    }

    /// Identifiers of the rendered controls, as of the last sync.
    pub fn control_ids(&self) -> Vec<ElementId> {
        self.controls
            .iter()
            .map(|(_, control)| control.id().clone())
            .collect()
    }

    fn sync_controls(&mut self) {
        if !self.stale.replace(false) {
            return;
        }
        let actions = self.actions.borrow().clone();
        self.controls = actions
            .iter()
            .map(|slug| {
                let label = match self.label_fn.as_ref() {
                    Some(label_fn) => label_fn(slug),
                    None => default_label(slug),
                };
                let mut button = Button::new(label);
                let channel = self.channel.clone();
                let emit_slug = slug.clone();
                button.set_on_press(Some(Box::new(move || {
                    if let Err(err) = channel.emit(&emit_slug) {
                        log::warn!("choice menu: {err}");
                    }
                })));
                (slug.clone(), Tagged::new(control_id(slug), button))
            })
            .collect();
        if self.controls.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.controls.len() - 1);
        }
    }

    fn select_up(&mut self) {
        if self.controls.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.controls.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    fn select_down(&mut self) {
        if self.controls.is_empty() {
            return;
        }
        if self.selected == self.controls.len() - 1 {
            self.selected = 0;
        } else {
            self.selected += 1;
        }
    }

    fn press_selected(&mut self) {
        if let Some((_, control)) = self.controls.get_mut(self.selected) {
            control.inner_mut().press();
        }
    }

    fn press_target(&mut self, target: &ElementId) {
        let Some(index) = self
            .controls
            .iter()
            .position(|(_, control)| control.id() == target)
        else {
            return;
        };
        self.selected = index;
        self.press_selected();
    }
}

impl Component for ChoiceMenu {
    fn render(&mut self, width: usize) -> Frame {
        self.sync_controls();
        let selected = self.selected;
        for (index, (_, control)) in self.controls.iter_mut().enumerate() {
            control.inner_mut().set_selected(index == selected);
        }

        let mut frame = Frame::empty();
        for (_, control) in self.controls.iter_mut() {
            frame.append(control.render(width));
        }
        frame
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.sync_controls();
        match event {
            InputEvent::Key { key_id } => {
                let kb = get_menu_keybindings();
                let kb = kb.lock().expect("menu keybindings lock poisoned");
                if kb.matches(key_id, MenuAction::SelectUp) {
                    self.select_up();
                } else if kb.matches(key_id, MenuAction::SelectDown) {
                    self.select_down();
                } else if kb.matches(key_id, MenuAction::SelectConfirm) {
                    drop(kb);
                    self.press_selected();
                }
            }
            InputEvent::Activate { target } => {
                self.press_target(target);
            }
        }
    }
}
