//! Harness-addressable instrumentation for scene-driven game TUIs.
//!
//! Invariant: identifier marks are the only channel the external harness
//! reads; they ride on the typed frame as metadata and never leak into the
//! rendered text or styling.
//!
//! # Public API Overview
//! - Wrap any [`Component`] in [`Tagged`] to attach a stable [`ElementId`] to
//!   whatever it renders.
//! - Drive scene choices through one [`ChoiceChannel`]: the host publishes
//!   action sets (`set_ready`/`set_idle`), scenes subscribe and `emit`.
//! - Compose conforming scenes from [`ChoiceMenu`] and audit/address them via
//!   [`Screen`] (`find`/`activate`).

pub mod config;

pub mod core;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Action vocabulary and the control identifier derivation rule.
pub use crate::core::action::{control_id, ActionSlug};

/// Component trait and the identity wrapper.
pub use crate::core::component::Component;
pub use crate::core::tagged::Tagged;

/// Stable element identifier type.
pub use crate::core::id::ElementId;

/// Input events delivered to components.
pub use crate::core::input_event::InputEvent;

/// Menu keybinding configuration and default mappings.
pub use crate::core::keys::{
    get_menu_keybindings, KeyId, MenuAction, MenuKeybindings, DEFAULT_MENU_KEYBINDINGS,
};

/// Render-layer frame types.
pub use crate::render::{Frame, Line, Mark, Root, Span};

/// Choice dispatch channel and subscription handle.
pub use crate::runtime::channel::{ChoiceChannel, ChoiceError, ChoicePhase, Subscription};

/// Screen-level audit and harness routing.
pub use crate::runtime::screen::Screen;

/// Built-in UI components.
pub use crate::widgets::{Button, ButtonStyleFn, ChoiceMenu, Container, LabelFn, Text};

/// Visible width helpers that ignore ANSI control sequences.
pub use crate::core::text::{pad_to_width, truncate_to_width, visible_width};
