//! Runtime orchestration: choice channel and screen.

pub mod channel;
pub mod screen;

pub use channel::{ChoiceChannel, ChoiceError, ChoicePhase, Subscription};
pub use screen::Screen;
