//! Typed render model.

pub mod frame;

pub use frame::{Frame, Line, Mark, Root, Span};
