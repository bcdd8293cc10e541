//! Widget capabilities, the widget arena and the built-in leaf widgets.
//!
//! # Overview
//!
//! - [`Widget`], [`Container`] and [`FocusWidget`]: the capability traits
//! - [`WidgetTree`]: arena storage handing out [`WidgetId`](trellis_core::WidgetId)s
//! - [`GeometryUpdate`], [`WidgetFlags`], [`FlagsReceiver`]: the update
//!   request protocol between widgets and their owners
//! - [`events`]: the input event model
//! - [`widgets`]: `TextArea` and `TextButton`

mod base;
mod drag;
pub mod events;
mod flags;
mod traits;
mod tree;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::WidgetBase;
pub use drag::DragState;
pub use events::{
    Event, GamepadAxis, GamepadAxisEvent, GamepadButton, GamepadButtonEvent, Key, KeyEvent,
    KeyboardModifiers, MouseButton, MouseButtonEvent,
};
pub use flags::{FlagsReceiver, GeometryUpdate, WidgetFlags};
pub use traits::{Container, FocusWidget, Widget};
pub use tree::WidgetTree;
