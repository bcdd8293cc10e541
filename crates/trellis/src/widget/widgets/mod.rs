//! Built-in leaf widgets.
//!
//! Visuals are minimal: each widget draws a few primitives tagged with the
//! item keys it read from the style map and leaves the look to the renderer.

mod text_area;
mod text_button;

pub use text_area::TextArea;
pub use text_button::{PressCallback, TextButton};
