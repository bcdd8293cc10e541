//! Trellis - a retained-mode widget toolkit built around flow-layout frames.
//!
//! This is the main crate. It owns the widget arena, the frames and the
//! built-in widgets, and re-exports the supporting crates.
//!
//! # Example
//!
//! ```
//! use trellis::frame::BareFrame;
//! use trellis::render::{MonospaceMetrics, Point, RecordingRenderer};
//! use trellis::style::default_styles;
//! use trellis::widget::WidgetTree;
//! use trellis::widget::widgets::{TextArea, TextButton};
//!
//! fn main() -> trellis::Result<()> {
//!     let mut tree = WidgetTree::new();
//!     let frame = tree.insert_container(BareFrame::new());
//!     let label = tree.insert(TextArea::new("Volume"));
//!     let button = tree.insert(TextButton::new("Apply"));
//!
//!     tree.begin_adding_widgets(frame)
//!         .add(label)
//!         .add_horizontal_spacer()
//!         .add(button)
//!         .finish()?;
//!     tree.container_mut::<BareFrame>(frame)?.set_fixed_width(Some(400))?;
//!
//!     let styles = default_styles(MonospaceMetrics::default().shared());
//!     tree.stylize(frame, &styles)?;
//!
//!     // Once per tick, before drawing.
//!     tree.check_for_geometry_updates(frame)?;
//!     assert_eq!(tree.size(frame)?.width, 400);
//!     assert!(tree.location(button)?.x > tree.location(label)?.x);
//!
//!     tree.set_location(frame, Point::new(20, 20))?;
//!     let mut renderer = RecordingRenderer::new();
//!     tree.draw(frame, &mut renderer)?;
//!     assert!(!renderer.commands().is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod frame;
pub mod prelude;
pub mod widget;

pub use error::{Error, Result};
pub use trellis_core::{InstanceKey, ItemKey, WidgetId, logging};

/// Geometry, fonts and the renderer interface.
pub mod render {
    pub use trellis_render::*;
}

/// Style maps, keys and the default theme.
pub mod style {
    pub use trellis_style::*;
}
