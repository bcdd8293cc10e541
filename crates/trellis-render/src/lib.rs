//! Rendering interface for Trellis.
//!
//! This crate holds everything the widget layer needs from a graphics
//! backend without depending on one:
//!
//! - **Geometry**: integer [`Point`], [`Size`], [`Rect`] and [`Triangle`]
//! - **Colors**: [`Color`] for style fields
//! - **Drawing**: the [`WidgetRenderer`] trait backends implement, plus a
//!   [`RecordingRenderer`] for headless use
//! - **Text**: the [`FontMetrics`] trait and [`MonospaceMetrics`]
//!
//! Backends (SFML, wgpu, a terminal...) live outside this workspace and
//! implement [`WidgetRenderer`] and [`FontMetrics`].

mod error;
mod renderer;
mod text;
mod types;

pub use error::{RenderError, RenderResult};
pub use renderer::{DrawCommand, RecordingRenderer, TextRun, WidgetRenderer};
pub use text::{FontMetrics, MonospaceMetrics, SharedFont};
pub use types::{Color, Point, Rect, Size, Triangle};
