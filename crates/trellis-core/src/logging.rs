//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis::layout=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Use the constants in [`targets`] to filter logs by subsystem and the
//! constants in [`span_names`] to find the spans wrapping expensive work.

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// A full sizing + placement pass over a frame family.
    pub const GEOMETRY_PASS: &str = "trellis::geometry_pass";
    /// A stylize pass over a widget tree.
    pub const STYLIZE: &str = "trellis::stylize";
    /// Dispatch of one input event through a frame.
    pub const EVENT_DISPATCH: &str = "trellis::event_dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Frame layout: sizing, spacer distribution, placement.
    pub const LAYOUT: &str = "trellis::layout";
    /// Focus cycling.
    pub const FOCUS: &str = "trellis::focus";
    /// Event dispatch and dragging.
    pub const EVENTS: &str = "trellis::events";
    /// Style lookups and key interning.
    pub const STYLE: &str = "trellis::style";
    /// Widget arena bookkeeping.
    pub const TREE: &str = "trellis::tree";
    /// Book frame page switching.
    pub const BOOK: &str = "trellis::book";
}
