//! Frames and the containers built on them.
//!
//! - [`BareFrame`] / [`Frame`]: flow-layout containers, undecorated or with
//!   a border and draggable title bar
//! - [`WidgetAdder`]: the builder committing a frame's widget list
//! - [`FrameFocusHandler`]: the focus cycle of a frame family
//! - [`BookFrame`]: shows one of several equally sized pages
//! - [`layout`]: the pure line-wrap, spacer and placement passes

mod adder;
mod bare_frame;
mod book_frame;
mod border;
mod entry;
mod focus_handler;
pub mod layout;

pub use adder::WidgetAdder;
pub use bare_frame::{BareFrame, Frame};
pub use book_frame::BookFrame;
pub use border::{BorderResponse, ClickCallback, FrameBorder, FrameDecoration, NoDecoration};
pub use entry::{FrameEntry, HorizontalSpacer};
pub use focus_handler::{EventPredicate, FocusNavigation, FrameFocusHandler};
