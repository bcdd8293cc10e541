//! Prelude module for Trellis.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut tree = WidgetTree::new();
//! let frame = tree.insert_container(Frame::with_title("Options"));
//! assert!(tree.is_container(frame));
//! ```

// ============================================================================
// Errors and Handles
// ============================================================================

pub use crate::error::{Error, Result};
pub use trellis_core::{InstanceKey, ItemKey, WidgetId};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    Container, FlagsReceiver, FocusWidget, GeometryUpdate, Widget, WidgetBase, WidgetTree,
};
pub use crate::widget::{Event, Key, KeyboardModifiers, MouseButton};

// ============================================================================
// Widgets and Frames
// ============================================================================

pub use crate::frame::{BareFrame, BookFrame, FocusNavigation, Frame, WidgetAdder};
pub use crate::widget::widgets::{TextArea, TextButton};

// ============================================================================
// Rendering and Styling
// ============================================================================

pub use trellis_render::{
    Color, FontMetrics, MonospaceMetrics, Point, Rect, RecordingRenderer, SharedFont, Size,
    WidgetRenderer,
};
pub use trellis_style::{StyleMap, default_styles};
