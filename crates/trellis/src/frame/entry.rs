//! Entries of a frame's widget list.

use trellis_core::WidgetId;
use trellis_render::Point;

/// One entry of a frame's ordered widget list.
///
/// Spacers and line separators are owned by the frame; only regular widgets
/// live in the [`WidgetTree`](crate::widget::WidgetTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameEntry {
    /// A widget stored in the tree.
    Widget(WidgetId),
    /// The frame's horizontal spacer with this index.
    HorizontalSpacer(usize),
    /// Ends the current layout line.
    LineSeparator,
}

impl FrameEntry {
    /// The widget handle, for [`FrameEntry::Widget`] entries.
    #[inline]
    pub fn widget(&self) -> Option<WidgetId> {
        match self {
            Self::Widget(id) => Some(*id),
            _ => None,
        }
    }
}

/// A frame-owned spacer that absorbs leftover horizontal space on its line.
///
/// Its natural width is zero; the frame assigns `width` during the spacer
/// distribution pass and `location` during placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalSpacer {
    pub width: i32,
    pub location: Point,
}
