//! State shared by every leaf widget.

use trellis_core::InstanceKey;
use trellis_render::{Point, Rect, Size};

use super::flags::{FlagsReceiver, WidgetFlags};
use crate::error::{Error, Result};

/// Location, size and pending update requests of a leaf widget.
///
/// Leaf widgets embed a `WidgetBase` and hand it out through
/// [`Widget::widget_base`](super::Widget::widget_base); the trait's default
/// methods read and write geometry through it.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    instance: InstanceKey,
    location: Point,
    size: Size,
    fixed_size: Option<Size>,
    flags: WidgetFlags,
}

impl WidgetBase {
    /// Create a base at the origin with zero size.
    ///
    /// A whole-family update is pending so the first poll lays the widget out.
    pub fn new() -> Self {
        let mut flags = WidgetFlags::new();
        flags.receive_whole_family_update_needed();
        Self {
            instance: InstanceKey::next(),
            location: Point::ZERO,
            size: Size::ZERO,
            fixed_size: None,
            flags,
        }
    }

    /// The renderer-side instance key of this widget.
    #[inline]
    pub fn instance(&self) -> InstanceKey {
        self.instance
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Move the widget. Never touches the size.
    #[inline]
    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.location, self.size)
    }

    /// The fixed size, if the widget ignores its content size.
    #[inline]
    pub fn fixed_size(&self) -> Option<Size> {
        self.fixed_size
    }

    /// Pin the widget to `width` x `height`, or return to content sizing with `None`.
    pub fn set_fixed_size(&mut self, size: Option<(i32, i32)>) -> Result<()> {
        self.fixed_size = match size {
            Some((width, height)) => Some(
                Size::try_new(width, height).map_err(|err| Error::invalid_argument(err.to_string()))?,
            ),
            None => None,
        };
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    /// Adopt `natural` as the size unless a fixed size is set.
    pub fn resolve_size(&mut self, natural: Size) {
        self.size = self.fixed_size.unwrap_or(natural);
    }

    #[inline]
    pub fn flags(&self) -> &WidgetFlags {
        &self.flags
    }

    #[inline]
    pub fn flags_mut(&mut self) -> &mut WidgetFlags {
        &mut self.flags
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}
