//! Drag-to-move state.

use trellis_core::logging::targets;
use trellis_render::{Point, Rect, Size};

use crate::error::{Error, Result};

/// Tracks an in-progress drag of something located at a point.
///
/// The grab offset (pointer minus location at press time) is kept for the
/// whole drag, so the dragged item does not jump under the pointer. An
/// optional constraint rectangle keeps the item inside an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    grab_offset: Option<Point>,
    constraint: Option<Rect>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging an item at `location` grabbed at `pointer`.
    pub fn begin(&mut self, pointer: Point, location: Point) {
        self.grab_offset = Some(pointer - location);
        tracing::trace!(target: targets::EVENTS, ?pointer, ?location, "drag started");
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    /// The location an item of `size` should move to for `pointer`, or `None`
    /// when not dragging.
    pub fn drag_to(&self, pointer: Point, size: Size) -> Option<Point> {
        let offset = self.grab_offset?;
        let mut location = pointer - offset;
        if let Some(area) = self.constraint {
            location.x = clamp_axis(location.x, area.left(), area.right() - size.width);
            location.y = clamp_axis(location.y, area.top(), area.bottom() - size.height);
        }
        Some(location)
    }

    pub fn end(&mut self) {
        if self.grab_offset.take().is_some() {
            tracing::trace!(target: targets::EVENTS, "drag ended");
        }
    }

    #[inline]
    pub fn constraint(&self) -> Option<Rect> {
        self.constraint
    }

    /// Keep dragged items inside `area`, or lift the constraint with `None`.
    ///
    /// Fails with [`Error::InvalidArgument`] for a rectangle without area.
    pub fn set_constraint(&mut self, area: Option<Rect>) -> Result<()> {
        if let Some(rect) = area
            && rect.is_empty()
        {
            return Err(Error::invalid_argument(format!(
                "drag constraint must have a positive area, got {}x{}",
                rect.width(),
                rect.height()
            )));
        }
        self.constraint = area;
        Ok(())
    }
}

/// Clamp to `[low, high]`; an item larger than the area sticks to `low`.
fn clamp_axis(value: i32, low: i32, high: i32) -> i32 {
    value.min(high).max(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut drag = DragState::new();
        drag.begin(Point::new(15, 12), Point::new(10, 10));
        assert!(drag.is_dragging());
        assert_eq!(
            drag.drag_to(Point::new(105, 52), Size::new(50, 50)),
            Some(Point::new(100, 50))
        );
        drag.end();
        assert_eq!(drag.drag_to(Point::new(0, 0), Size::new(50, 50)), None);
    }

    #[test]
    fn test_drag_is_clamped_to_constraint() {
        let mut drag = DragState::new();
        drag.set_constraint(Some(Rect::new(0, 0, 200, 100))).unwrap();
        drag.begin(Point::ZERO, Point::ZERO);
        assert_eq!(
            drag.drag_to(Point::new(190, -20), Size::new(50, 30)),
            Some(Point::new(150, 0))
        );
    }

    #[test]
    fn test_zero_area_constraint_rejected() {
        let mut drag = DragState::new();
        assert!(matches!(
            drag.set_constraint(Some(Rect::new(0, 0, 0, 10))),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(drag.constraint(), None);
        assert!(drag.set_constraint(None).is_ok());
    }
}
