//! Widget capabilities.
//!
//! There are two kinds of widgets in a [`WidgetTree`]:
//!
//! - **Leaf widgets** implement [`Widget`]. They never see the tree.
//! - **Containers** implement [`Container`]. Every operation receives the
//!   tree so the container can forward it to its children by [`WidgetId`].
//!
//! Keyboard focus is an optional extra capability, [`FocusWidget`], reached
//! through [`Widget::as_focus_widget_mut`].
//!
//! Whatever the kind, one contract holds: **moving a widget never changes
//! its size.** Layout sizes everything first and places it second; a widget
//! whose size depends on its location breaks that split and is reported as
//! [`Error::InvariantViolation`](crate::Error::InvariantViolation).

use std::any::Any;

use trellis_core::WidgetId;
use trellis_render::{Point, Rect, Size, WidgetRenderer};
use trellis_style::StyleMap;

use super::base::WidgetBase;
use super::events::Event;
use super::flags::GeometryUpdate;
use super::tree::WidgetTree;
use crate::error::{Error, Result};
use crate::frame::FrameEntry;

/// A leaf widget.
pub trait Widget: Any + Send + Sync {
    /// Shared geometry and flag state.
    fn widget_base(&self) -> &WidgetBase;

    /// Shared geometry and flag state, mutably.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Top-left corner in screen space.
    fn location(&self) -> Point {
        self.widget_base().location()
    }

    fn size(&self) -> Size {
        self.widget_base().size()
    }

    fn width(&self) -> i32 {
        self.size().width
    }

    fn height(&self) -> i32 {
        self.size().height
    }

    fn bounds(&self) -> Rect {
        Rect::from_parts(self.location(), self.size())
    }

    /// Move the widget. Must not change its size.
    fn set_location(&mut self, location: Point) {
        self.widget_base_mut().set_location(location);
    }

    /// Handle an input event.
    fn process_event(&mut self, _event: &Event) {}

    /// Read fonts, paddings and item keys from the style map.
    fn stylize(&mut self, styles: &StyleMap) -> Result<()>;

    /// Recompute the size from content.
    fn update_size(&mut self) {}

    /// Handle an individual update. Must not change the size.
    fn update_geometry(&mut self) {}

    /// Read and reset the pending update request.
    fn take_update_request(&mut self) -> GeometryUpdate {
        self.widget_base_mut().flags_mut().take()
    }

    /// Draw through `renderer`.
    fn draw(&self, renderer: &mut dyn WidgetRenderer);

    /// The focus capability, if this widget can hold keyboard focus.
    fn as_focus_widget(&self) -> Option<&dyn FocusWidget> {
        None
    }

    /// The focus capability, mutably.
    fn as_focus_widget_mut(&mut self) -> Option<&mut dyn FocusWidget> {
        None
    }
}

/// A widget that can hold keyboard focus and take part in the focus cycle.
pub trait FocusWidget {
    /// Handle an event while focused. Called before regular dispatch decides
    /// on a focus change.
    fn process_focus_event(&mut self, event: &Event);

    fn notify_focus_gained(&mut self);

    fn notify_focus_lost(&mut self);

    /// Read and reset the "focus requested" flag (set, for example, when the
    /// widget is clicked).
    fn take_focus_request(&mut self) -> bool;

    fn has_focus(&self) -> bool;
}

/// A widget that owns and lays out children.
///
/// Children are referenced by [`WidgetId`]; their storage stays in the
/// [`WidgetTree`]. While a container method runs, the container itself is
/// checked out of the tree, so the tree it receives can be used freely for
/// any *other* widget.
pub trait Container: Any + Send + Sync {
    fn location(&self) -> Point;

    fn size(&self) -> Size;

    fn bounds(&self) -> Rect {
        Rect::from_parts(self.location(), self.size())
    }

    /// Every child this container references, in order.
    fn children(&self) -> Vec<WidgetId>;

    /// Move the container and place its visible children. Must not change
    /// the container's size.
    fn set_location(&mut self, tree: &mut WidgetTree, location: Point) -> Result<()>;

    /// Size the children bottom-up, then size the container to fit.
    fn update_size(&mut self, tree: &mut WidgetTree) -> Result<()>;

    /// Handle an individual update: re-place children without resizing.
    fn update_geometry(&mut self, tree: &mut WidgetTree) -> Result<()>;

    /// Make `size` a lower bound for the next `update_size`, or clear it.
    ///
    /// Reserved for the owning container. A bound the application set on the
    /// container itself must survive `force_size(None)`.
    fn force_size(&mut self, size: Option<Size>);

    fn process_event(&mut self, tree: &mut WidgetTree, event: &Event) -> Result<()>;

    fn stylize(&mut self, tree: &mut WidgetTree, styles: &StyleMap) -> Result<()>;

    /// Poll the container and its visible children for update requests.
    ///
    /// Individual requests from children are resolved here; the result is
    /// the level this container needs from its own owner.
    fn take_update_request(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate>;

    fn draw(&self, tree: &WidgetTree, renderer: &mut dyn WidgetRenderer) -> Result<()>;

    /// Append the focus-capable widgets of the visible subtree, in order.
    fn collect_focus_widgets(&self, tree: &WidgetTree, out: &mut Vec<WidgetId>) -> Result<()>;

    /// Drop this container's own focus list (nested containers do not cycle
    /// focus themselves; the root does it for the whole family).
    fn clear_focus_widgets(&mut self);

    /// Run whatever geometry work is pending, as the root of a family.
    ///
    /// Returns the level that was handled. On failure a whole-family pass
    /// stays pending, so the next call retries it.
    fn check_for_geometry_updates(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate>;

    /// Replace the child list with `entries`. Called by
    /// [`WidgetTree::finalize_widgets`] after the list has been validated.
    fn finalize_widgets(&mut self, _tree: &mut WidgetTree, _entries: Vec<FrameEntry>) -> Result<()> {
        Err(Error::Unsupported)
    }
}
