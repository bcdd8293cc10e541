//! The widget arena.
//!
//! The application owns a [`WidgetTree`], inserts widgets into it and keeps
//! the returned [`WidgetId`] handles. Containers reference their children by
//! handle only, so a container can never outlive or dangle into the storage
//! of its children: a removed widget simply stops being found.
//!
//! # Checkout
//!
//! Container operations need `&mut self` on the container *and* `&mut` on
//! the tree (to reach children). [`WidgetTree::with_container`] takes the
//! container out of its slot for the duration of the call and puts it back
//! afterwards. Reaching a checked-out container again from inside the call
//! yields [`Error::WidgetBusy`].

use std::any::{Any, type_name};
use std::collections::HashSet;
use std::fmt;

use slotmap::{SecondaryMap, SlotMap};
use trellis_core::WidgetId;
use trellis_core::logging::targets;
use trellis_render::{Point, Rect, Size, WidgetRenderer};
use trellis_style::StyleMap;

use super::events::Event;
use super::flags::GeometryUpdate;
use super::traits::{Container, FocusWidget, Widget};
use crate::error::{Error, Result};
use crate::frame::{FrameEntry, WidgetAdder};

enum Slot {
    Widget(Box<dyn Widget>),
    Container(Box<dyn Container>),
    /// A container currently checked out by [`WidgetTree::with_container`].
    Borrowed,
}

/// Arena storage for every widget of an application.
#[derive(Default)]
pub struct WidgetTree {
    slots: SlotMap<WidgetId, Slot>,
    parents: SecondaryMap<WidgetId, WidgetId>,
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.slots.len())
            .field("parent_links", &self.parents.len())
            .finish()
    }
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a leaf widget.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        let id = self.slots.insert(Slot::Widget(Box::new(widget)));
        tracing::trace!(target: targets::TREE, ?id, kind = type_name::<W>(), "inserted widget");
        id
    }

    /// Store a container.
    pub fn insert_container<C: Container>(&mut self, container: C) -> WidgetId {
        let id = self.slots.insert(Slot::Container(Box::new(container)));
        tracing::trace!(target: targets::TREE, ?id, kind = type_name::<C>(), "inserted container");
        id
    }

    /// Remove a widget. Containers still listing it will report
    /// [`Error::WidgetNotFound`] until their list is replaced.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        match self.slots.get(id) {
            None => return Err(Error::WidgetNotFound(id)),
            Some(Slot::Borrowed) => return Err(Error::WidgetBusy(id)),
            Some(_) => {}
        }
        let children = self.children(id)?;
        self.slots.remove(id);
        self.parents.remove(id);
        for child in children {
            if self.parents.get(child) == Some(&id) {
                self.parents.remove(child);
            }
        }
        tracing::trace!(target: targets::TREE, ?id, "removed widget");
        Ok(())
    }

    /// Whether `id` refers to a stored widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.slots.contains_key(id)
    }

    /// Whether `id` refers to a stored container.
    pub fn is_container(&self, id: WidgetId) -> bool {
        matches!(self.slots.get(id), Some(Slot::Container(_) | Slot::Borrowed))
    }

    /// Number of stored widgets.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: WidgetId) -> Result<&Slot> {
        self.slots.get(id).ok_or(Error::WidgetNotFound(id))
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    /// Borrow a leaf widget as its concrete type.
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Result<&W> {
        match self.slot(id)? {
            Slot::Widget(widget) => {
                let any: &dyn Any = &**widget;
                any.downcast_ref::<W>().ok_or(Error::WrongWidgetType {
                    id,
                    expected: type_name::<W>(),
                })
            }
            Slot::Container(_) => Err(Error::WrongWidgetType {
                id,
                expected: type_name::<W>(),
            }),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    /// Mutably borrow a leaf widget as its concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Result<&mut W> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                let any: &mut dyn Any = &mut **widget;
                any.downcast_mut::<W>().ok_or(Error::WrongWidgetType {
                    id,
                    expected: type_name::<W>(),
                })
            }
            Some(Slot::Container(_)) => Err(Error::WrongWidgetType {
                id,
                expected: type_name::<W>(),
            }),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Borrow a container as its concrete type.
    pub fn container<C: Container>(&self, id: WidgetId) -> Result<&C> {
        match self.slot(id)? {
            Slot::Container(container) => {
                let any: &dyn Any = &**container;
                any.downcast_ref::<C>().ok_or(Error::WrongWidgetType {
                    id,
                    expected: type_name::<C>(),
                })
            }
            Slot::Widget(_) => Err(Error::WrongWidgetType {
                id,
                expected: type_name::<C>(),
            }),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    /// Mutably borrow a container as its concrete type.
    ///
    /// Use this for settings that do not touch children (padding, titles,
    /// page flips). Operations that need the children go through
    /// [`with_container_as`](Self::with_container_as).
    pub fn container_mut<C: Container>(&mut self, id: WidgetId) -> Result<&mut C> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Container(container)) => {
                let any: &mut dyn Any = &mut **container;
                any.downcast_mut::<C>().ok_or(Error::WrongWidgetType {
                    id,
                    expected: type_name::<C>(),
                })
            }
            Some(Slot::Widget(_)) => Err(Error::WrongWidgetType {
                id,
                expected: type_name::<C>(),
            }),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Check a container out of the tree and run `f` on it.
    pub fn with_container<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut (dyn Container + 'static), &mut WidgetTree) -> Result<R>,
    ) -> Result<R> {
        let slot = self.slots.get_mut(id).ok_or(Error::WidgetNotFound(id))?;
        let mut container = match std::mem::replace(slot, Slot::Borrowed) {
            Slot::Container(container) => container,
            Slot::Borrowed => return Err(Error::WidgetBusy(id)),
            widget @ Slot::Widget(_) => {
                *slot = widget;
                return Err(Error::WrongWidgetType {
                    id,
                    expected: "container",
                });
            }
        };
        let result = f(container.as_mut(), self);
        if let Some(slot) = self.slots.get_mut(id) {
            *slot = Slot::Container(container);
        }
        result
    }

    /// Check a container out as its concrete type and run `f` on it.
    pub fn with_container_as<C: Container, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut C, &mut WidgetTree) -> Result<R>,
    ) -> Result<R> {
        self.with_container(id, |container, tree| {
            let any: &mut dyn Any = container;
            let typed = any.downcast_mut::<C>().ok_or(Error::WrongWidgetType {
                id,
                expected: type_name::<C>(),
            })?;
            f(typed, tree)
        })
    }

    /// The focus capability of a leaf widget.
    pub fn focus_widget_mut(&mut self, id: WidgetId) -> Result<&mut dyn FocusWidget> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                widget.as_focus_widget_mut().ok_or(Error::WrongWidgetType {
                    id,
                    expected: "focus widget",
                })
            }
            Some(Slot::Container(_)) => Err(Error::WrongWidgetType {
                id,
                expected: "focus widget",
            }),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    // =========================================================================
    // Geometry and family queries
    // =========================================================================

    pub fn location(&self, id: WidgetId) -> Result<Point> {
        match self.slot(id)? {
            Slot::Widget(widget) => Ok(widget.location()),
            Slot::Container(container) => Ok(container.location()),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn size(&self, id: WidgetId) -> Result<Size> {
        match self.slot(id)? {
            Slot::Widget(widget) => Ok(widget.size()),
            Slot::Container(container) => Ok(container.size()),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn bounds(&self, id: WidgetId) -> Result<Rect> {
        Ok(Rect::from_parts(self.location(id)?, self.size(id)?))
    }

    /// The container `id` was last committed into, if any.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parents.get(id).copied()
    }

    /// The children of a container; empty for leaf widgets.
    pub fn children(&self, id: WidgetId) -> Result<Vec<WidgetId>> {
        match self.slot(id)? {
            Slot::Widget(_) => Ok(Vec::new()),
            Slot::Container(container) => Ok(container.children()),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    /// Whether `target` is reachable from `root` through child links.
    pub fn contains_descendant(&self, root: WidgetId, target: WidgetId) -> Result<bool> {
        let mut visited = HashSet::new();
        let mut stack = self.children(root)?;
        while let Some(id) = stack.pop() {
            if id == target {
                return Ok(true);
            }
            if visited.insert(id) && self.contains(id) {
                stack.extend(self.children(id)?);
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Move a widget. A container places its children as well.
    pub fn set_location(&mut self, id: WidgetId, location: Point) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                widget.set_location(location);
                Ok(())
            }
            Some(Slot::Container(_)) => {
                self.with_container(id, |c, tree| c.set_location(tree, location))
            }
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn update_size(&mut self, id: WidgetId) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                widget.update_size();
                Ok(())
            }
            Some(Slot::Container(_)) => self.with_container(id, |c, tree| c.update_size(tree)),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn update_geometry(&mut self, id: WidgetId) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                widget.update_geometry();
                Ok(())
            }
            Some(Slot::Container(_)) => {
                self.with_container(id, |c, tree| c.update_geometry(tree))
            }
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Set or clear the forced size of a container.
    pub fn force_size(&mut self, id: WidgetId, size: Option<Size>) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Container(container)) => {
                container.force_size(size);
                Ok(())
            }
            Some(Slot::Widget(_)) => Err(Error::WrongWidgetType {
                id,
                expected: "container",
            }),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn process_event(&mut self, id: WidgetId, event: &Event) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => {
                widget.process_event(event);
                Ok(())
            }
            Some(Slot::Container(_)) => {
                self.with_container(id, |c, tree| c.process_event(tree, event))
            }
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Apply `styles` to a widget and, for containers, to its children.
    pub fn stylize(&mut self, id: WidgetId, styles: &StyleMap) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => widget.stylize(styles),
            Some(Slot::Container(_)) => self.with_container(id, |c, tree| c.stylize(tree, styles)),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Poll a widget for its pending update request.
    pub fn take_update_request(&mut self, id: WidgetId) -> Result<GeometryUpdate> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Widget(widget)) => Ok(widget.take_update_request()),
            Some(Slot::Container(_)) => {
                self.with_container(id, |c, tree| c.take_update_request(tree))
            }
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    pub fn draw(&self, id: WidgetId, renderer: &mut dyn WidgetRenderer) -> Result<()> {
        match self.slot(id)? {
            Slot::Widget(widget) => {
                widget.draw(renderer);
                Ok(())
            }
            Slot::Container(container) => container.draw(self, renderer),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    /// Append the focus-capable widgets at or below `id`.
    pub fn collect_focus_widgets(&self, id: WidgetId, out: &mut Vec<WidgetId>) -> Result<()> {
        match self.slot(id)? {
            Slot::Widget(widget) => {
                if widget.as_focus_widget().is_some() {
                    out.push(id);
                }
                Ok(())
            }
            Slot::Container(container) => container.collect_focus_widgets(self, out),
            Slot::Borrowed => Err(Error::WidgetBusy(id)),
        }
    }

    /// Drop a container's own focus list. No-op for leaf widgets.
    pub fn clear_focus_widgets(&mut self, id: WidgetId) -> Result<()> {
        match self.slots.get_mut(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(Slot::Container(container)) => {
                container.clear_focus_widgets();
                Ok(())
            }
            Some(Slot::Widget(_)) => Ok(()),
            Some(Slot::Borrowed) => Err(Error::WidgetBusy(id)),
        }
    }

    /// Run pending geometry work for the family rooted at `root`.
    ///
    /// Call once per tick, before drawing. Returns the level that was
    /// handled, so hosts can skip redrawing when nothing changed.
    ///
    /// Any pass that reaches a redraw recollects the focus widgets. Focus
    /// survives it when the collected list is unchanged; otherwise nothing
    /// holds focus until the next focus request or advance.
    pub fn check_for_geometry_updates(&mut self, root: WidgetId) -> Result<GeometryUpdate> {
        self.with_container(root, |c, tree| c.check_for_geometry_updates(tree))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Start building the child list of `frame`.
    pub fn begin_adding_widgets(&mut self, frame: WidgetId) -> WidgetAdder<'_> {
        WidgetAdder::new(self, frame)
    }

    /// Validate and commit a child list into the container `frame`.
    ///
    /// Fails with [`Error::SelfContainment`] if any child is `frame` or
    /// (transitively) contains it. On success every child's parent becomes
    /// `frame` and nested containers drop their own focus lists.
    pub fn finalize_widgets(&mut self, frame: WidgetId, entries: Vec<FrameEntry>) -> Result<()> {
        let children: Vec<WidgetId> = entries.iter().filter_map(|entry| entry.widget()).collect();
        self.check_adoption(frame, &children)?;
        let previous = self.children(frame)?;
        self.with_container(frame, |container, tree| container.finalize_widgets(tree, entries))?;
        self.adopt(frame, &previous, &children)
    }

    /// Check that `parent` may take `children`: each exists, appears once,
    /// and does not contain `parent`.
    pub(crate) fn check_adoption(&self, parent: WidgetId, children: &[WidgetId]) -> Result<()> {
        if !self.is_container(parent) {
            return Err(if self.contains(parent) {
                Error::WrongWidgetType {
                    id: parent,
                    expected: "container",
                }
            } else {
                Error::WidgetNotFound(parent)
            });
        }
        let mut seen = HashSet::new();
        for &child in children {
            if !self.contains(child) {
                return Err(Error::WidgetNotFound(child));
            }
            if child == parent || self.contains_descendant(child, parent)? {
                let err = Error::SelfContainment {
                    frame: parent,
                    child,
                };
                tracing::error!(target: targets::TREE, %err, "rejected widget list");
                return Err(err);
            }
            if !seen.insert(child) {
                return Err(Error::invalid_argument(format!(
                    "widget {child:?} was added more than once"
                )));
            }
        }
        Ok(())
    }

    /// Point parent links at `parent` for `children`, dropping links from
    /// `previous` children that were not kept.
    pub(crate) fn adopt(
        &mut self,
        parent: WidgetId,
        previous: &[WidgetId],
        children: &[WidgetId],
    ) -> Result<()> {
        for &old in previous {
            if self.parents.get(old) == Some(&parent) {
                self.parents.remove(old);
                // A released container keeps no size its old owner forced.
                if !children.contains(&old)
                    && matches!(self.slots.get(old), Some(Slot::Container(_)))
                {
                    self.force_size(old, None)?;
                }
            }
        }
        for &child in children {
            self.parents.insert(child, parent);
            self.clear_focus_widgets(child)?;
        }
        tracing::debug!(target: targets::TREE, ?parent, children = children.len(), "adopted children");
        Ok(())
    }
}

static_assertions::assert_impl_all!(WidgetTree: Send, Sync);
