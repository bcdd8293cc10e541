//! Frames: flow-layout containers.

use trellis_core::logging::{span_names, targets};
use trellis_core::{InstanceKey, WidgetId};
use trellis_render::{Point, Rect, Size, WidgetRenderer};
use trellis_style::{StyleMap, keys};

use super::border::{FrameBorder, FrameDecoration, NoDecoration};
use super::entry::{FrameEntry, HorizontalSpacer};
use super::focus_handler::{FocusNavigation, FrameFocusHandler};
use super::layout::{self, LayoutItem};
use crate::error::{Error, Result};
use crate::widget::{Container, Event, FlagsReceiver, GeometryUpdate, WidgetFlags, WidgetTree};

/// A frame with a border, title bar and drag-to-move.
pub type Frame = BareFrame<FrameBorder>;

/// A container that lays its children out in wrapping lines.
///
/// Children are committed through a [`WidgetAdder`](super::WidgetAdder):
///
/// ```
/// use trellis::frame::BareFrame;
/// use trellis::widget::WidgetTree;
/// use trellis::widget::widgets::TextArea;
///
/// let mut tree = WidgetTree::new();
/// let frame = tree.insert_container(BareFrame::new());
/// let name = tree.insert(TextArea::new("Name"));
/// let value = tree.insert(TextArea::new("Value"));
///
/// tree.begin_adding_widgets(frame)
///     .add(name)
///     .add_horizontal_spacer()
///     .add(value)
///     .finish()
///     .unwrap();
///
/// assert_eq!(tree.parent(name), Some(frame));
/// ```
///
/// Before drawing, the host calls
/// [`WidgetTree::check_for_geometry_updates`] on the root frame once per
/// tick. A pass runs only when something asked for one: the child list
/// changed, a child's size may have changed, or the frame was dragged.
pub struct BareFrame<D: FrameDecoration = NoDecoration> {
    instance: InstanceKey,
    location: Point,
    size: Size,
    padding: i32,
    entries: Vec<FrameEntry>,
    spacers: Vec<HorizontalSpacer>,
    placements: Vec<(WidgetId, Rect)>,
    fixed_width: Option<i32>,
    minimum_size: Option<Size>,
    /// Set by the owning container, apart from `minimum_size`.
    forced_size: Option<Size>,
    decoration: D,
    focus_handler: FrameFocusHandler,
    flags: WidgetFlags,
}

impl BareFrame {
    /// An undecorated frame.
    pub fn new() -> Self {
        Self::with_decoration(NoDecoration)
    }
}

impl Frame {
    /// A bordered frame with a title bar.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self::with_decoration(FrameBorder::with_title(title))
    }

    pub fn title(&self) -> &str {
        self.decoration.title()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.decoration.set_title(title);
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.decoration.set_movable(movable);
    }

    /// Keep the frame inside `area` while it is dragged.
    pub fn set_drag_constraint(&mut self, area: Option<Rect>) -> Result<()> {
        self.decoration.set_drag_constraint(area)
    }

    /// Register a click handler. Returning `true` from it keeps the click
    /// away from the frame's children and focus handler.
    pub fn set_click_callback(&mut self, callback: impl FnMut(Point) -> bool + Send + Sync + 'static) {
        self.decoration.set_click_callback(callback);
    }
}

impl<D: FrameDecoration + Default> Default for BareFrame<D> {
    fn default() -> Self {
        Self::with_decoration(D::default())
    }
}

impl<D: FrameDecoration> BareFrame<D> {
    /// A frame with the given decoration.
    pub fn with_decoration(decoration: D) -> Self {
        let mut flags = WidgetFlags::new();
        flags.receive_whole_family_update_needed();
        Self {
            instance: InstanceKey::next(),
            location: Point::ZERO,
            size: Size::ZERO,
            padding: 0,
            entries: Vec::new(),
            spacers: Vec::new(),
            placements: Vec::new(),
            fixed_width: None,
            minimum_size: None,
            forced_size: None,
            decoration,
            focus_handler: FrameFocusHandler::new(),
            flags,
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    #[inline]
    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Set the padding between widgets, lines and the border.
    ///
    /// Overwritten by the next `stylize`.
    pub fn set_padding(&mut self, padding: i32) -> Result<()> {
        if padding < 0 {
            return Err(Error::invalid_argument(format!(
                "padding must not be negative, got {padding}"
            )));
        }
        self.padding = padding;
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    #[inline]
    pub fn fixed_width(&self) -> Option<i32> {
        self.fixed_width
    }

    /// Pin the frame width, wrapping lines that do not fit; `None` sizes the
    /// frame to its widest line.
    pub fn set_fixed_width(&mut self, width: Option<i32>) -> Result<()> {
        if let Some(width) = width
            && width <= 0
        {
            return Err(Error::invalid_argument(format!(
                "fixed width must be positive, got {width}"
            )));
        }
        self.fixed_width = width;
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    /// Make `size` a lower bound for the frame size.
    ///
    /// Combined with any size an owner such as a [`BookFrame`](super::BookFrame)
    /// forces; the owner cannot clear it.
    pub fn set_forced_size(&mut self, size: Option<Size>) {
        self.minimum_size = size;
        self.flags.receive_whole_family_update_needed();
    }

    pub fn set_focus_navigation(&mut self, navigation: FocusNavigation) {
        self.focus_handler.set_navigation(navigation);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The committed widget list.
    #[inline]
    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    /// The frame's spacers, by index.
    #[inline]
    pub fn spacers(&self) -> &[HorizontalSpacer] {
        &self.spacers
    }

    /// The width assigned to every spacer by the last pass.
    pub fn spacer_widths(&self) -> Vec<i32> {
        self.spacers.iter().map(|spacer| spacer.width).collect()
    }

    /// Every placed child with its bounds, from the last pass.
    #[inline]
    pub fn placements(&self) -> &[(WidgetId, Rect)] {
        &self.placements
    }

    /// The bounding box of the placed children.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.placements
            .iter()
            .map(|(_, bounds)| *bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    #[inline]
    pub fn focus_handler(&self) -> &FrameFocusHandler {
        &self.focus_handler
    }

    /// The widget holding focus in this frame's family, if this frame is the
    /// root of one.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focus_handler.focused_widget()
    }

    #[inline]
    pub fn decoration(&self) -> &D {
        &self.decoration
    }

    #[inline]
    pub fn decoration_mut(&mut self) -> &mut D {
        &mut self.decoration
    }

    #[inline]
    pub fn instance(&self) -> InstanceKey {
        self.instance
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn widget_ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.entries.iter().filter_map(FrameEntry::widget)
    }

    fn layout_items(&self, tree: &WidgetTree) -> Result<Vec<LayoutItem>> {
        self.entries
            .iter()
            .map(|entry| {
                Ok(match *entry {
                    FrameEntry::Widget(id) => LayoutItem::Widget(tree.size(id)?),
                    FrameEntry::HorizontalSpacer(index) => LayoutItem::Spacer(index),
                    FrameEntry::LineSeparator => LayoutItem::LineBreak,
                })
            })
            .collect()
    }

    /// Top-left corner of the first line.
    fn widget_start(&self) -> Point {
        self.location
            + Point::new(
                self.padding,
                self.decoration.title_bar_height() + self.padding,
            )
    }

    /// Room for widgets on one line: the frame width minus the left border.
    fn available_width(&self) -> i32 {
        self.size.width - self.padding
    }

    fn compute_size(&self, items: &[LayoutItem]) -> Size {
        let padding = self.padding;
        let title_height = self.decoration.title_bar_height();
        let minimum_width = self.decoration.minimum_width(padding);
        let forced = self
            .minimum_size
            .unwrap_or(Size::ZERO)
            .max(self.forced_size.unwrap_or(Size::ZERO));
        let bound = self.fixed_width.map(|width| width.max(forced.width));

        let mut size = if items.is_empty() {
            Size::new(minimum_width, title_height)
        } else {
            let measured = layout::measure(items, padding, bound.map(|width| width - padding));
            Size::new(
                (padding + measured.width).max(minimum_width),
                title_height + padding + measured.height,
            )
        };
        if let Some(width) = bound {
            size.width = width;
        }
        size.max(forced)
    }

    /// Move every child to its computed location.
    fn place_children(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let items = self.layout_items(tree)?;
        let spacer_widths = self.spacer_widths();
        let placement = layout::place(
            &items,
            self.padding,
            self.available_width(),
            &spacer_widths,
            self.widget_start(),
        );

        self.placements.clear();
        for (entry, position) in self.entries.iter().zip(placement.positions) {
            let Some(position) = position else {
                continue;
            };
            match *entry {
                FrameEntry::Widget(id) => {
                    let before = tree.size(id)?;
                    tree.set_location(id, position)?;
                    let after = tree.size(id)?;
                    if before != after {
                        let err = Error::invariant(format!(
                            "widget {id:?} changed size from {before:?} to {after:?} when moved"
                        ));
                        tracing::error!(target: targets::LAYOUT, %err, "placement failed");
                        return Err(err);
                    }
                    tracing::trace!(target: targets::LAYOUT, ?id, ?position, "placed widget");
                    self.placements.push((id, Rect::from_parts(position, after)));
                }
                FrameEntry::HorizontalSpacer(index) => {
                    if let Some(spacer) = self.spacers.get_mut(index) {
                        spacer.location = position;
                    }
                }
                FrameEntry::LineSeparator => {}
            }
        }
        Ok(())
    }

    fn run_geometry_pass(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let span = tracing::debug_span!(span_names::GEOMETRY_PASS, instance = self.instance.as_raw());
        let _guard = span.enter();
        self.update_size(tree)?;
        self.set_location(tree, self.location)?;
        tracing::debug!(target: targets::LAYOUT, size = ?self.size, "geometry pass complete");
        Ok(())
    }

    /// Resolve individual requests from the children and fold the rest into
    /// `level`.
    fn poll_children(
        &mut self,
        tree: &mut WidgetTree,
        mut level: GeometryUpdate,
    ) -> Result<GeometryUpdate> {
        let children: Vec<WidgetId> = self.widget_ids().collect();
        for id in children {
            match tree.take_update_request(id)? {
                GeometryUpdate::Individual => {
                    let before = tree.size(id)?;
                    tree.update_geometry(id)?;
                    let after = tree.size(id)?;
                    if before != after {
                        let err = Error::invariant(format!(
                            "widget {id:?} changed size from {before:?} to {after:?} in an individual update"
                        ));
                        tracing::error!(target: targets::LAYOUT, %err, "individual update failed");
                        return Err(err);
                    }
                    level = level.max(GeometryUpdate::Redraw);
                }
                child => level = level.max(child),
            }
        }
        Ok(level)
    }

    fn refresh_focus_widgets(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let mut widgets = Vec::new();
        self.collect_focus_widgets(tree, &mut widgets)?;
        self.focus_handler.refresh(tree, widgets)
    }
}

impl<D: FrameDecoration> Container for BareFrame<D> {
    fn location(&self) -> Point {
        self.location
    }

    fn size(&self) -> Size {
        self.size
    }

    fn children(&self) -> Vec<WidgetId> {
        self.widget_ids().collect()
    }

    fn set_location(&mut self, tree: &mut WidgetTree, location: Point) -> Result<()> {
        self.location = location;
        self.decoration.set_bounds(Rect::from_parts(location, self.size));
        self.place_children(tree)
    }

    fn update_size(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let children: Vec<WidgetId> = self.widget_ids().collect();
        for id in children {
            tree.update_size(id)?;
        }

        let items = self.layout_items(tree)?;
        self.size = self.compute_size(&items);
        self.decoration.set_bounds(Rect::from_parts(self.location, self.size));

        let distribution = layout::distribute_spacers(
            &items,
            self.padding,
            self.available_width(),
            self.spacers.len(),
        );
        for (spacer, width) in self.spacers.iter_mut().zip(distribution.widths) {
            spacer.width = width;
        }
        tracing::debug!(target: targets::LAYOUT, size = ?self.size, "frame sized");
        Ok(())
    }

    fn update_geometry(&mut self, tree: &mut WidgetTree) -> Result<()> {
        self.set_location(tree, self.location)
    }

    fn force_size(&mut self, size: Option<Size>) {
        self.forced_size = size;
    }

    fn process_event(&mut self, tree: &mut WidgetTree, event: &Event) -> Result<()> {
        let span = tracing::trace_span!(span_names::EVENT_DISPATCH);
        let _guard = span.enter();

        let response = self.decoration.process_event(event);
        if let Some(location) = response.moved_to {
            self.location = location;
            self.flags.receive_whole_family_update_needed();
        }
        if response.skip_other_events {
            return Ok(());
        }

        let children: Vec<WidgetId> = self.widget_ids().collect();
        for id in children {
            tree.process_event(id, event)?;
        }
        self.focus_handler.process_event(tree, event)
    }

    fn stylize(&mut self, tree: &mut WidgetTree, styles: &StyleMap) -> Result<()> {
        let span = tracing::debug_span!(span_names::STYLIZE, instance = self.instance.as_raw());
        let _guard = span.enter();

        self.padding = styles.require_non_negative(&keys::fallback_chain(
            keys::roles::FRAME,
            keys::fields::PADDING,
        ))?;
        self.decoration.stylize(styles)?;
        let children: Vec<WidgetId> = self.widget_ids().collect();
        for id in children {
            tree.stylize(id, styles)?;
        }
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    fn take_update_request(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate> {
        let level = self.flags.take().max(self.decoration.take_update_request());
        self.poll_children(tree, level).inspect_err(|_| {
            // The request was taken; keep a pass pending for the retry.
            self.flags.receive_whole_family_update_needed();
        })
    }

    fn draw(&self, tree: &WidgetTree, renderer: &mut dyn WidgetRenderer) -> Result<()> {
        self.decoration.draw(renderer, self.instance);
        for id in self.widget_ids() {
            tree.draw(id, renderer)?;
        }
        Ok(())
    }

    fn collect_focus_widgets(&self, tree: &WidgetTree, out: &mut Vec<WidgetId>) -> Result<()> {
        for id in self.widget_ids() {
            tree.collect_focus_widgets(id, out)?;
        }
        Ok(())
    }

    fn clear_focus_widgets(&mut self) {
        self.focus_handler.clear_focus_widgets();
    }

    fn check_for_geometry_updates(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate> {
        let level = self.take_update_request(tree)?;
        let result = match level {
            GeometryUpdate::WholeFamily => self.run_geometry_pass(tree),
            GeometryUpdate::Individual => self.update_geometry(tree),
            GeometryUpdate::Redraw | GeometryUpdate::None => Ok(()),
        };
        if let Err(err) = result {
            self.flags.raise(level);
            return Err(err);
        }
        if level.needs_redraw() {
            self.refresh_focus_widgets(tree)?;
        }
        Ok(level)
    }

    fn finalize_widgets(&mut self, _tree: &mut WidgetTree, entries: Vec<FrameEntry>) -> Result<()> {
        let spacer_count = entries
            .iter()
            .filter(|entry| matches!(entry, FrameEntry::HorizontalSpacer(_)))
            .count();
        for entry in &entries {
            if let FrameEntry::HorizontalSpacer(index) = entry
                && *index >= spacer_count
            {
                return Err(Error::invalid_argument(format!(
                    "spacer index {index} out of range for {spacer_count} spacers"
                )));
            }
        }

        self.entries = entries;
        self.spacers = vec![HorizontalSpacer::default(); spacer_count];
        self.placements.clear();
        self.flags.receive_whole_family_update_needed();
        tracing::debug!(
            target: targets::LAYOUT,
            entries = self.entries.len(),
            spacers = spacer_count,
            "committed widget list"
        );
        Ok(())
    }
}

static_assertions::assert_impl_all!(BareFrame: Send, Sync);
static_assertions::assert_impl_all!(Frame: Send, Sync);
