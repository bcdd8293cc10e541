//! Frame decorations: the optional border, title bar and drag handling.

use std::fmt;

use trellis_core::logging::targets;
use trellis_core::{InstanceKey, ItemKey};
use trellis_render::{Point, Rect, SharedFont, Size, TextRun, WidgetRenderer};
use trellis_style::{StyleMap, keys};

use crate::error::Result;
use crate::widget::{DragState, Event, FlagsReceiver, GeometryUpdate, MouseButton, WidgetFlags};

/// What a decoration did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderResponse {
    /// Children and the focus handler must not see this event.
    pub skip_other_events: bool,
    /// The frame was dragged to this location.
    pub moved_to: Option<Point>,
}

/// Decoration drawn around a frame's content.
///
/// The frame reserves `title_bar_height()` pixels above its content and
/// keeps its width at least `minimum_width(padding)`.
pub trait FrameDecoration: Send + Sync + 'static {
    /// Height reserved above the content.
    fn title_bar_height(&self) -> i32;

    /// Smallest frame width that fits the decoration.
    fn minimum_width(&self, padding: i32) -> i32;

    /// The frame's bounds changed; recompute decoration geometry.
    fn set_bounds(&mut self, bounds: Rect);

    fn process_event(&mut self, event: &Event) -> BorderResponse;

    fn stylize(&mut self, styles: &StyleMap) -> Result<()>;

    fn take_update_request(&mut self) -> GeometryUpdate;

    fn draw(&self, renderer: &mut dyn WidgetRenderer, instance: InstanceKey);
}

/// No decoration at all; the frame is just its content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl FrameDecoration for NoDecoration {
    fn title_bar_height(&self) -> i32 {
        0
    }

    fn minimum_width(&self, _padding: i32) -> i32 {
        0
    }

    fn set_bounds(&mut self, _bounds: Rect) {}

    fn process_event(&mut self, _event: &Event) -> BorderResponse {
        BorderResponse::default()
    }

    fn stylize(&mut self, _styles: &StyleMap) -> Result<()> {
        Ok(())
    }

    fn take_update_request(&mut self) -> GeometryUpdate {
        GeometryUpdate::None
    }

    fn draw(&self, _renderer: &mut dyn WidgetRenderer, _instance: InstanceKey) {}
}

/// Called with the pointer position when the frame is clicked; returning
/// `true` suppresses the rest of this event's processing for the frame.
pub type ClickCallback = Box<dyn FnMut(Point) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct BorderItems {
    border: ItemKey,
    title_bar: ItemKey,
    title_text: ItemKey,
}

#[derive(Debug, Clone)]
struct TitleFont {
    font: SharedFont,
    character_size: u32,
}

/// Width of the drawn border line, in pixels.
const BORDER_THICKNESS: i32 = 1;

/// A border with an optional title bar, drag-to-move and a click callback.
pub struct FrameBorder {
    title: String,
    font: Option<TitleFont>,
    padding: i32,
    items: Option<BorderItems>,
    bounds: Rect,
    drag: DragState,
    movable: bool,
    click_callback: Option<ClickCallback>,
    flags: WidgetFlags,
}

impl FrameBorder {
    /// An untitled border.
    pub fn new() -> Self {
        Self::with_title("")
    }

    /// A border with a title bar showing `title`.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            font: None,
            padding: 0,
            items: None,
            bounds: Rect::ZERO,
            drag: DragState::new(),
            movable: true,
            click_callback: None,
            flags: WidgetFlags::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title. The title bar may change size, so the frame family
    /// is laid out again.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.flags.receive_whole_family_update_needed();
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    /// Allow or forbid dragging the frame by its title bar.
    pub fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
        if !movable {
            self.drag.end();
        }
    }

    /// Keep the frame inside `area` while dragging.
    pub fn set_drag_constraint(&mut self, area: Option<Rect>) -> Result<()> {
        self.drag.set_constraint(area)
    }

    pub fn set_click_callback(&mut self, callback: impl FnMut(Point) -> bool + Send + Sync + 'static) {
        self.click_callback = Some(Box::new(callback));
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn is_titled(&self) -> bool {
        !self.title.is_empty() && self.font.is_some()
    }

    fn title_size(&self) -> Size {
        match &self.font {
            Some(font) if !self.title.is_empty() => font.font.measure(&self.title, font.character_size),
            _ => Size::ZERO,
        }
    }

    /// The title bar area, empty for untitled borders.
    pub fn title_bar(&self) -> Rect {
        Rect::from_parts(
            self.bounds.origin,
            Size::new(self.bounds.width(), self.title_bar_height()),
        )
    }
}

impl Default for FrameBorder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameBorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBorder")
            .field("title", &self.title)
            .field("bounds", &self.bounds)
            .field("movable", &self.movable)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl FrameDecoration for FrameBorder {
    fn title_bar_height(&self) -> i32 {
        match &self.font {
            Some(font) if self.is_titled() => {
                font.font.line_height(font.character_size) + self.padding
            }
            _ => 0,
        }
    }

    fn minimum_width(&self, padding: i32) -> i32 {
        if self.is_titled() {
            self.title_size().width + 2 * padding
        } else {
            0
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn process_event(&mut self, event: &Event) -> BorderResponse {
        let mut response = BorderResponse::default();
        match event {
            Event::MousePress(press) if self.bounds.contains(press.position) => {
                if let Some(callback) = self.click_callback.as_mut() {
                    response.skip_other_events = callback(press.position);
                }
                if press.button == MouseButton::Left
                    && self.movable
                    && self.title_bar().contains(press.position)
                {
                    self.drag.begin(press.position, self.bounds.origin);
                    response.skip_other_events = true;
                }
            }
            Event::MouseMove { position } if self.drag.is_dragging() => {
                if let Some(location) = self.drag.drag_to(*position, self.bounds.size)
                    && location != self.bounds.origin
                {
                    tracing::trace!(target: targets::EVENTS, ?location, "frame dragged");
                    self.bounds.origin = location;
                    response.moved_to = Some(location);
                    self.flags.receive_whole_family_update_needed();
                }
                response.skip_other_events = true;
            }
            Event::MouseRelease(release)
                if release.button == MouseButton::Left && self.drag.is_dragging() =>
            {
                self.drag.end();
                response.skip_other_events = true;
            }
            _ => {}
        }
        response
    }

    fn stylize(&mut self, styles: &StyleMap) -> Result<()> {
        self.padding = styles.require_non_negative(&keys::fallback_chain(
            keys::roles::FRAME,
            keys::fields::PADDING,
        ))?;
        self.font = Some(TitleFont {
            font: styles.require_font(&keys::fallback_chain(keys::roles::FRAME, keys::fields::FONT))?,
            character_size: styles.require_positive(&keys::fallback_chain(
                keys::roles::FRAME,
                keys::fields::CHARACTER_SIZE,
            ))?,
        });
        self.items = Some(BorderItems {
            border: styles.require_item(&[keys::items::FRAME_BORDER])?,
            title_bar: styles.require_item(&[keys::items::FRAME_TITLE_BAR])?,
            title_text: styles.require_item(&[keys::items::FRAME_TITLE_TEXT])?,
        });
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    fn take_update_request(&mut self) -> GeometryUpdate {
        self.flags.take()
    }

    fn draw(&self, renderer: &mut dyn WidgetRenderer, instance: InstanceKey) {
        let Some(items) = self.items else {
            return;
        };
        renderer.render_rectangle_pair(
            self.bounds,
            self.bounds.deflate(BORDER_THICKNESS),
            items.border,
            instance,
        );
        if let Some(font) = &self.font
            && self.is_titled()
        {
            let bar = self.title_bar();
            renderer.render_rectangle(bar, items.title_bar, instance);
            let text = TextRun {
                text: &self.title,
                location: bar.origin + Point::new(self.padding, self.padding / 2),
                character_size: font.character_size,
            };
            renderer.render_text(&text, items.title_text, instance);
        }
    }
}

static_assertions::assert_impl_all!(FrameBorder: Send, Sync);
