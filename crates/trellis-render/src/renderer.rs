//! The draw-side interface widgets render through.
//!
//! Widgets never talk to a graphics backend directly. They describe what to
//! draw as a handful of primitives, each tagged with an opaque [`ItemKey`]
//! (which styled item this is) and an [`InstanceKey`] (which widget asked),
//! and the backend decides what that looks like.
//!
//! # Example
//!
//! ```
//! use trellis_core::{InstanceKey, ItemKey};
//! use trellis_render::{DrawCommand, RecordingRenderer, Rect, WidgetRenderer};
//!
//! let mut renderer = RecordingRenderer::new();
//! let item = ItemKey::named("button.background");
//! let instance = InstanceKey::next();
//!
//! renderer.render_rectangle(Rect::new(0, 0, 40, 20), item, instance);
//!
//! assert!(matches!(renderer.commands()[0], DrawCommand::Rectangle { .. }));
//! ```

use trellis_core::{InstanceKey, ItemKey};

use crate::types::{Point, Rect, Triangle};

/// A run of text to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun<'a> {
    /// The text itself.
    pub text: &'a str,
    /// Top-left corner of the text box.
    pub location: Point,
    /// Character size in pixels.
    pub character_size: u32,
}

/// The rendering interface consumed by widgets.
///
/// Implementations map item keys to concrete visuals. The layout core never
/// interprets the keys; it only forwards them.
pub trait WidgetRenderer {
    /// Draw a filled rectangle.
    fn render_rectangle(&mut self, rect: Rect, item: ItemKey, instance: InstanceKey);

    /// Draw a rectangle pair: an outer rectangle with an inner one cut out or
    /// drawn on top (borders, masked regions).
    fn render_rectangle_pair(
        &mut self,
        outer: Rect,
        inner: Rect,
        item: ItemKey,
        instance: InstanceKey,
    );

    /// Draw a filled triangle.
    fn render_triangle(&mut self, triangle: Triangle, item: ItemKey, instance: InstanceKey);

    /// Draw a run of text.
    fn render_text(&mut self, text: &TextRun<'_>, item: ItemKey, instance: InstanceKey);
}

/// A draw command captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// A filled rectangle.
    Rectangle {
        rect: Rect,
        item: ItemKey,
        instance: InstanceKey,
    },
    /// An outer/inner rectangle pair.
    RectanglePair {
        outer: Rect,
        inner: Rect,
        item: ItemKey,
        instance: InstanceKey,
    },
    /// A filled triangle.
    Triangle {
        triangle: Triangle,
        item: ItemKey,
        instance: InstanceKey,
    },
    /// A text run.
    Text {
        text: String,
        location: Point,
        character_size: u32,
        item: ItemKey,
        instance: InstanceKey,
    },
}

impl DrawCommand {
    /// The item key the command was tagged with.
    pub fn item(&self) -> ItemKey {
        match self {
            Self::Rectangle { item, .. }
            | Self::RectanglePair { item, .. }
            | Self::Triangle { item, .. }
            | Self::Text { item, .. } => *item,
        }
    }

    /// The widget instance the command was issued for.
    pub fn instance(&self) -> InstanceKey {
        match self {
            Self::Rectangle { instance, .. }
            | Self::RectanglePair { instance, .. }
            | Self::Triangle { instance, .. }
            | Self::Text { instance, .. } => *instance,
        }
    }
}

/// A renderer that records every command instead of drawing it.
///
/// Useful for headless hosts, snapshot comparisons and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued for one widget instance.
    pub fn commands_for(&self, instance: InstanceKey) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.instance() == instance)
    }

    /// Drop every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl WidgetRenderer for RecordingRenderer {
    fn render_rectangle(&mut self, rect: Rect, item: ItemKey, instance: InstanceKey) {
        self.commands.push(DrawCommand::Rectangle {
            rect,
            item,
            instance,
        });
    }

    fn render_rectangle_pair(
        &mut self,
        outer: Rect,
        inner: Rect,
        item: ItemKey,
        instance: InstanceKey,
    ) {
        self.commands.push(DrawCommand::RectanglePair {
            outer,
            inner,
            item,
            instance,
        });
    }

    fn render_triangle(&mut self, triangle: Triangle, item: ItemKey, instance: InstanceKey) {
        self.commands.push(DrawCommand::Triangle {
            triangle,
            item,
            instance,
        });
    }

    fn render_text(&mut self, text: &TextRun<'_>, item: ItemKey, instance: InstanceKey) {
        self.commands.push(DrawCommand::Text {
            text: text.text.to_owned(),
            location: text.location,
            character_size: text.character_size,
            item,
            instance,
        });
    }
}
