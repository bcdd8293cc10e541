//! Typed values stored in a style map.

use trellis_core::ItemKey;
use trellis_render::{Color, SharedFont};

/// One value in a [`StyleMap`](crate::StyleMap).
#[derive(Debug, Clone)]
pub enum StyleField {
    /// A whole number (padding, character size...).
    Integer(i32),
    /// A fractional number.
    Float(f32),
    /// A color.
    Color(Color),
    /// A font for measuring and drawing text.
    Font(SharedFont),
    /// A render item key, forwarded untouched to the renderer.
    Item(ItemKey),
    /// A string.
    Text(String),
}

impl StyleField {
    /// A short human-readable name of the field kind, used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Color(_) => "color",
            Self::Font(_) => "font",
            Self::Item(_) => "item",
            Self::Text(_) => "text",
        }
    }
}

impl From<i32> for StyleField {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for StyleField {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Color> for StyleField {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<SharedFont> for StyleField {
    fn from(value: SharedFont) -> Self {
        Self::Font(value)
    }
}

impl From<ItemKey> for StyleField {
    fn from(value: ItemKey) -> Self {
        Self::Item(value)
    }
}

impl From<String> for StyleField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
