//! Style keys and the well-known keys built-in widgets read.
//!
//! Keys are dotted strings of the form `role.field`. A lookup usually tries
//! a role-specific key first and falls back to the matching `global.*` key;
//! see [`fallback_chain`].

use std::borrow::Cow;
use std::fmt;

/// The name of a field in a [`StyleMap`](crate::StyleMap).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleKey(Cow<'static, str>);

impl StyleKey {
    /// Create a key from a static string.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a key for `field` under `role`, i.e. `role.field`.
    pub fn for_role(role: &str, field: &str) -> Self {
        Self(Cow::Owned(format!("{role}.{field}")))
    }

    /// The key as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last dot (`padding` for `frame.padding`).
    pub fn field(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleKey({})", self.0)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for StyleKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for StyleKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// The role every fallback chain ends in.
pub const GLOBAL_ROLE: &str = "global";

/// Build the two-step lookup chain `role.field -> global.field`.
pub fn fallback_chain(role: &str, field: &str) -> [StyleKey; 2] {
    [
        StyleKey::for_role(role, field),
        StyleKey::for_role(GLOBAL_ROLE, field),
    ]
}

/// Field names shared by several roles.
pub mod fields {
    /// Padding between widgets and around frame contents (integer, pixels).
    pub const PADDING: &str = "padding";
    /// Font used to measure and draw text.
    pub const FONT: &str = "font";
    /// Character size in pixels (integer).
    pub const CHARACTER_SIZE: &str = "character-size";
}

/// Keys every complete style map sets.
pub mod global {
    use super::StyleKey;

    /// Default padding.
    pub const PADDING: StyleKey = StyleKey::from_static("global.padding");
    /// Default font.
    pub const FONT: StyleKey = StyleKey::from_static("global.font");
    /// Default character size.
    pub const CHARACTER_SIZE: StyleKey = StyleKey::from_static("global.character-size");
}

/// Role names used by the built-in widgets.
pub mod roles {
    /// Frames (bare and bordered).
    pub const FRAME: &str = "frame";
    /// Text areas.
    pub const TEXT_AREA: &str = "text-area";
    /// Text buttons.
    pub const TEXT_BUTTON: &str = "text-button";
}

/// Item keys (render items) the built-in widgets require.
pub mod items {
    use super::StyleKey;

    /// Frame border (rectangle pair).
    pub const FRAME_BORDER: StyleKey = StyleKey::from_static("frame.border");
    /// Frame title bar (rectangle).
    pub const FRAME_TITLE_BAR: StyleKey = StyleKey::from_static("frame.title-bar");
    /// Frame title text.
    pub const FRAME_TITLE_TEXT: StyleKey = StyleKey::from_static("frame.title-text");
    /// Text area text.
    pub const TEXT_AREA_TEXT: StyleKey = StyleKey::from_static("text-area.text");
    /// Text button background in its idle state.
    pub const TEXT_BUTTON_BACKGROUND: StyleKey =
        StyleKey::from_static("text-button.background");
    /// Text button background while hovered, pressed or focused.
    pub const TEXT_BUTTON_HIGHLIGHT: StyleKey = StyleKey::from_static("text-button.highlight");
    /// Text button label.
    pub const TEXT_BUTTON_TEXT: StyleKey = StyleKey::from_static("text-button.text");

    /// Every item key above, for themes that register them all.
    pub const ALL: [StyleKey; 7] = [
        FRAME_BORDER,
        FRAME_TITLE_BAR,
        FRAME_TITLE_TEXT,
        TEXT_AREA_TEXT,
        TEXT_BUTTON_BACKGROUND,
        TEXT_BUTTON_HIGHLIGHT,
        TEXT_BUTTON_TEXT,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain_order() {
        let [first, second] = fallback_chain(roles::FRAME, fields::PADDING);
        assert_eq!(first.as_str(), "frame.padding");
        assert_eq!(second, global::PADDING);
    }

    #[test]
    fn test_field_name() {
        assert_eq!(global::CHARACTER_SIZE.field(), "character-size");
        assert_eq!(StyleKey::from_static("plain").field(), "plain");
    }
}
