//! A ready-made style map covering every key the built-in widgets read.

use trellis_core::ItemKey;
use trellis_core::logging::targets;
use trellis_render::SharedFont;

use crate::keys::{self, StyleKey};
use crate::map::StyleMap;

/// Default padding, in pixels.
pub const DEFAULT_PADDING: i32 = 5;

/// Default character size, in pixels.
pub const DEFAULT_CHARACTER_SIZE: i32 = 16;

/// Build a complete style map around `font`.
///
/// Every item key in [`keys::items::ALL`] is mapped to the [`ItemKey`]
/// interned under the same name, so renderers can match on
/// [`ItemKey::name`].
pub fn default_styles(font: SharedFont) -> StyleMap {
    let mut styles = StyleMap::new()
        .with(keys::global::PADDING, DEFAULT_PADDING)
        .with(keys::global::CHARACTER_SIZE, DEFAULT_CHARACTER_SIZE)
        .with(keys::global::FONT, font);
    for key in keys::items::ALL {
        let item = ItemKey::named(key.as_str());
        styles.insert(key, item);
    }
    tracing::debug!(target: targets::STYLE, fields = styles.len(), "built default styles");
    styles
}

/// The item keys [`default_styles`] registers, paired with their style keys.
pub fn default_items() -> impl Iterator<Item = (StyleKey, ItemKey)> {
    keys::items::ALL
        .into_iter()
        .map(|key| {
            let item = ItemKey::named(key.as_str());
            (key, item)
        })
}
