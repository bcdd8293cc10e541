//! Styling for Trellis.
//!
//! Widgets pull their padding, fonts, character sizes and render item keys
//! out of a [`StyleMap`] during a `stylize` pass. Lookups walk a short chain
//! of keys (`role.field` then `global.field`) so a theme can override a
//! single widget kind without repeating the global defaults.
//!
//! Missing or mistyped fields are errors: a `stylize` pass that cannot find
//! what it needs fails with [`Error`] rather than guessing.
//!
//! # Example
//!
//! ```
//! use trellis_render::MonospaceMetrics;
//! use trellis_style::{default_styles, keys};
//!
//! let mut styles = default_styles(MonospaceMetrics::default().shared());
//! styles.insert("frame.padding", 12);
//!
//! let frame = keys::fallback_chain(keys::roles::FRAME, keys::fields::PADDING);
//! let button = keys::fallback_chain(keys::roles::TEXT_BUTTON, keys::fields::PADDING);
//! assert_eq!(styles.require_integer(&frame).unwrap(), 12);
//! assert_eq!(styles.require_integer(&button).unwrap(), 5);
//! ```

mod error;
mod field;
pub mod keys;
mod map;
pub mod theme;

pub use error::{Error, Result};
pub use field::StyleField;
pub use keys::StyleKey;
pub use map::StyleMap;
pub use theme::{DEFAULT_CHARACTER_SIZE, DEFAULT_PADDING, default_items, default_styles};
