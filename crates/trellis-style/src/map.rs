//! The key-to-value store consulted during `stylize` passes.

use std::collections::HashMap;

use trellis_core::ItemKey;
use trellis_core::logging::targets;
use trellis_render::{Color, SharedFont};

use crate::error::{Error, Result};
use crate::field::StyleField;
use crate::keys::StyleKey;

/// A map from [`StyleKey`] to [`StyleField`].
///
/// Lookups take a *chain* of keys and return the first one that is set, so a
/// widget can ask for `text-button.padding` and fall back to
/// `global.padding`. The `require_*` accessors turn a missing or mistyped
/// field into an [`Error`], which widgets propagate out of `stylize`.
///
/// # Example
///
/// ```
/// use trellis_style::{StyleMap, keys};
///
/// let styles = StyleMap::new().with(keys::global::PADDING, 6);
///
/// let chain = keys::fallback_chain(keys::roles::FRAME, keys::fields::PADDING);
/// assert_eq!(styles.require_integer(&chain).unwrap(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    fields: HashMap<StyleKey, StyleField>,
}

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<StyleKey>,
        field: impl Into<StyleField>,
    ) -> Option<StyleField> {
        self.fields.insert(key.into(), field.into())
    }

    /// Set a field (builder pattern).
    pub fn with(mut self, key: impl Into<StyleKey>, field: impl Into<StyleField>) -> Self {
        self.insert(key, field);
        self
    }

    /// Copy every field of `overrides` into this map, replacing existing ones.
    pub fn merge(&mut self, overrides: &StyleMap) {
        for (key, field) in &overrides.fields {
            self.fields.insert(key.clone(), field.clone());
        }
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &StyleKey) -> Option<StyleField> {
        self.fields.remove(key)
    }

    /// Look up a single key.
    pub fn find(&self, key: &StyleKey) -> Option<&StyleField> {
        self.fields.get(key)
    }

    /// Look up the first key of `chain` that is set.
    pub fn find_chain<'k>(&self, chain: &'k [StyleKey]) -> Option<(&'k StyleKey, &StyleField)> {
        chain
            .iter()
            .find_map(|key| self.fields.get(key).map(|field| (key, field)))
    }

    /// Number of fields in the map.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the map has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields.
    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &StyleField)> {
        self.fields.iter()
    }

    fn require<'k>(&self, chain: &'k [StyleKey]) -> Result<(&'k StyleKey, &StyleField)> {
        self.find_chain(chain).ok_or_else(|| {
            let err = Error::missing(chain);
            tracing::error!(target: targets::STYLE, %err, "style lookup failed");
            err
        })
    }

    fn wrong_type(key: &StyleKey, expected: &'static str, found: &StyleField) -> Error {
        Error::WrongFieldType {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Resolve an integer field.
    pub fn require_integer(&self, chain: &[StyleKey]) -> Result<i32> {
        match self.require(chain)? {
            (_, StyleField::Integer(value)) => Ok(*value),
            (key, other) => Err(Self::wrong_type(key, "integer", other)),
        }
    }

    /// Resolve an integer field that must not be negative (paddings, sizes).
    pub fn require_non_negative(&self, chain: &[StyleKey]) -> Result<i32> {
        let (key, _) = self.require(chain)?;
        let value = self.require_integer(chain)?;
        if value < 0 {
            return Err(Error::invalid_value(
                key.as_str(),
                format!("must not be negative, got {value}"),
            ));
        }
        Ok(value)
    }

    /// Resolve a strictly positive integer field as `u32` (character sizes).
    pub fn require_positive(&self, chain: &[StyleKey]) -> Result<u32> {
        let (key, _) = self.require(chain)?;
        let value = self.require_integer(chain)?;
        u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| Error::invalid_value(key.as_str(), format!("must be positive, got {value}")))
    }

    /// Resolve a font field.
    pub fn require_font(&self, chain: &[StyleKey]) -> Result<SharedFont> {
        match self.require(chain)? {
            (_, StyleField::Font(font)) => Ok(font.clone()),
            (key, other) => Err(Self::wrong_type(key, "font", other)),
        }
    }

    /// Resolve a render item key.
    pub fn require_item(&self, chain: &[StyleKey]) -> Result<ItemKey> {
        match self.require(chain)? {
            (_, StyleField::Item(item)) => Ok(*item),
            (key, other) => Err(Self::wrong_type(key, "item", other)),
        }
    }

    /// Resolve a color field.
    pub fn require_color(&self, chain: &[StyleKey]) -> Result<Color> {
        match self.require(chain)? {
            (_, StyleField::Color(color)) => Ok(*color),
            (key, other) => Err(Self::wrong_type(key, "color", other)),
        }
    }
}
