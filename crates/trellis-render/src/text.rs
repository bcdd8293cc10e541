//! Font metrics used for content-driven sizing.
//!
//! Text shaping belongs to the rendering backend. The layout engine only
//! needs to know how big a string will be, which is what [`FontMetrics`]
//! answers. [`MonospaceMetrics`] is a deterministic implementation suitable
//! for headless hosts and tests.

use std::fmt;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{RenderError, RenderResult};
use crate::types::Size;

/// Text measurement provided by a font.
pub trait FontMetrics: fmt::Debug + Send + Sync {
    /// The size of the box `text` occupies at `character_size`.
    ///
    /// Lines are separated by `'\n'`; the width is that of the widest line.
    fn measure(&self, text: &str, character_size: u32) -> Size;

    /// The height of one line of text at `character_size`.
    fn line_height(&self, character_size: u32) -> i32;
}

/// A font shared between the style map and every widget that uses it.
pub type SharedFont = Arc<dyn FontMetrics>;

/// Metrics for a fixed-advance font.
///
/// Every grapheme cluster advances by `advance_percent` of the character
/// size and every line is `line_percent` of the character size tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    advance_percent: u32,
    line_percent: u32,
}

impl MonospaceMetrics {
    /// Create metrics with explicit advance and line-height ratios (in percent).
    pub fn new(advance_percent: u32, line_percent: u32) -> Self {
        Self {
            advance_percent,
            line_percent,
        }
    }

    /// Wrap these metrics in a [`SharedFont`].
    pub fn shared(self) -> SharedFont {
        Arc::new(self)
    }

    /// Width of a single line, in pixels.
    pub fn line_width(&self, line: &str, character_size: u32) -> i32 {
        let clusters = line.graphemes(true).count() as u64;
        let width = clusters * u64::from(character_size) * u64::from(self.advance_percent);
        i32::try_from(width.div_ceil(100)).unwrap_or(i32::MAX)
    }

    /// Validate a character size before measuring with it.
    pub fn check_character_size(character_size: u32) -> RenderResult<u32> {
        if character_size == 0 {
            return Err(RenderError::ZeroCharacterSize);
        }
        Ok(character_size)
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(50, 100)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, character_size: u32) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let mut width = 0;
        let mut lines = 0;
        for line in text.split('\n') {
            width = width.max(self.line_width(line, character_size));
            lines += 1;
        }
        Size::new(width, self.line_height(character_size) * lines)
    }

    fn line_height(&self, character_size: u32) -> i32 {
        let height = u64::from(character_size) * u64::from(self.line_percent);
        i32::try_from(height.div_ceil(100)).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure_single_line() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.measure("abcd", 20), Size::new(40, 20));
    }

    #[test]
    fn test_monospace_measure_counts_graphemes() {
        let metrics = MonospaceMetrics::new(100, 100);
        // "e" + combining acute accent is one grapheme cluster.
        assert_eq!(metrics.measure("e\u{301}x", 10), Size::new(20, 10));
    }

    #[test]
    fn test_monospace_measure_multi_line() {
        let metrics = MonospaceMetrics::new(100, 150);
        assert_eq!(metrics.measure("ab\nabcd", 10), Size::new(40, 30));
    }

    #[test]
    fn test_empty_text_has_no_size() {
        assert_eq!(MonospaceMetrics::default().measure("", 12), Size::ZERO);
    }

    #[test]
    fn test_zero_character_size_rejected() {
        assert_eq!(
            MonospaceMetrics::check_character_size(0),
            Err(RenderError::ZeroCharacterSize)
        );
    }
}
