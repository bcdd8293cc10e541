//! Static or programmatically updated text.

use trellis_core::ItemKey;
use trellis_core::logging::targets;
use trellis_render::{SharedFont, Size, TextRun, WidgetRenderer};
use trellis_style::{StyleMap, keys};

use crate::error::Result;
use crate::widget::{FlagsReceiver, Widget, WidgetBase};

#[derive(Debug, Clone)]
struct TextStyle {
    font: SharedFont,
    character_size: u32,
    item: ItemKey,
}

/// A block of text sized to its content.
///
/// Changing the text asks for a whole-family pass when the new text needs a
/// different size, and only for a redraw otherwise.
#[derive(Debug, Clone)]
pub struct TextArea {
    base: WidgetBase,
    text: String,
    style: Option<TextStyle>,
}

impl TextArea {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            style: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_string(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let size = self.base.fixed_size().unwrap_or_else(|| self.natural_size());
        let resized = size != self.base.size();
        let flags = self.base.flags_mut();
        if resized {
            flags.receive_whole_family_update_needed();
        } else {
            flags.receive_redraw_needed();
        }
    }

    /// Pin the size to `width` x `height`, or size to the text with `None`.
    pub fn set_fixed_size(&mut self, size: Option<(i32, i32)>) -> Result<()> {
        self.base.set_fixed_size(size)
    }

    fn natural_size(&self) -> Size {
        match &self.style {
            Some(style) => style.font.measure(&self.text, style.character_size),
            None => Size::ZERO,
        }
    }
}

impl Widget for TextArea {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn stylize(&mut self, styles: &StyleMap) -> Result<()> {
        let role = keys::roles::TEXT_AREA;
        self.style = Some(TextStyle {
            font: styles.require_font(&keys::fallback_chain(role, keys::fields::FONT))?,
            character_size: styles
                .require_positive(&keys::fallback_chain(role, keys::fields::CHARACTER_SIZE))?,
            item: styles.require_item(&[keys::items::TEXT_AREA_TEXT])?,
        });
        self.base.flags_mut().receive_whole_family_update_needed();
        Ok(())
    }

    fn update_size(&mut self) {
        if self.style.is_none() && self.base.fixed_size().is_none() {
            tracing::warn!(target: targets::LAYOUT, text = %self.text, "sizing an unstyled text area");
        }
        let natural = self.natural_size();
        self.base.resolve_size(natural);
    }

    fn draw(&self, renderer: &mut dyn WidgetRenderer) {
        if let Some(style) = &self.style {
            let run = TextRun {
                text: &self.text,
                location: self.base.location(),
                character_size: style.character_size,
            };
            renderer.render_text(&run, style.item, self.base.instance());
        }
    }
}

static_assertions::assert_impl_all!(TextArea: Send, Sync);

#[cfg(test)]
mod tests {
    use trellis_render::{DrawCommand, MonospaceMetrics, Point, RecordingRenderer};
    use trellis_style::default_styles;

    use super::*;
    use crate::widget::GeometryUpdate;

    fn styled(text: &str) -> TextArea {
        let mut area = TextArea::new(text);
        let styles = default_styles(MonospaceMetrics::default().shared())
            .with("text-area.character-size", 20);
        area.stylize(&styles).unwrap();
        area.update_size();
        area.take_update_request();
        area
    }

    #[test]
    fn test_sized_to_text() {
        // 10px per grapheme at character size 20.
        assert_eq!(styled("abcd").size(), Size::new(40, 20));
    }

    #[test]
    fn test_same_size_text_only_redraws() {
        let mut area = styled("abcd");
        area.set_string("wxyz");
        assert_eq!(area.take_update_request(), GeometryUpdate::Redraw);
    }

    #[test]
    fn test_longer_text_needs_whole_family() {
        let mut area = styled("abcd");
        area.set_string("abcdef");
        assert_eq!(area.take_update_request(), GeometryUpdate::WholeFamily);
        area.update_size();
        assert_eq!(area.width(), 60);
    }

    #[test]
    fn test_fixed_size_wins() {
        let mut area = styled("abcd");
        area.set_fixed_size(Some((100, 30))).unwrap();
        area.update_size();
        assert_eq!(area.size(), Size::new(100, 30));
        assert_eq!(area.take_update_request(), GeometryUpdate::WholeFamily);
        area.set_string("a much longer text than before");
        assert_eq!(area.take_update_request(), GeometryUpdate::Redraw);
    }

    #[test]
    fn test_negative_fixed_size_rejected() {
        let mut area = TextArea::new("x");
        assert!(area.set_fixed_size(Some((-1, 10))).is_err());
    }

    #[test]
    fn test_missing_font_fails_stylize() {
        let mut area = TextArea::new("x");
        assert!(area.stylize(&StyleMap::new()).is_err());
    }

    #[test]
    fn test_draws_text_at_location() {
        let mut area = styled("hi");
        area.set_location(Point::new(7, 9));
        let mut renderer = RecordingRenderer::new();
        area.draw(&mut renderer);
        assert!(matches!(
            &renderer.commands()[0],
            DrawCommand::Text { text, location, .. } if text == "hi" && *location == Point::new(7, 9)
        ));
    }
}
