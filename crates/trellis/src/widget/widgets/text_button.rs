//! A focusable push button with a text label.

use std::fmt;

use trellis_core::ItemKey;
use trellis_render::{Point, SharedFont, Size, TextRun, WidgetRenderer};
use trellis_style::{StyleMap, keys};

use crate::error::Result;
use crate::widget::{
    Event, FlagsReceiver, FocusWidget, Key, KeyboardModifiers, MouseButton, Widget, WidgetBase,
};

/// Called every time the button is pressed.
pub type PressCallback = Box<dyn FnMut() + Send + Sync>;

#[derive(Debug, Clone)]
struct ButtonStyle {
    font: SharedFont,
    character_size: u32,
    padding: i32,
    background: ItemKey,
    highlight: ItemKey,
    text: ItemKey,
}

/// A push button.
///
/// A left click inside the button requests focus; releasing the button over
/// it fires the press callback, as does Enter or Space while focused.
/// Hover, press and focus changes only change the highlight, so they
/// request individual updates.
pub struct TextButton {
    base: WidgetBase,
    label: String,
    style: Option<ButtonStyle>,
    hovered: bool,
    pressed: bool,
    focused: bool,
    focus_requested: bool,
    on_press: Option<PressCallback>,
}

impl TextButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            label: label.into(),
            style: None,
            hovered: false,
            pressed: false,
            focused: false,
            focus_requested: false,
            on_press: None,
        }
    }

    /// Set the press callback (builder pattern).
    pub fn with_press_callback(mut self, callback: impl FnMut() + Send + Sync + 'static) -> Self {
        self.set_press_callback(callback);
        self
    }

    pub fn set_press_callback(&mut self, callback: impl FnMut() + Send + Sync + 'static) {
        self.on_press = Some(Box::new(callback));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label; the button may change size.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.base.flags_mut().receive_whole_family_update_needed();
    }

    /// Pin the size to `width` x `height`, or size to the label with `None`.
    pub fn set_fixed_size(&mut self, size: Option<(i32, i32)>) -> Result<()> {
        self.base.set_fixed_size(size)
    }

    /// Whether the highlight is shown.
    pub fn is_highlighted(&self) -> bool {
        self.hovered || self.pressed || self.focused
    }

    /// Fire the press callback.
    pub fn press(&mut self) {
        if let Some(callback) = self.on_press.as_mut() {
            callback();
        }
    }

    fn contains(&self, position: Point) -> bool {
        self.base.bounds().contains(position)
    }

    fn highlight_changed(&mut self) {
        self.base.flags_mut().receive_individual_update_needed();
    }
}

impl fmt::Debug for TextButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextButton")
            .field("label", &self.label)
            .field("bounds", &self.base.bounds())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Widget for TextButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn process_event(&mut self, event: &Event) {
        match event {
            Event::MousePress(press)
                if press.button == MouseButton::Left && self.contains(press.position) =>
            {
                self.pressed = true;
                self.focus_requested = true;
                self.highlight_changed();
            }
            Event::MouseRelease(release) if release.button == MouseButton::Left && self.pressed => {
                self.pressed = false;
                if self.contains(release.position) {
                    self.press();
                }
                self.highlight_changed();
            }
            Event::MouseMove { position } => {
                let hovered = self.contains(*position);
                if hovered != self.hovered {
                    self.hovered = hovered;
                    self.highlight_changed();
                }
            }
            _ => {}
        }
    }

    fn stylize(&mut self, styles: &StyleMap) -> Result<()> {
        let role = keys::roles::TEXT_BUTTON;
        self.style = Some(ButtonStyle {
            font: styles.require_font(&keys::fallback_chain(role, keys::fields::FONT))?,
            character_size: styles
                .require_positive(&keys::fallback_chain(role, keys::fields::CHARACTER_SIZE))?,
            padding: styles.require_non_negative(&keys::fallback_chain(role, keys::fields::PADDING))?,
            background: styles.require_item(&[keys::items::TEXT_BUTTON_BACKGROUND])?,
            highlight: styles.require_item(&[keys::items::TEXT_BUTTON_HIGHLIGHT])?,
            text: styles.require_item(&[keys::items::TEXT_BUTTON_TEXT])?,
        });
        self.base.flags_mut().receive_whole_family_update_needed();
        Ok(())
    }

    fn update_size(&mut self) {
        let natural = match &self.style {
            Some(style) => {
                let text = style.font.measure(&self.label, style.character_size);
                Size::new(
                    text.width + 2 * style.padding,
                    text.height + 2 * style.padding,
                )
            }
            None => Size::ZERO,
        };
        self.base.resolve_size(natural);
    }

    fn draw(&self, renderer: &mut dyn WidgetRenderer) {
        let Some(style) = &self.style else {
            return;
        };
        let instance = self.base.instance();
        let background = if self.is_highlighted() {
            style.highlight
        } else {
            style.background
        };
        renderer.render_rectangle(self.base.bounds(), background, instance);
        let run = TextRun {
            text: &self.label,
            location: self.base.location() + Point::new(style.padding, style.padding),
            character_size: style.character_size,
        };
        renderer.render_text(&run, style.text, instance);
    }

    fn as_focus_widget(&self) -> Option<&dyn FocusWidget> {
        Some(self)
    }

    fn as_focus_widget_mut(&mut self) -> Option<&mut dyn FocusWidget> {
        Some(self)
    }
}

impl FocusWidget for TextButton {
    fn process_focus_event(&mut self, event: &Event) {
        if event.is_key_press(Key::Enter, KeyboardModifiers::NONE)
            || event.is_key_press(Key::Space, KeyboardModifiers::NONE)
        {
            self.press();
        }
    }

    fn notify_focus_gained(&mut self) {
        self.focused = true;
        self.highlight_changed();
    }

    fn notify_focus_lost(&mut self) {
        self.focused = false;
        self.highlight_changed();
    }

    fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

static_assertions::assert_impl_all!(TextButton: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use trellis_render::{DrawCommand, MonospaceMetrics, RecordingRenderer};
    use trellis_style::default_styles;

    use super::*;
    use crate::widget::GeometryUpdate;

    fn button(presses: &Arc<AtomicUsize>) -> TextButton {
        let counter = presses.clone();
        let mut button = TextButton::new("OK").with_press_callback(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        let styles = default_styles(MonospaceMetrics::default().shared())
            .with("text-button.padding", 2)
            .with("text-button.character-size", 10);
        button.stylize(&styles).unwrap();
        button.update_size();
        button.take_update_request();
        button
    }

    #[test]
    fn test_size_includes_padding() {
        let presses = Arc::new(AtomicUsize::new(0));
        // "OK" is 10x10 at character size 10, plus 2px padding on each side.
        assert_eq!(button(&presses).size(), Size::new(14, 14));
    }

    #[test]
    fn test_click_requests_focus_and_presses() {
        let presses = Arc::new(AtomicUsize::new(0));
        let mut button = button(&presses);

        button.process_event(&Event::mouse_press(MouseButton::Left, (3, 3)));
        assert!(button.take_focus_request());
        assert!(!button.take_focus_request());
        assert_eq!(presses.load(Ordering::Relaxed), 0);

        button.process_event(&Event::mouse_release(MouseButton::Left, (3, 3)));
        assert_eq!(presses.load(Ordering::Relaxed), 1);
        assert_eq!(button.take_update_request(), GeometryUpdate::Individual);
    }

    #[test]
    fn test_release_outside_does_not_press() {
        let presses = Arc::new(AtomicUsize::new(0));
        let mut button = button(&presses);
        button.process_event(&Event::mouse_press(MouseButton::Left, (3, 3)));
        button.process_event(&Event::mouse_release(MouseButton::Left, (300, 3)));
        assert_eq!(presses.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_enter_and_space_press_while_focused() {
        let presses = Arc::new(AtomicUsize::new(0));
        let mut button = button(&presses);
        button.process_focus_event(&Event::key_press(Key::Enter, KeyboardModifiers::NONE));
        button.process_focus_event(&Event::key_press(Key::Space, KeyboardModifiers::NONE));
        button.process_focus_event(&Event::key_press(Key::Tab, KeyboardModifiers::NONE));
        assert_eq!(presses.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_focus_switches_highlight() {
        let presses = Arc::new(AtomicUsize::new(0));
        let mut button = button(&presses);
        let mut renderer = RecordingRenderer::new();

        button.notify_focus_gained();
        assert!(button.has_focus());
        button.draw(&mut renderer);
        let highlight = ItemKey::named(keys::items::TEXT_BUTTON_HIGHLIGHT.as_str());
        assert!(matches!(renderer.commands()[0], DrawCommand::Rectangle { item, .. } if item == highlight));

        button.notify_focus_lost();
        assert!(!button.is_highlighted());
    }

    #[test]
    fn test_hover_change_requests_individual_update() {
        let presses = Arc::new(AtomicUsize::new(0));
        let mut button = button(&presses);
        button.process_event(&Event::mouse_move((1, 1)));
        assert_eq!(button.take_update_request(), GeometryUpdate::Individual);
        button.process_event(&Event::mouse_move((2, 2)));
        assert_eq!(button.take_update_request(), GeometryUpdate::None);
    }
}
