//! Keyboard focus cycling within a frame family.
//!
//! The root frame of a family owns a [`FrameFocusHandler`] holding the
//! flattened list of focus-capable widgets below it (refreshed after every
//! geometry pass). Each event goes through four steps:
//!
//! 1. The focused widget, if any, sees the event first through
//!    [`FocusWidget::process_focus_event`](crate::widget::FocusWidget::process_focus_event).
//! 2. Every widget's focus request is read and reset; the first request in
//!    list order wins.
//! 3. Without a request, the advance predicate (default Tab) moves to the
//!    next widget and the regress predicate (default Shift+Tab) to the
//!    previous one, both wrapping around.
//! 4. If the target changed, the old widget is told it lost focus, then the
//!    new one that it gained it.
//!
//! # Example
//!
//! ```
//! use trellis::frame::FocusNavigation;
//! use trellis::widget::{Event, Key, KeyboardModifiers};
//!
//! let navigation = FocusNavigation::default();
//! assert!(navigation.is_advance(&Event::key_press(Key::Tab, KeyboardModifiers::NONE)));
//! assert!(navigation.is_regress(&Event::key_press(Key::Tab, KeyboardModifiers::SHIFT)));
//! ```

use std::fmt;

use trellis_core::WidgetId;
use trellis_core::logging::targets;

use crate::error::Result;
use crate::widget::{Event, GamepadButton, Key, KeyboardModifiers, WidgetTree};

/// A predicate deciding whether an event triggers a focus move.
pub type EventPredicate = Box<dyn Fn(&Event) -> bool + Send + Sync>;

/// The events that move focus forward and backward.
pub struct FocusNavigation {
    advance: EventPredicate,
    regress: EventPredicate,
}

impl FocusNavigation {
    /// Custom navigation.
    pub fn new(
        advance: impl Fn(&Event) -> bool + Send + Sync + 'static,
        regress: impl Fn(&Event) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            advance: Box::new(advance),
            regress: Box::new(regress),
        }
    }

    /// Tab advances, Shift+Tab regresses.
    pub fn keyboard() -> Self {
        Self::new(
            |event| event.is_key_press(Key::Tab, KeyboardModifiers::NONE),
            |event| event.is_key_press(Key::Tab, KeyboardModifiers::SHIFT),
        )
    }

    /// Right shoulder or D-pad down advances; left shoulder or D-pad up
    /// regresses.
    pub fn gamepad() -> Self {
        Self::new(
            |event| {
                event.is_gamepad_press(GamepadButton::RightShoulder)
                    || event.is_gamepad_press(GamepadButton::DPadDown)
            },
            |event| {
                event.is_gamepad_press(GamepadButton::LeftShoulder)
                    || event.is_gamepad_press(GamepadButton::DPadUp)
            },
        )
    }

    /// Keyboard and gamepad navigation together.
    pub fn keyboard_and_gamepad() -> Self {
        let keyboard = Self::keyboard();
        let gamepad = Self::gamepad();
        Self {
            advance: Box::new(move |event| (keyboard.advance)(event) || (gamepad.advance)(event)),
            regress: Box::new(move |event| (keyboard.regress)(event) || (gamepad.regress)(event)),
        }
    }

    #[inline]
    pub fn is_advance(&self, event: &Event) -> bool {
        (self.advance)(event)
    }

    #[inline]
    pub fn is_regress(&self, event: &Event) -> bool {
        (self.regress)(event)
    }
}

impl Default for FocusNavigation {
    fn default() -> Self {
        Self::keyboard()
    }
}

impl fmt::Debug for FocusNavigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusNavigation").finish_non_exhaustive()
    }
}

/// Focus cycle state for one frame family.
///
/// The current position, when set, always indexes the current list; any
/// replacement of the list resets it to "no focus".
#[derive(Debug, Default)]
pub struct FrameFocusHandler {
    widgets: Vec<WidgetId>,
    current: Option<usize>,
    navigation: FocusNavigation,
}

impl FrameFocusHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_navigation(navigation: FocusNavigation) -> Self {
        Self {
            navigation,
            ..Self::default()
        }
    }

    pub fn set_navigation(&mut self, navigation: FocusNavigation) {
        self.navigation = navigation;
    }

    /// The focus-capable widgets, in cycle order.
    #[inline]
    pub fn widgets(&self) -> &[WidgetId] {
        &self.widgets
    }

    /// The widget holding focus, if any.
    #[inline]
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.current.and_then(|index| self.widgets.get(index).copied())
    }

    /// Replace the widget list. Focus always resets; the widget that held it
    /// is told it lost it.
    pub fn take_widgets_from(&mut self, tree: &mut WidgetTree, widgets: Vec<WidgetId>) -> Result<()> {
        let previous = self.focused_widget();
        self.widgets = widgets;
        self.current = None;
        if let Some(id) = previous
            && tree.contains(id)
        {
            tree.focus_widget_mut(id)?.notify_focus_lost();
            tracing::debug!(target: targets::FOCUS, ?id, "focus reset by list replacement");
        }
        Ok(())
    }

    /// Replace the widget list unless it is unchanged, in which case focus
    /// is kept.
    pub fn refresh(&mut self, tree: &mut WidgetTree, widgets: Vec<WidgetId>) -> Result<()> {
        if widgets == self.widgets {
            return Ok(());
        }
        self.take_widgets_from(tree, widgets)
    }

    /// Forget every widget. Used for frames nested in another family.
    pub fn clear_focus_widgets(&mut self) {
        self.widgets.clear();
        self.current = None;
    }

    /// Run one event through the focus cycle.
    pub fn process_event(&mut self, tree: &mut WidgetTree, event: &Event) -> Result<()> {
        if self.widgets.is_empty() {
            return Ok(());
        }

        if let Some(id) = self.focused_widget() {
            tree.focus_widget_mut(id)?.process_focus_event(event);
        }

        let mut requested = None;
        for (index, &id) in self.widgets.iter().enumerate() {
            if tree.focus_widget_mut(id)?.take_focus_request() && requested.is_none() {
                requested = Some(index);
            }
        }

        let count = self.widgets.len();
        let target = if requested.is_some() {
            requested
        } else if self.navigation.is_advance(event) {
            Some(self.current.map_or(0, |index| (index + 1) % count))
        } else if self.navigation.is_regress(event) {
            Some(self.current.map_or(count - 1, |index| (index + count - 1) % count))
        } else {
            self.current
        };

        if target != self.current {
            self.move_focus(tree, target)?;
        }
        Ok(())
    }

    fn move_focus(&mut self, tree: &mut WidgetTree, target: Option<usize>) -> Result<()> {
        let old = self.focused_widget();
        self.current = target;
        let new = self.focused_widget();
        if let Some(id) = old {
            tree.focus_widget_mut(id)?.notify_focus_lost();
        }
        if let Some(id) = new {
            tree.focus_widget_mut(id)?.notify_focus_gained();
        }
        tracing::debug!(target: targets::FOCUS, from = ?old, to = ?new, "focus moved");
        Ok(())
    }
}
