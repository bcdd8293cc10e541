//! Input events delivered to widgets.
//!
//! Events arrive already converted from whatever windowing library the host
//! uses. Frames and the focus handler dispatch purely by event kind; the only
//! payload they interpret is the pointer position, for hit tests.

use trellis_render::Point;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
    /// Any additional button, by index.
    Other(u8),
}

/// Keys the toolkit reacts to. Printable input arrives as
/// [`Event::TextEntered`]; `Character` carries the key's base character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Space,
    Escape,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Character(char),
    /// A key without a dedicated variant, by platform scan code.
    Unknown(u32),
}

/// Gamepad buttons, named by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Select,
}

/// Gamepad axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// A mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub position: Point,
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

/// A gamepad button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadButtonEvent {
    /// Which connected gamepad.
    pub gamepad: u32,
    pub button: GamepadButton,
}

/// A gamepad axis change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadAxisEvent {
    pub gamepad: u32,
    pub axis: GamepadAxis,
    /// Axis position in `[-1.0, 1.0]` (`[0.0, 1.0]` for triggers).
    pub value: f32,
}

/// An input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MousePress(MouseButtonEvent),
    MouseRelease(MouseButtonEvent),
    MouseMove { position: Point },
    KeyPress(KeyEvent),
    KeyRelease(KeyEvent),
    TextEntered(char),
    GamepadButtonPress(GamepadButtonEvent),
    GamepadButtonRelease(GamepadButtonEvent),
    GamepadAxis(GamepadAxisEvent),
}

impl Event {
    /// A mouse press at `position`.
    pub fn mouse_press(button: MouseButton, position: impl Into<Point>) -> Self {
        Self::MousePress(MouseButtonEvent {
            button,
            position: position.into(),
        })
    }

    /// A mouse release at `position`.
    pub fn mouse_release(button: MouseButton, position: impl Into<Point>) -> Self {
        Self::MouseRelease(MouseButtonEvent {
            button,
            position: position.into(),
        })
    }

    /// A pointer move to `position`.
    pub fn mouse_move(position: impl Into<Point>) -> Self {
        Self::MouseMove {
            position: position.into(),
        }
    }

    /// A key press.
    pub fn key_press(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::KeyPress(KeyEvent { key, modifiers })
    }

    /// A key release.
    pub fn key_release(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::KeyRelease(KeyEvent { key, modifiers })
    }

    /// A gamepad button press on gamepad 0.
    pub fn gamepad_press(button: GamepadButton) -> Self {
        Self::GamepadButtonPress(GamepadButtonEvent { gamepad: 0, button })
    }

    /// The pointer position carried by mouse events.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::MousePress(e) | Self::MouseRelease(e) => Some(e.position),
            Self::MouseMove { position } => Some(*position),
            _ => None,
        }
    }

    /// Whether this is a press of `key` with exactly `modifiers` held.
    pub fn is_key_press(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        matches!(self, Self::KeyPress(e) if e.key == key && e.modifiers == modifiers)
    }

    /// Whether this is a press of the gamepad button `button` on any gamepad.
    pub fn is_gamepad_press(&self, button: GamepadButton) -> bool {
        matches!(self, Self::GamepadButtonPress(e) if e.button == button)
    }
}
