//! Platform-independent input events.
//!
//! A windowing frontend translates its native events into [`InputEvent`]s
//! and feeds them to the editor one at a time.

/// A position in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Keys the editor distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, identified by the character it produces unshifted
    Char(char),
    Enter,
    Escape,
    Backspace,
    LeftShift,
    LeftAlt,
    /// Any key with no editor binding
    Other,
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Represents the input events the editor reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(Key),
    /// Text was typed (already composed by the platform)
    Text(String),
    /// The pointer moved to a new screen position
    PointerMove { pos: ScreenPos },
    /// A pointer button was pressed
    PointerDown { button: PointerButton, pos: ScreenPos },
    /// A pointer button was released
    PointerUp { button: PointerButton, pos: ScreenPos },
    /// The wheel turned by `delta` notches
    Wheel { delta: f64, flipped: bool },
    /// The window asked to close
    Quit,
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown(key)
    }

    pub fn char(c: char) -> Self {
        InputEvent::KeyDown(Key::Char(c))
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::Text(text.into())
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            pos: ScreenPos::new(x, y),
        }
    }

    pub fn pointer_down(button: PointerButton, x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            button,
            pos: ScreenPos::new(x, y),
        }
    }

    pub fn pointer_up(button: PointerButton, x: f64, y: f64) -> Self {
        InputEvent::PointerUp {
            button,
            pos: ScreenPos::new(x, y),
        }
    }

    /// True for a left-button release, which the editor treats as a click
    pub fn is_click(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerUp {
                button: PointerButton::Left,
                ..
            }
        )
    }
}
