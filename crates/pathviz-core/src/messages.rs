//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Enter,
    /// A printable character.
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => f.write_str("Esc"),
            Self::Enter => f.write_str("Enter"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MouseAction
// ---------------------------------------------------------------------------

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Pointer moved, with or without a button held.
    Move,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// An input message delivered to the application.
#[derive(Clone)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event. `pos` is in board cells, not terminal columns.
    Mouse { action: MouseAction, pos: Point },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
    /// An application-defined payload, typically the result of a command.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Msg {
    /// Convenience: create a `KeyDown`.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: create a `Mouse` message.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse { action, pos }
    }

    /// Wrap an application-defined value.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Borrow the payload of a [`Msg::Custom`] if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyDown { key } => f.debug_struct("KeyDown").field("key", key).finish(),
            Self::Mouse { action, pos } => f
                .debug_struct("Mouse")
                .field("action", action)
                .field("pos", pos)
                .finish(),
            Self::Init => f.write_str("Init"),
            Self::Quit => f.write_str("Quit"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
