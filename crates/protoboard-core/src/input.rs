//! Pointer event vocabulary fed to the editor by a platform adapter.
//!
//! The adapter is expected to register move/up handlers at the
//! window/document level, not on the canvas element, so a drag that
//! leaves the canvas is still tracked to completion.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer event in view coordinates (pixels relative to the visible
/// canvas viewport).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    /// Convenience constructor for a left-button press.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        }
    }

    /// Convenience constructor for a move.
    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }

    /// Convenience constructor for a left-button release.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }
}
