//! Pointer input delivered by the host window.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => position,
        }
    }
}
