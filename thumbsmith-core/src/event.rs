//! Input events for editor interaction.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved (button may be held).
    Move,
    /// Button released.
    Up,
}

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in canvas pixels.
    pub x: f32,
    /// Y position in canvas pixels.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }

    /// A button-press event at the given position.
    #[must_use]
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    /// A movement event at the given position.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    /// A button-release event at the given position.
    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }
}

/// Editing keys the editor responds to while an element is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKey {
    /// Nudge the selection up.
    ArrowUp,
    /// Nudge the selection down.
    ArrowDown,
    /// Nudge the selection left.
    ArrowLeft,
    /// Nudge the selection right.
    ArrowRight,
    /// Delete the selection.
    Delete,
    /// Cycle the selection forward.
    Tab,
}

impl EditKey {
    /// Parse a DOM-style key name (e.g. `"ArrowUp"`, `"Delete"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Delete" => Some(Self::Delete),
            "Tab" => Some(Self::Tab),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(EditKey::from_name("ArrowLeft"), Some(EditKey::ArrowLeft));
        assert_eq!(EditKey::from_name("Tab"), Some(EditKey::Tab));
        assert_eq!(EditKey::from_name("Escape"), None);
    }

    #[test]
    fn test_pointer_constructors() {
        let event = PointerEvent::down(10.0, 20.0);
        assert_eq!(event.phase, PointerPhase::Down);
        assert!((event.x - 10.0).abs() < f32::EPSILON);
    }
}
