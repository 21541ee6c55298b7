#![forbid(unsafe_code)]

//! Normalized pointer input.
//!
//! Hosts translate their native input (DOM pointer events, terminal mouse
//! reports, toolkit callbacks) into [`PointerEvent`] values. Drop-zone
//! crossings are expressed separately as [`ZoneSignal`]s because some hosts
//! report them directly (DOM `pointerenter`/`pointerleave`) while others only
//! report positions and have them synthesized from hit testing.

use crate::geometry::Point;

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Pointer moved, with or without a button held.
    Move,

    /// Button released.
    Up(PointerButton),
}

/// A pointer event at a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Pointer motion to `(x, y)`.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// True for press/release of the primary button.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Down(PointerButton::Primary)
                | PointerEventKind::Up(PointerButton::Primary)
        )
    }
}

/// A drop-zone crossing reported for zone `Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneSignal<Z> {
    Enter(Z),
    Leave(Z),
}
