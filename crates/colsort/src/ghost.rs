#![forbid(unsafe_code)]

//! Floating proxy of the dragged item.
//!
//! Presentation only: the ghost is derived from the active
//! [`DragSession`] on demand and never stored, so it disappears in the same
//! call that ends the session. It is not registered with
//! [`crate::hover::DropZones`] and so cannot shadow the buckets beneath it.

use colsort_core::{Point, Rect};

use crate::catalog::ItemId;
use crate::session::DragSession;

/// Where and how to draw the dragged item's proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub item: ItemId,
    pub label: String,
    /// Same size as the source element, displaced by the pointer delta.
    pub bounds: Rect,
    pub opacity: f32,
}

impl Ghost {
    /// Build the ghost for an active session.
    #[must_use]
    pub fn for_session(session: &DragSession, label: impl Into<String>, opacity: f32) -> Self {
        Self {
            item: session.item().clone(),
            label: label.into(),
            bounds: place(
                session.element(),
                session.pointer_start(),
                session.pointer_current(),
            ),
            opacity,
        }
    }

    /// Ghosts never receive pointer events.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        false
    }
}

/// `element.origin + (current - start)`, keeping the element's size.
///
/// The result tracks the pointer exactly, independent of where the source
/// element sits in its bucket's layout.
#[must_use]
pub fn place(element: Rect, start: Point, current: Point) -> Rect {
    element.translate(current - start)
}
