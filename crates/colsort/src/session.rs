#![forbid(unsafe_code)]

//! Drag session state machine.
//!
//! ```text
//! Idle --begin--> Dragging --update/enter/leave--> Dragging --end--> Idle
//!                     \--------------------cancel-------------------> Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one session is active. `begin` while dragging is refused and
//!    the active session is kept.
//! 2. `end` always returns the machine to `Idle`, wherever the pointer is.
//! 3. The hovered bucket starts as `None`; it changes only through zone
//!    signals received while dragging.
//! 4. Pointer motion and zone signals while idle are ignored.

use colsort_core::{Offset, Point, Rect};

use crate::catalog::{BucketId, ItemId};
use crate::error::GestureError;
use crate::hover::HoverResolver;

/// Transient state of one pointer-driven relocation gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    item: ItemId,
    origin: BucketId,
    pointer_start: Point,
    pointer_current: Point,
    element: Rect,
    hover: HoverResolver,
}

impl DragSession {
    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Bucket holding the item when the gesture began.
    #[must_use]
    pub fn origin(&self) -> &BucketId {
        &self.origin
    }

    #[must_use]
    pub fn pointer_start(&self) -> Point {
        self.pointer_start
    }

    #[must_use]
    pub fn pointer_current(&self) -> Point {
        self.pointer_current
    }

    /// Bounds of the dragged element when the gesture began.
    #[must_use]
    pub fn element(&self) -> Rect {
        self.element
    }

    /// Pointer displacement since the gesture began.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.pointer_current - self.pointer_start
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&BucketId> {
        self.hover.hovered()
    }
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Owner of the single drag session of a board.
#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    state: DragState,
    started: u64,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Number of sessions started over the machine's lifetime.
    #[must_use]
    pub fn sessions_started(&self) -> u64 {
        self.started
    }

    /// `Idle -> Dragging`.
    pub fn begin(
        &mut self,
        item: ItemId,
        origin: BucketId,
        pointer: Point,
        element: Rect,
    ) -> Result<(), GestureError> {
        if let DragState::Dragging(active) = &self.state {
            return Err(GestureError::SessionAlreadyActive {
                active: active.item.clone(),
            });
        }
        self.started += 1;
        self.state = DragState::Dragging(DragSession {
            item,
            origin,
            pointer_start: pointer,
            pointer_current: pointer,
            element,
            hover: HoverResolver::new(),
        });
        Ok(())
    }

    /// Track pointer motion. Returns `false` when idle.
    pub fn update(&mut self, pointer: Point) -> bool {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.pointer_current = pointer;
                true
            }
            DragState::Idle => false,
        }
    }

    /// Pointer entered a bucket region. Returns `false` when idle.
    pub fn enter(&mut self, bucket: BucketId) -> bool {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.hover.enter(bucket);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Pointer left a bucket region. Returns `false` when idle.
    pub fn leave(&mut self, bucket: &BucketId) -> bool {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.hover.leave(bucket);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Forget every entered zone. Returns `false` when idle.
    pub fn clear_hover(&mut self) -> bool {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.hover.reset();
                true
            }
            DragState::Idle => false,
        }
    }

    /// `Dragging -> Idle` on release, returning the finished session.
    pub fn end(&mut self, pointer: Point) -> Result<DragSession, GestureError> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(mut session) => {
                session.pointer_current = pointer;
                Ok(session)
            }
            DragState::Idle => Err(GestureError::NoActiveSession),
        }
    }

    /// Discard the active session, if any, without committing.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}
