#![forbid(unsafe_code)]

//! Screen-level owner of one categorization board.
//!
//! [`Board`] holds the authoritative [`Distribution`] together with the drag
//! machine, hover bookkeeping, rejection notices and undo history, and
//! exposes the entry points a host forwards its input to.
//!
//! Two wiring styles are supported:
//!
//! - **Signal hosts** report enter/leave per bucket region themselves and call
//!   [`Board::pointer_down`], [`Board::pointer_move`], [`Board::zone_enter`],
//!   [`Board::zone_leave`] and [`Board::pointer_up`] directly.
//! - **Position hosts** register bucket and item rectangles with
//!   [`Board::set_zone`] / [`Board::set_item_bounds`] and feed raw
//!   [`PointerEvent`]s to [`Board::handle_pointer`]; zone crossings are
//!   synthesized from hit testing.
//!
//! # Invariants
//!
//! 1. The distribution changes only through an accepted drop, undo or redo.
//! 2. At most one drag session exists; undo/redo are refused while dragging.
//! 3. The ghost exists exactly while a session does.
//! 4. `revision` increments on every distribution change and never otherwise.

use std::sync::Arc;

use colsort_core::{Point, PointerEvent, PointerEventKind, Rect, ZoneSignal};
use web_time::Instant;

use crate::assignment::{Assignment, LoadReport};
use crate::catalog::{BucketId, Catalog, Item, ItemId};
use crate::commit::{self, CommitOutcome};
use crate::config::BoardConfig;
use crate::distribution::{Distribution, Relocation};
use crate::error::{ConfigError, GestureError};
use crate::ghost::Ghost;
use crate::history::History;
use crate::hover::DropZones;
use crate::notice::{NoticeId, NoticeQueue};
use crate::session::{DragMachine, DragSession};
use crate::validator::Rejection;

/// What a pointer release did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved(Relocation),
    Unchanged,
    Cancelled,
    /// Refused; a notice carrying [`Rejection::message`] was queued.
    Rejected(Rejection),
}

/// Result of [`Board::handle_pointer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A drag started on this item.
    Started(ItemId),
    /// The active drag tracked the pointer.
    Tracked,
    /// The active drag ended.
    Dropped(DropOutcome),
    /// Nothing to do (no item under the press, no drag, non-primary button).
    Ignored,
}

#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    distribution: Distribution,
    drag: DragMachine,
    zones: DropZones,
    /// Zones under the pointer at the last synthesized crossing.
    last_zones: Vec<BucketId>,
    /// A primary press that did not start a drag is outstanding.
    pressed: bool,
    notices: NoticeQueue,
    history: History,
    revision: u64,
}

impl Board {
    /// Wrap an existing distribution. Fails if `config` does not validate.
    pub fn new(distribution: Distribution, config: BoardConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            notices: NoticeQueue::new(config.notice_config()),
            history: History::new(config.history_depth),
            config,
            distribution,
            drag: DragMachine::new(),
            zones: DropZones::new(),
            last_zones: Vec::new(),
            pressed: false,
            revision: 0,
        })
    }

    /// Build a board from the dataset's columns and a persisted assignment.
    pub fn load(
        catalog: Arc<Catalog>,
        columns: impl IntoIterator<Item = impl Into<Item>>,
        prior: &Assignment,
        config: BoardConfig,
    ) -> Result<(Self, LoadReport), ConfigError> {
        let (distribution, report) = Distribution::load(catalog, columns, prior);
        Ok((Self::new(distribution, config)?, report))
    }

    #[must_use]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Bumped on every change to the distribution.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&BucketId> {
        self.drag.session().and_then(DragSession::hovered)
    }

    // --- layout -----------------------------------------------------------

    /// Register (or move) a bucket's drop region for hit testing.
    pub fn set_zone(&mut self, bucket: impl Into<BucketId>, rect: Rect) {
        self.zones.set_zone(bucket.into(), rect);
    }

    /// Register (or move) an item's on-screen bounds for hit testing.
    pub fn set_item_bounds(&mut self, item: impl Into<ItemId>, rect: Rect) {
        self.zones.set_item(item.into(), rect);
    }

    /// Forget every registered region.
    ///
    /// During a drag the hover is cleared as well; the next move enters
    /// whichever zones are registered by then.
    pub fn clear_layout(&mut self) {
        self.zones.clear();
        self.last_zones.clear();
        self.drag.clear_hover();
    }

    // --- gesture entry points ----------------------------------------------

    /// Start dragging `item` from its current bucket.
    ///
    /// `element` is the item's on-screen bounds at press time; the ghost is
    /// placed relative to it.
    pub fn pointer_down(
        &mut self,
        item: &str,
        pointer: Point,
        element: Rect,
    ) -> Result<(), GestureError> {
        let Some(origin) = self.distribution.locate(item).cloned() else {
            let error = GestureError::UnknownItem(item.into());
            tracing::error!(message = "drag.malformed", error = %error);
            return Err(error);
        };
        if let Err(error) = self
            .drag
            .begin(ItemId::new(item), origin.clone(), pointer, element)
        {
            tracing::error!(message = "drag.malformed", error = %error);
            return Err(error);
        }
        self.pressed = false;
        // The origin is not hovered until the pointer crosses into a zone.
        self.last_zones = self.zones.zones_at(pointer);
        tracing::debug!(
            message = "drag.begin",
            item,
            origin = %origin,
            x = pointer.x,
            y = pointer.y
        );
        Ok(())
    }

    /// Track the pointer. Returns `false` when no drag is active.
    ///
    /// With registered zones, enter/leave signals are synthesized here.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        if !self.drag.update(pointer) {
            return false;
        }
        if self.zones.has_zones() {
            let (signals, current) = self.zones.crossings(&self.last_zones, pointer);
            for signal in signals {
                self.apply_signal(signal);
            }
            self.last_zones = current;
        }
        true
    }

    /// The pointer entered `bucket`'s region. Ignored when idle.
    pub fn zone_enter(&mut self, bucket: impl Into<BucketId>) -> bool {
        self.apply_signal(ZoneSignal::Enter(bucket.into()))
    }

    /// The pointer left `bucket`'s region. Ignored when idle.
    pub fn zone_leave(&mut self, bucket: impl Into<BucketId>) -> bool {
        self.apply_signal(ZoneSignal::Leave(bucket.into()))
    }

    fn apply_signal(&mut self, signal: ZoneSignal<BucketId>) -> bool {
        let before = self.hovered().cloned();
        let applied = match signal {
            ZoneSignal::Enter(bucket) => self.drag.enter(bucket),
            ZoneSignal::Leave(bucket) => self.drag.leave(&bucket),
        };
        if applied && self.hovered() != before.as_ref() {
            tracing::trace!(
                message = "drag.hover",
                hovered = self.hovered().map(BucketId::as_str).unwrap_or("")
            );
        }
        applied
    }

    /// Release the pointer: commit the drop onto the hovered bucket.
    ///
    /// The session always ends here. `now` timestamps any rejection notice.
    pub fn pointer_up(&mut self, pointer: Point, now: Instant) -> Result<DropOutcome, GestureError> {
        self.pressed = false;
        self.last_zones.clear();
        let session = match self.drag.end(pointer) {
            Ok(session) => session,
            Err(error) => {
                tracing::error!(message = "drag.malformed", error = %error);
                return Err(error);
            }
        };

        let outcome = commit::commit(&self.distribution, session.item().as_str(), session.hovered());
        tracing::info!(
            message = "drag.commit",
            outcome = outcome.kind(),
            item = %session.item(),
            origin = %session.origin(),
            hovered = session.hovered().map(BucketId::as_str).unwrap_or("")
        );

        Ok(match outcome {
            CommitOutcome::Moved { next, relocation } => {
                let previous = std::mem::replace(&mut self.distribution, next);
                self.history.push(previous);
                self.revision += 1;
                debug_assert!(self.distribution.check_invariants().is_ok());
                DropOutcome::Moved(relocation)
            }
            CommitOutcome::Unchanged => DropOutcome::Unchanged,
            CommitOutcome::Cancelled => DropOutcome::Cancelled,
            CommitOutcome::Rejected(rejection) => {
                self.notices.push(rejection.message(), now);
                DropOutcome::Rejected(rejection)
            }
        })
    }

    /// Abandon the active drag without committing (focus loss, escape key).
    pub fn cancel(&mut self) -> bool {
        self.pressed = false;
        self.last_zones.clear();
        match self.drag.cancel() {
            Some(session) => {
                tracing::debug!(message = "drag.cancel", item = %session.item());
                true
            }
            None => false,
        }
    }

    /// Route a raw pointer event for position hosts.
    ///
    /// A press on a registered item starts a drag; a press elsewhere is
    /// remembered so its release is ignored. A release with no press at all
    /// is malformed.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        now: Instant,
    ) -> Result<PointerOutcome, GestureError> {
        match event.kind {
            PointerEventKind::Down(_) if !event.is_primary() => Ok(PointerOutcome::Ignored),
            PointerEventKind::Down(_) => {
                if let Some(session) = self.drag.session() {
                    let error = GestureError::SessionAlreadyActive {
                        active: session.item().clone(),
                    };
                    tracing::error!(message = "drag.malformed", error = %error);
                    return Err(error);
                }
                let hit = self
                    .zones
                    .item_at(event.position)
                    .map(|(item, rect)| (item.clone(), rect));
                match hit {
                    Some((item, rect)) => {
                        self.pointer_down(item.as_str(), event.position, rect)?;
                        Ok(PointerOutcome::Started(item))
                    }
                    None => {
                        self.pressed = true;
                        Ok(PointerOutcome::Ignored)
                    }
                }
            }
            PointerEventKind::Move => Ok(if self.pointer_move(event.position) {
                PointerOutcome::Tracked
            } else {
                PointerOutcome::Ignored
            }),
            PointerEventKind::Up(_) if !event.is_primary() => Ok(PointerOutcome::Ignored),
            PointerEventKind::Up(_) => {
                if !self.drag.is_dragging() && self.pressed {
                    self.pressed = false;
                    return Ok(PointerOutcome::Ignored);
                }
                self.pointer_up(event.position, now).map(PointerOutcome::Dropped)
            }
        }
    }

    // --- presentation -------------------------------------------------------

    /// The floating proxy of the dragged item, while a drag is active.
    #[must_use]
    pub fn ghost(&self) -> Option<Ghost> {
        let session = self.drag.session()?;
        let label = self
            .distribution
            .item(session.item().as_str())
            .map_or_else(|| session.item().to_string(), |item| item.label.clone());
        Some(Ghost::for_session(session, label, self.config.ghost_opacity))
    }

    /// Whether `item` is the one being dragged (the host dims it in place).
    #[must_use]
    pub fn is_drag_source(&self, item: &str) -> bool {
        self.drag.session().is_some_and(|s| *s.item() == *item)
    }

    /// Opacity the host should draw `item` with in its bucket.
    #[must_use]
    pub fn item_opacity(&self, item: &str) -> f32 {
        if self.is_drag_source(item) {
            self.config.source_opacity
        } else {
            1.0
        }
    }

    // --- notices ------------------------------------------------------------

    #[must_use]
    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    /// Expire notices; returns the ids the host should stop drawing.
    pub fn tick(&mut self, now: Instant) -> Vec<NoticeId> {
        self.notices.tick(now)
    }

    pub fn dismiss_notice(&mut self, id: NoticeId) -> bool {
        self.notices.dismiss(id)
    }

    // --- history --------------------------------------------------------------

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.drag.is_dragging() && self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.drag.is_dragging() && self.history.can_redo()
    }

    /// Revert the last accepted drop. Refused while dragging.
    pub fn undo(&mut self) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        match self.history.undo(self.distribution.clone()) {
            Some(previous) => {
                self.distribution = previous;
                self.revision += 1;
                tracing::debug!(message = "history.undo", revision = self.revision);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone drop. Refused while dragging.
    pub fn redo(&mut self) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        match self.history.redo(self.distribution.clone()) {
            Some(next) => {
                self.distribution = next;
                self.revision += 1;
                tracing::debug!(message = "history.redo", revision = self.revision);
                true
            }
            None => false,
        }
    }

    // --- persistence ------------------------------------------------------------

    /// The current assignment in its persisted shape (heap excluded).
    #[must_use]
    pub fn save(&self) -> Assignment {
        self.distribution.to_assignment()
    }
}
