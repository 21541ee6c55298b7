#![forbid(unsafe_code)]

//! Hovered-bucket resolution during a drag.
//!
//! Drop zones may be adjacent or overlapping, and hosts do not guarantee
//! that the leave for one zone arrives before the enter for the next. The
//! resolver therefore keeps every zone the pointer is inside, in entry order,
//! and reports the most recently entered one (last entered wins).
//!
//! - `enter(A), enter(B), leave(A)` hovers `B`.
//! - `enter(A), enter(B), leave(B)` hovers `A` again: the pointer is still
//!   inside `A`.
//! - The hovered bucket is cleared only once every entered zone is left, or
//!   on [`HoverResolver::reset`].
//!
//! [`DropZones`] turns raw pointer positions into the same enter/leave
//! signals for hosts that cannot report zone crossings themselves.

use colsort_core::{Point, Rect, ZoneSignal};

use crate::catalog::{BucketId, ItemId};

/// Last-entered-wins record of the bucket under the pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverResolver {
    entered: Vec<BucketId>,
}

impl HoverResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pointer entered `bucket`. Re-entering moves it to the front.
    pub fn enter(&mut self, bucket: BucketId) {
        self.entered.retain(|b| *b != bucket);
        self.entered.push(bucket);
    }

    /// The pointer left `bucket`. A leave for a bucket never entered is ignored.
    pub fn leave(&mut self, bucket: &BucketId) {
        self.entered.retain(|b| b != bucket);
    }

    /// Apply one host signal.
    pub fn apply(&mut self, signal: ZoneSignal<BucketId>) {
        match signal {
            ZoneSignal::Enter(bucket) => self.enter(bucket),
            ZoneSignal::Leave(bucket) => self.leave(&bucket),
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&BucketId> {
        self.entered.last()
    }

    #[must_use]
    pub fn is_inside(&self, bucket: &BucketId) -> bool {
        self.entered.contains(bucket)
    }

    pub fn reset(&mut self) {
        self.entered.clear();
    }
}

/// Bucket and item regions from the host's last layout pass.
///
/// Later registrations sit on top of earlier ones: when regions overlap, the
/// last one registered is entered last and wins the hover. Ghost proxies are
/// never registered here, so they cannot shadow the zones beneath them.
#[derive(Debug, Clone, Default)]
pub struct DropZones {
    zones: Vec<(BucketId, Rect)>,
    items: Vec<(ItemId, Rect)>,
}

impl DropZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the region of a bucket.
    pub fn set_zone(&mut self, bucket: BucketId, rect: Rect) {
        self.zones.retain(|(id, _)| *id != bucket);
        self.zones.push((bucket, rect));
    }

    /// Record (or replace) the rendered bounds of an item.
    pub fn set_item(&mut self, item: ItemId, rect: Rect) {
        self.items.retain(|(id, _)| *id != item);
        self.items.push((item, rect));
    }

    pub fn clear(&mut self) {
        self.zones.clear();
        self.items.clear();
    }

    #[must_use]
    pub fn has_zones(&self) -> bool {
        !self.zones.is_empty()
    }

    /// Buckets containing `point`, bottom-most first.
    #[must_use]
    pub fn zones_at(&self, point: Point) -> Vec<BucketId> {
        self.zones
            .iter()
            .filter(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The top-most item under `point`, with its bounds.
    #[must_use]
    pub fn item_at(&self, point: Point) -> Option<(&ItemId, Rect)> {
        self.items
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, rect)| (id, *rect))
    }

    #[must_use]
    pub fn item_bounds(&self, item: &ItemId) -> Option<Rect> {
        self.items
            .iter()
            .find(|(id, _)| id == item)
            .map(|(_, rect)| *rect)
    }

    /// Crossings between the zone set `previous` and the zones under `point`.
    ///
    /// Leaves come first, then enters in stacking order. Returns the new zone
    /// set alongside the signals so the caller can feed it back next time.
    #[must_use]
    pub fn crossings(
        &self,
        previous: &[BucketId],
        point: Point,
    ) -> (Vec<ZoneSignal<BucketId>>, Vec<BucketId>) {
        let current = self.zones_at(point);
        let mut signals: Vec<ZoneSignal<BucketId>> = previous
            .iter()
            .filter(|id| !current.contains(id))
            .map(|id| ZoneSignal::Leave(id.clone()))
            .collect();
        signals.extend(
            current
                .iter()
                .filter(|id| !previous.contains(id))
                .map(|id| ZoneSignal::Enter(id.clone())),
        );
        (signals, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(id: &str) -> BucketId {
        BucketId::new(id)
    }

    #[test]
    fn starts_with_nothing_hovered() {
        assert!(HoverResolver::new().hovered().is_none());
    }

    #[test]
    fn last_entered_wins_over_stale_leave() {
        let mut hover = HoverResolver::new();
        hover.enter(b("a"));
        hover.enter(b("b"));
        hover.leave(&b("a"));
        assert_eq!(hover.hovered(), Some(&b("b")));
    }

    #[test]
    fn leaving_top_zone_falls_back_to_enclosing_zone() {
        let mut hover = HoverResolver::new();
        hover.enter(b("a"));
        hover.enter(b("b"));
        hover.leave(&b("b"));
        assert_eq!(hover.hovered(), Some(&b("a")));
    }

    #[test]
    fn leaving_every_zone_clears() {
        let mut hover = HoverResolver::new();
        hover.apply(ZoneSignal::Enter(b("a")));
        hover.apply(ZoneSignal::Enter(b("b")));
        hover.apply(ZoneSignal::Leave(b("b")));
        hover.apply(ZoneSignal::Leave(b("a")));
        assert!(hover.hovered().is_none());
    }

    #[test]
    fn unmatched_leave_is_ignored() {
        let mut hover = HoverResolver::new();
        hover.leave(&b("origin"));
        assert!(hover.hovered().is_none());
        hover.enter(b("a"));
        hover.leave(&b("origin"));
        assert_eq!(hover.hovered(), Some(&b("a")));
    }

    #[test]
    fn reentering_moves_zone_to_top() {
        let mut hover = HoverResolver::new();
        hover.enter(b("a"));
        hover.enter(b("b"));
        hover.enter(b("a"));
        assert_eq!(hover.hovered(), Some(&b("a")));
        hover.leave(&b("a"));
        assert_eq!(hover.hovered(), Some(&b("b")));
    }

    #[test]
    fn reset_clears_everything() {
        let mut hover = HoverResolver::new();
        hover.enter(b("a"));
        hover.reset();
        assert!(hover.hovered().is_none());
        assert!(!hover.is_inside(&b("a")));
    }

    fn zones() -> DropZones {
        let mut zones = DropZones::new();
        zones.set_zone(b("heap"), Rect::new(0, 0, 30, 20));
        zones.set_zone(b("numeric"), Rect::new(30, 0, 30, 20));
        zones.set_zone(b("target"), Rect::new(60, 0, 30, 20));
        zones
    }

    #[test]
    fn zones_at_hit_tests_rects() {
        let zones = zones();
        assert_eq!(zones.zones_at(Point::new(5, 5)), vec![b("heap")]);
        assert_eq!(zones.zones_at(Point::new(35, 5)), vec![b("numeric")]);
        assert!(zones.zones_at(Point::new(5, 25)).is_empty());
    }

    #[test]
    fn crossings_emit_leave_then_enter() {
        let zones = zones();
        let (signals, now) = zones.crossings(&[b("heap")], Point::new(40, 5));
        assert_eq!(
            signals,
            vec![ZoneSignal::Leave(b("heap")), ZoneSignal::Enter(b("numeric"))]
        );
        assert_eq!(now, vec![b("numeric")]);

        let (signals, now) = zones.crossings(&now, Point::new(41, 6));
        assert!(signals.is_empty());
        assert_eq!(now, vec![b("numeric")]);

        let (signals, now) = zones.crossings(&now, Point::new(41, 60));
        assert_eq!(signals, vec![ZoneSignal::Leave(b("numeric"))]);
        assert!(now.is_empty());
    }

    #[test]
    fn overlapping_zones_enter_in_stacking_order() {
        let mut zones = zones();
        zones.set_zone(b("target"), Rect::new(25, 0, 10, 5));
        let (signals, _) = zones.crossings(&[], Point::new(31, 2));
        assert_eq!(
            signals,
            vec![ZoneSignal::Enter(b("numeric")), ZoneSignal::Enter(b("target"))]
        );

        let mut hover = HoverResolver::new();
        signals.into_iter().for_each(|s| hover.apply(s));
        assert_eq!(hover.hovered(), Some(&b("target")));
    }

    #[test]
    fn item_hit_testing_prefers_top_most() {
        let mut zones = DropZones::new();
        zones.set_item(ItemId::new("age"), Rect::new(0, 0, 10, 1));
        zones.set_item(ItemId::new("income"), Rect::new(0, 0, 10, 1));
        let (id, rect) = zones.item_at(Point::new(3, 0)).unwrap();
        assert_eq!(id, "income");
        assert_eq!(rect, Rect::new(0, 0, 10, 1));
        assert!(zones.item_at(Point::new(3, 1)).is_none());
        assert_eq!(
            zones.item_bounds(&ItemId::new("age")),
            Some(Rect::new(0, 0, 10, 1))
        );
    }

    #[test]
    fn set_zone_replaces_previous_rect() {
        let mut zones = zones();
        zones.set_zone(b("heap"), Rect::new(100, 100, 1, 1));
        assert!(zones.zones_at(Point::new(5, 5)).is_empty());
        zones.clear();
        assert!(!zones.has_zones());
    }
}
