#![forbid(unsafe_code)]

//! The distribution model: which bucket holds which items.
//!
//! A [`Distribution`] is a value. [`Distribution::move_item`] never mutates
//! its receiver; it returns the next distribution so callers can diff, keep
//! history, or discard it.
//!
//! # Invariants
//!
//! 1. Every item of the universe appears in exactly one bucket.
//! 2. A [`Capacity::Single`] bucket holds at most one item.
//! 3. Within a bucket, items keep insertion order; moves append.
//!
//! [`Distribution::check_invariants`] verifies all three (the third is
//! structural and cannot be observed as a violation).

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{Bucket, BucketId, Capacity, Catalog, Item, ItemId};
use crate::error::InvariantViolation;

/// One item changing buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub item: ItemId,
    pub from: BucketId,
    pub to: BucketId,
}

/// Authoritative bucket membership for one categorization screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    catalog: Arc<Catalog>,
    universe: Arc<[Item]>,
    /// One sequence per catalog bucket, in catalog order.
    slots: Vec<Vec<ItemId>>,
}

impl Distribution {
    /// A distribution with every item of `universe` in the heap, in order.
    ///
    /// Items repeating an earlier id are dropped; [`Distribution::load`]
    /// reports such normalizations instead of applying them silently.
    #[must_use]
    pub fn all_in_heap(catalog: Arc<Catalog>, universe: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = Vec::new();
        for item in universe {
            if !items.iter().any(|seen| seen.id == item.id) {
                items.push(item);
            }
        }
        let mut slots = vec![Vec::new(); catalog.len()];
        slots[catalog.heap_index()] = items.iter().map(|item| item.id.clone()).collect();
        Self {
            catalog,
            universe: items.into(),
            slots,
        }
    }

    pub(crate) fn from_parts(
        catalog: Arc<Catalog>,
        universe: Arc<[Item]>,
        slots: Vec<Vec<ItemId>>,
    ) -> Self {
        debug_assert_eq!(slots.len(), catalog.len());
        Self {
            catalog,
            universe,
            slots,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for building sibling distributions.
    #[must_use]
    pub fn catalog_arc(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Every item known to this distribution, in load order.
    #[must_use]
    pub fn universe(&self) -> &[Item] {
        &self.universe
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.universe.iter().find(|item| item.id.as_str() == id)
    }

    /// Items held by `bucket`, or `None` if the bucket is unknown.
    #[must_use]
    pub fn items_in(&self, bucket: &str) -> Option<&[ItemId]> {
        self.catalog
            .index_of(bucket)
            .map(|index| self.slots[index].as_slice())
    }

    #[must_use]
    pub fn heap_items(&self) -> &[ItemId] {
        &self.slots[self.catalog.heap_index()]
    }

    /// Buckets with their contents, in display order.
    pub fn buckets(&self) -> impl Iterator<Item = (&Bucket, &[ItemId])> {
        self.catalog
            .buckets()
            .iter()
            .zip(self.slots.iter().map(Vec::as_slice))
    }

    fn slot_of(&self, item: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.iter().any(|id| id.as_str() == item))
    }

    /// The bucket currently holding `item`.
    #[must_use]
    pub fn locate(&self, item: &str) -> Option<&BucketId> {
        self.slot_of(item).map(|index| &self.catalog.buckets()[index].id)
    }

    /// Remove `item` from its current bucket and append it to `target`.
    ///
    /// Capacity is not checked here; callers consult
    /// [`crate::validator::can_accept`] first. Moving an item onto the bucket
    /// that already holds it returns an equal distribution (the item keeps
    /// its position). An unknown item or target also returns an unchanged
    /// copy.
    #[must_use]
    pub fn move_item(&self, item: &str, target: &str) -> Distribution {
        let mut next = self.clone();
        let (Some(from), Some(to)) = (self.slot_of(item), self.catalog.index_of(target)) else {
            return next;
        };
        if from == to {
            return next;
        }
        let Some(pos) = next.slots[from].iter().position(|id| id.as_str() == item) else {
            return next;
        };
        let id = next.slots[from].remove(pos);
        next.slots[to].push(id);
        next
    }

    /// Items whose bucket differs between `self` and `other`, in `self`'s
    /// display order.
    #[must_use]
    pub fn diff(&self, other: &Distribution) -> Vec<Relocation> {
        let mut out = Vec::new();
        for (bucket, items) in self.buckets() {
            for item in items {
                if let Some(to) = other.locate(item.as_str())
                    && *to != bucket.id
                {
                    out.push(Relocation {
                        item: item.clone(),
                        from: bucket.id.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        out
    }

    /// Verify the partition and capacity invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut counts: HashMap<&str, usize> = self
            .universe
            .iter()
            .map(|item| (item.id.as_str(), 0))
            .collect();

        for (bucket, items) in self.buckets() {
            if bucket.capacity == Capacity::Single && items.len() > 1 {
                return Err(InvariantViolation::OverCapacity {
                    bucket: bucket.id.clone(),
                    count: items.len(),
                });
            }
            for item in items {
                match counts.get_mut(item.as_str()) {
                    Some(count) => *count += 1,
                    None => return Err(InvariantViolation::Stray(item.clone())),
                }
            }
        }

        for item in self.universe.iter() {
            match counts[item.id.as_str()] {
                1 => {}
                0 => return Err(InvariantViolation::Missing(item.id.clone())),
                count => {
                    return Err(InvariantViolation::Duplicated {
                        item: item.id.clone(),
                        count,
                    });
                }
            }
        }
        Ok(())
    }
}
