#![forbid(unsafe_code)]

//! Capacity constraints on drops.
//!
//! Pure functions over a [`Distribution`]; nothing here knows about pointers.
//!
//! A drop onto the bucket that already holds the item is accepted (it
//! commits as a no-op). This holds for single-capacity buckets too: the sole
//! occupant may be dropped back onto its own bucket.

use std::fmt;

use crate::catalog::{BucketId, Capacity, ItemId};
use crate::distribution::Distribution;

/// Why a drop was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The single-capacity target already holds a different item.
    Full {
        bucket: BucketId,
        label: String,
        occupant: ItemId,
    },
    UnknownBucket(BucketId),
    UnknownItem(ItemId),
}

impl Rejection {
    /// Human-readable notice text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Full {
                label, occupant, ..
            } => format!("{label} is full: {occupant} is already applied"),
            Self::UnknownBucket(bucket) => format!("unknown category {bucket}"),
            Self::UnknownItem(item) => format!("unknown column {item}"),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Decide whether `item` may be dropped onto `target`, with the reason when not.
pub fn check(distribution: &Distribution, item: &str, target: &str) -> Result<(), Rejection> {
    let Some(current) = distribution.locate(item) else {
        return Err(Rejection::UnknownItem(ItemId::new(item)));
    };
    let Some(bucket) = distribution.catalog().get(target) else {
        return Err(Rejection::UnknownBucket(BucketId::new(target)));
    };
    if *current == bucket.id {
        return Ok(());
    }
    if bucket.capacity == Capacity::Single
        && let Some(occupant) = distribution
            .items_in(target)
            .and_then(|items| items.iter().find(|id| id.as_str() != item))
    {
        return Err(Rejection::Full {
            bucket: bucket.id.clone(),
            label: bucket.label.clone(),
            occupant: occupant.clone(),
        });
    }
    Ok(())
}

/// Whether `item` may be dropped onto `target`.
#[must_use]
pub fn can_accept(distribution: &Distribution, item: &str, target: &str) -> bool {
    check(distribution, item, target).is_ok()
}
