#![forbid(unsafe_code)]

//! Item and bucket identities.
//!
//! A [`Catalog`] fixes the set of buckets for one categorization screen, in
//! display order, and designates exactly one of them as the heap: the
//! unbounded overflow bucket holding every column not yet categorized.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a categorizable item (a dataset column name).
    ItemId
);

string_id!(
    /// Identifier of a bucket (a category key in the saved assignment).
    BucketId
);

/// A categorizable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
}

impl Item {
    /// An item whose label is its id, which is how dataset columns are shown.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id: ItemId(id),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl From<&str> for Item {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Item {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// How many items a bucket may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    #[default]
    Unbounded,
    /// At most one item. Saved as a scalar rather than a list.
    Single,
}

impl Capacity {
    /// Whether a bucket with this capacity can take one more item when it
    /// currently holds `len`.
    #[inline]
    #[must_use]
    pub const fn admits(self, len: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Single => len == 0,
        }
    }
}

/// A named, capacity-constrained destination category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    pub id: BucketId,
    pub label: String,
    pub capacity: Capacity,
}

impl Bucket {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, capacity: Capacity) -> Self {
        Self {
            id: BucketId::new(id),
            label: label.into(),
            capacity,
        }
    }

    #[must_use]
    pub fn unbounded(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, Capacity::Unbounded)
    }

    #[must_use]
    pub fn single(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, Capacity::Single)
    }
}

/// The ordered bucket set for one categorization screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    buckets: Vec<Bucket>,
    heap: usize,
}

impl Catalog {
    /// Build a catalog. `heap` must name one of `buckets` and that bucket
    /// must be [`Capacity::Unbounded`].
    pub fn new(
        buckets: impl IntoIterator<Item = Bucket>,
        heap: impl Into<BucketId>,
    ) -> Result<Self, CatalogError> {
        let buckets: Vec<Bucket> = buckets.into_iter().collect();
        let heap = heap.into();

        for (i, bucket) in buckets.iter().enumerate() {
            if bucket.id.as_str().is_empty() {
                return Err(CatalogError::EmptyBucketId);
            }
            if buckets[..i].iter().any(|b| b.id == bucket.id) {
                return Err(CatalogError::DuplicateBucket(bucket.id.clone()));
            }
        }

        let Some(heap_index) = buckets.iter().position(|b| b.id == heap) else {
            return Err(CatalogError::MissingHeap(heap));
        };
        if buckets[heap_index].capacity != Capacity::Unbounded {
            return Err(CatalogError::BoundedHeap(heap));
        }

        Ok(Self {
            buckets,
            heap: heap_index,
        })
    }

    /// All buckets, heap included, in display order.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[must_use]
    pub fn heap(&self) -> &Bucket {
        &self.buckets[self.heap]
    }

    #[must_use]
    pub fn heap_index(&self) -> usize {
        self.heap
    }

    #[must_use]
    pub fn is_heap(&self, id: &BucketId) -> bool {
        self.heap().id == *id
    }

    /// Position of a bucket in display order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.buckets.iter().position(|b| b.id.as_str() == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Bucket> {
        self.index_of(id).map(|i| &self.buckets[i])
    }

    /// Number of buckets, heap included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
