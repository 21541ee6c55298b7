#![forbid(unsafe_code)]

//! Error types.
//!
//! Constraint violations are not errors: a rejected drop is an ordinary
//! [`crate::commit::CommitOutcome`]. The types here cover programming
//! mistakes (malformed gestures, bad catalogs) and configuration loading.

use thiserror::Error;

use crate::catalog::{BucketId, ItemId};

/// Catalog construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("bucket id must not be empty")]
    EmptyBucketId,

    #[error("duplicate bucket id: {0}")]
    DuplicateBucket(BucketId),

    #[error("heap bucket not found: {0}")]
    MissingHeap(BucketId),

    #[error("heap bucket {0} must be unbounded")]
    BoundedHeap(BucketId),
}

/// A pointer sequence that violates the single-active-session contract.
///
/// These indicate a host wiring bug. The distribution is never touched on
/// these paths; hosts are expected to surface them loudly in development.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("drag already in progress for {active}")]
    SessionAlreadyActive { active: ItemId },

    #[error("pointer released with no active drag")]
    NoActiveSession,

    #[error("item not present in the distribution: {0}")]
    UnknownItem(ItemId),
}

/// Structural invariant violations of a [`crate::distribution::Distribution`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("item {0} is not in any bucket")]
    Missing(ItemId),

    #[error("item {item} appears {count} times")]
    Duplicated { item: ItemId, count: usize },

    #[error("item {0} is not part of the universe")]
    Stray(ItemId),

    #[error("single-capacity bucket {bucket} holds {count} items")]
    OverCapacity { bucket: BucketId, count: usize },
}

/// Failures while loading or validating a [`crate::config::BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}
