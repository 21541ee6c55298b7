#![forbid(unsafe_code)]

//! Validate-and-apply at the end of a drag.
//!
//! The commit is the only place a gesture can change the distribution:
//! either a new distribution comes back in [`CommitOutcome::Moved`], or the
//! input is left as it was and the outcome says why.

use crate::catalog::BucketId;
use crate::distribution::{Distribution, Relocation};
use crate::validator::{self, Rejection};

/// Result of committing one finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The drop was accepted and changed bucket membership.
    Moved {
        next: Distribution,
        relocation: Relocation,
    },
    /// Dropped back onto the bucket that already holds the item.
    Unchanged,
    /// Released outside every bucket.
    Cancelled,
    /// Refused by a capacity rule; surface [`Rejection::message`] to the user.
    Rejected(Rejection),
}

impl CommitOutcome {
    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::Unchanged => "unchanged",
            Self::Cancelled => "cancelled",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// Commit a drop of `item` onto `hovered`.
#[must_use]
pub fn commit(distribution: &Distribution, item: &str, hovered: Option<&BucketId>) -> CommitOutcome {
    let Some(target) = hovered else {
        return CommitOutcome::Cancelled;
    };
    if let Err(rejection) = validator::check(distribution, item, target.as_str()) {
        return CommitOutcome::Rejected(rejection);
    }
    let Some(from) = distribution.locate(item) else {
        return CommitOutcome::Rejected(Rejection::UnknownItem(item.into()));
    };
    if from == target {
        return CommitOutcome::Unchanged;
    }
    CommitOutcome::Moved {
        relocation: Relocation {
            item: item.into(),
            from: from.clone(),
            to: target.clone(),
        },
        next: distribution.move_item(item, target.as_str()),
    }
}
