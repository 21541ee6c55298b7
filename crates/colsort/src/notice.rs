#![forbid(unsafe_code)]

//! Auto-dismissing rejection notices.
//!
//! The queue provides:
//! - one notice per rejected drop, newest last,
//! - content-based deduplication within a configurable time window,
//! - a cap on visible notices (oldest dropped first),
//! - expiry driven by [`NoticeQueue::tick`].
//!
//! Time is always passed in, so hosts can drive the queue from their frame
//! clock and tests stay deterministic.
//!
//! ```ignore
//! let mut notices = NoticeQueue::new(NoticeConfig::default());
//! notices.push("Target is full: churned is already applied", now);
//!
//! // In the event loop:
//! for id in notices.tick(now) {
//!     // stop drawing notice `id`
//! }
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

/// Identifier of a shown notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(u64);

impl NoticeId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A one-shot human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub shown_at: Instant,
}

/// Notice queue limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeConfig {
    /// How long a notice stays visible.
    pub duration: Duration,
    /// Identical messages pushed within this window are dropped.
    pub dedup_window: Duration,
    /// Maximum notices visible at once.
    pub max_visible: usize,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(3000),
            dedup_window: Duration::from_millis(1000),
            max_visible: 3,
        }
    }
}

/// Counters for monitoring and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeStats {
    pub total_pushed: u64,
    pub dedup_count: u64,
    pub overflow_count: u64,
    pub auto_expired: u64,
    pub dismissed: u64,
}

#[derive(Debug)]
pub struct NoticeQueue {
    config: NoticeConfig,
    visible: VecDeque<Notice>,
    next_id: u64,
    stats: NoticeStats,
}

impl NoticeQueue {
    #[must_use]
    pub fn new(config: NoticeConfig) -> Self {
        Self {
            config,
            visible: VecDeque::with_capacity(config.max_visible),
            next_id: 1,
            stats: NoticeStats::default(),
        }
    }

    /// Show `message`. Returns `None` when an identical notice was shown
    /// within the dedup window.
    pub fn push(&mut self, message: impl Into<String>, now: Instant) -> Option<NoticeId> {
        let message = message.into();
        self.stats.total_pushed += 1;

        let duplicate = self.visible.iter().any(|notice| {
            notice.message == message
                && now.saturating_duration_since(notice.shown_at) < self.config.dedup_window
        });
        if duplicate {
            self.stats.dedup_count += 1;
            return None;
        }

        while self.config.max_visible > 0 && self.visible.len() >= self.config.max_visible {
            self.visible.pop_front();
            self.stats.overflow_count += 1;
        }
        if self.config.max_visible == 0 {
            self.stats.overflow_count += 1;
            return None;
        }

        let id = NoticeId(self.next_id);
        self.next_id += 1;
        self.visible.push_back(Notice {
            id,
            message,
            shown_at: now,
        });
        Some(id)
    }

    /// Expire notices older than the configured duration; returns their ids.
    pub fn tick(&mut self, now: Instant) -> Vec<NoticeId> {
        let duration = self.config.duration;
        let mut expired = Vec::new();
        self.visible.retain(|notice| {
            let keep = now.saturating_duration_since(notice.shown_at) < duration;
            if !keep {
                expired.push(notice.id);
            }
            keep
        });
        self.stats.auto_expired += expired.len() as u64;
        expired
    }

    /// Dismiss a notice early (e.g. clicked away).
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|notice| notice.id != id);
        let removed = self.visible.len() < before;
        if removed {
            self.stats.dismissed += 1;
        }
        removed
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.visible.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.visible.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> &NoticeStats {
        &self.stats
    }
}
