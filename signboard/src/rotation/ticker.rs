//! News ticker reel.
//!
//! The band is not timer-driven: the render layer animates a continuous,
//! constant-velocity traversal and loops it.  This module only assembles
//! what that animation needs — the content doubled back-to-back (so the
//! tail of one pass meets the head of the next without a visible gap) and
//! the wall-clock duration of one full traversal.

use std::time::Duration;

use crate::config::NewsItem;

use super::clamp_dwell;

/// Content and pacing of the scrolling news band.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickerReel {
    /// News items concatenated with themselves once, in insertion order.
    pub entries: Vec<NewsItem>,
    /// Duration of one full traversal; zero when the band is empty.
    pub cycle: Duration,
}

impl TickerReel {
    /// Builds the reel for the given news list.  An empty list yields an
    /// empty, motionless band.
    pub fn build(news: &[NewsItem], cycle_seconds: i64) -> Self {
        if news.is_empty() {
            return Self::default();
        }
        let mut entries = Vec::with_capacity(news.len() * 2);
        entries.extend_from_slice(news);
        entries.extend_from_slice(news);
        Self {
            entries,
            cycle: clamp_dwell(cycle_seconds),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
