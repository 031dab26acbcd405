//! Media/logo alternator.
//!
//! The gallery alternates between one media item and the logo interstitial:
//!
//! ```text
//! Media(0) ──dwell(item 0)──► Logo ──logo dwell──► Media(1) ──► … ──► Media(0)
//! ```
//!
//! The index advances only on the transition *out of* the interstitial, so
//! the logo appears exactly once between any two distinct media items and
//! the index moves exactly once per full media→logo→media cycle.  The list
//! length is re-read at each transition, so content edits take effect on
//! the next cycle boundary.

use std::time::Duration;

use crate::config::{DisplaySettings, MediaItem};

use super::clamp_dwell;

/// Dwell when the media list is empty or the cursor points past the end of
/// an edited list.
const EMPTY_SLOT_SECONDS: i64 = 5;

/// What the gallery panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    /// Gallery item at this index.  The index may point past the end of a
    /// list that shrank since the last transition; the render layer shows a
    /// placeholder then.
    Media(usize),
    /// Logo interstitial between two gallery items.
    Logo,
}

/// State of the media/logo alternation.  Starts at `Media(0)`.
#[derive(Debug)]
pub struct MediaRotation {
    index: usize,
    showing_logo: bool,
}

impl MediaRotation {
    pub fn new() -> Self {
        Self {
            index: 0,
            showing_logo: false,
        }
    }

    pub fn slot(&self) -> MediaSlot {
        if self.showing_logo {
            MediaSlot::Logo
        } else {
            MediaSlot::Media(self.index)
        }
    }

    pub fn showing_logo(&self) -> bool {
        self.showing_logo
    }

    /// Gallery item currently on screen, if any.
    pub fn current_item<'a>(&self, media: &'a [MediaItem]) -> Option<&'a MediaItem> {
        if self.showing_logo {
            None
        } else {
            media.get(self.index)
        }
    }

    /// How long the slot currently on screen stays up.
    pub fn dwell(&self, settings: &DisplaySettings) -> Duration {
        if self.showing_logo {
            clamp_dwell(settings.logo_seconds)
        } else {
            match settings.media.get(self.index) {
                Some(item) => clamp_dwell(item.duration_seconds),
                None => clamp_dwell(EMPTY_SLOT_SECONDS),
            }
        }
    }

    /// Timer-expiry transition.
    ///
    /// `media_len` is the media list length at transition time.  With an
    /// empty list the machine keeps alternating (empty slot ↔ logo) so it
    /// resumes seamlessly once content appears.
    pub fn advance(&mut self, media_len: usize) {
        if self.showing_logo {
            self.index = if media_len == 0 {
                0
            } else {
                (self.index + 1) % media_len
            };
            self.showing_logo = false;
        } else {
            self.showing_logo = true;
        }
    }
}

impl Default for MediaRotation {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
