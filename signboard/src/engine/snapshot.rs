//! The display snapshot: everything the render layer needs for one frame.

use crate::config::{Goal, MediaItem, Period};
use crate::rotation::TickerReel;
use crate::schedule::DayType;

/// Identity of a period as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodView {
    pub id: u32,
    pub name: String,
}

impl From<&Period> for PeriodView {
    fn from(p: &Period) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
        }
    }
}

/// Complete, immutable set of values needed to render the screen at one
/// instant.
///
/// Rebuilt wholesale on every clock tick and on every rotation transition,
/// then published as a replacement — consumers never observe a partially
/// updated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    /// Active period, or `None` during gaps and outside school hours.
    pub period: Option<PeriodView>,
    /// Whole seconds until the active period ends; 0 when none is active.
    pub seconds_left: i64,
    /// Zero-padded `MM:SS` rendering of `seconds_left`.
    pub countdown: String,
    /// First upcoming period whose start is still ahead, if any.
    pub upcoming: Option<PeriodView>,
    /// Which period list governs today.
    pub day_type: DayType,
    /// `true` while the logo interstitial is on screen.
    pub showing_logo: bool,
    /// Gallery item on screen; `None` during the interstitial or when the
    /// media list is empty.
    pub media: Option<MediaItem>,
    /// Goals page, up to two entries.
    pub goals: Vec<Goal>,
    /// Scrolling news band content and pacing.
    pub ticker: TickerReel,
    /// 12-hour clock string in the operating locale.
    pub clock_text: String,
    /// Long-form date string in the operating locale.
    pub date_text: String,
}
