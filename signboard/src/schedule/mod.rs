//! Day-type selection and period resolution.
//!
//! Both entry points are pure functions of a settings value and "now";
//! they hold no state and are re-evaluated on every one-second tick, so a
//! day-type flip at local midnight or an edited timetable takes effect on
//! the next tick automatically.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime};

use crate::config::Period;

// ── Day type ──────────────────────────────────────────────────────────────────

/// Which of the two period lists governs a calendar day.
///
/// Selected per day, not per instant: the whole day runs one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Normal,
    Activity,
}

impl DayType {
    pub fn is_activity(self) -> bool {
        matches!(self, DayType::Activity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Normal => "normal",
            DayType::Activity => "activity",
        }
    }
}

/// Picks today's day type from the configured activity weekdays
/// (0 = Sunday … 6 = Saturday).  An empty set means every day is normal.
pub fn day_type(activity_days: &[u32], now: DateTime<FixedOffset>) -> DayType {
    let today = now.weekday().num_days_from_sunday();
    if activity_days.contains(&today) {
        DayType::Activity
    } else {
        DayType::Normal
    }
}

// ── Time-of-day parsing ───────────────────────────────────────────────────────

/// Strict `HH:MM` parser for period boundaries.
///
/// Returns `None` for anything else; the resolver treats such a period as
/// never active rather than letting one bad entry crash the tick loop.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

// ── Period resolution ─────────────────────────────────────────────────────────

/// Outcome of resolving a period list against one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStatus<'a> {
    /// Period whose `[start, end)` interval contains now, if any.
    pub current: Option<&'a Period>,
    /// The list entry after `current`, or — during a gap — the first entry
    /// whose start is still ahead.
    pub next: Option<&'a Period>,
    /// Whole seconds until `current` ends; 0 when no period is active.
    pub seconds_left: i64,
}

/// Scans `periods` in list order against the time-of-day of `now`.
///
/// The list is assumed strictly ascending and non-overlapping (enforced at
/// settings-validation time, not here).  The scan stops at the first period
/// containing now, or at the first period starting after now — a gap
/// between periods therefore yields no active period with `next` set to
/// the period after the gap.
pub fn resolve<'a>(periods: &'a [Period], now: DateTime<FixedOffset>) -> PeriodStatus<'a> {
    let now_t = now.time();

    for (i, p) in periods.iter().enumerate() {
        // Fail closed on malformed boundaries: skip the entry entirely.
        let start = match parse_time_of_day(&p.start) {
            Some(t) => t,
            None => continue,
        };
        let end = match parse_time_of_day(&p.end) {
            Some(t) => t,
            None => continue,
        };

        if now_t >= start && now_t < end {
            return PeriodStatus {
                current: Some(p),
                next: periods.get(i + 1),
                seconds_left: (end - now_t).num_seconds(),
            };
        }
        if now_t < start {
            return PeriodStatus {
                current: None,
                next: Some(p),
                seconds_left: 0,
            };
        }
    }

    PeriodStatus {
        current: None,
        next: None,
        seconds_left: 0,
    }
}

/// Zero-padded `MM:SS` countdown string.
pub fn format_countdown(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}", s / 60, s % 60)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
