/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Wall-clock source for the display engine.
//!
//! Every temporal decision the board makes — day type, active period,
//! clock and date strings — is evaluated in one operating timezone.  The
//! offset is injected through [`SystemClock::new`] instead of being read
//! from the host environment, so the whole engine can be driven by a
//! synthetic clock in tests.

use chrono::{DateTime, FixedOffset, Locale, Utc};

// ── Operating constants ───────────────────────────────────────────────────────

/// Operating timezone of the deployment: UTC+4 (Asia/Muscat, no DST).
pub const OPERATING_OFFSET_SECONDS: i32 = 4 * 3600;

/// Formatting locale for the clock and date strings shown on the board.
pub const OPERATING_LOCALE: Locale = Locale::ar_OM;

/// The deployment offset as a [`FixedOffset`].
pub fn operating_offset() -> FixedOffset {
    // +04:00 is well inside FixedOffset's ±24 h range, so east_opt cannot
    // return None here.
    FixedOffset::east_opt(OPERATING_OFFSET_SECONDS).expect("static UTC offset")
}

// ── Clock trait ───────────────────────────────────────────────────────────────

/// Source of "now" in the operating timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Production clock: host UTC time shifted into the operating timezone.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Clock fixed to the deployment timezone.
    pub fn operating() -> Self {
        Self::new(operating_offset())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

// ── Display strings ───────────────────────────────────────────────────────────

/// 12-hour clock string in the operating locale, e.g. `07:40 ص`.
pub fn clock_text(now: DateTime<FixedOffset>) -> String {
    now.format_localized("%I:%M %p", OPERATING_LOCALE).to_string()
}

/// Long-form date string in the operating locale: weekday, day, month, year.
pub fn date_text(now: DateTime<FixedOffset>) -> String {
    now.format_localized("%A، %-d %B %Y", OPERATING_LOCALE)
        .to_string()
}

// ── Test helpers ──────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::TimeZone;

    /// Clock pinned to one instant; lets tests replay any wall-clock moment.
    pub(crate) struct FixedClock(pub DateTime<FixedOffset>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<FixedOffset> {
            self.0
        }
    }

    /// Sunday 2026-03-01 at the given time of day, operating timezone.
    pub(crate) fn sunday_at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        operating_offset()
            .with_ymd_and_hms(2026, 3, 1, h, m, s)
            .unwrap()
    }

    /// Tuesday 2026-03-03 at the given time of day, operating timezone.
    pub(crate) fn tuesday_at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        operating_offset()
            .with_ymd_and_hms(2026, 3, 3, h, m, s)
            .unwrap()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
