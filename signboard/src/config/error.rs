/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured validation errors for the display settings.
//!
//! The period resolver assumes each schedule list is strictly ascending and
//! non-overlapping; instead of re-checking that on every one-second tick,
//! violations are rejected here, once, when a settings value enters the
//! system.  Every variant carries the schedule name and offending period id
//! so the operator can fix the file without guessing.

use thiserror::Error;

/// Why a [`DisplaySettings`](super::DisplaySettings) value was rejected.
///
/// Returned by [`validate`](super::validate) and by everything that feeds
/// settings into the engine ([`SettingsManager::load_from_file`],
/// [`SettingsManager::replace`]).
///
/// [`SettingsManager::load_from_file`]: super::SettingsManager::load_from_file
/// [`SettingsManager::replace`]: super::SettingsManager::replace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A `start`/`end` field in a schedule does not parse as `HH:MM`.
    #[error("{schedule} schedule, period {period_id}: cannot parse '{value}' as HH:MM")]
    UnparseableTime {
        schedule: &'static str,
        period_id: u32,
        value: String,
    },

    /// A period starts before the previous period in the list has ended
    /// (covers both out-of-order entries and overlapping intervals).
    #[error("{schedule} schedule, period {period_id}: starts before the previous period ends")]
    UnorderedPeriods {
        schedule: &'static str,
        period_id: u32,
    },

    /// A period whose start is not strictly before its end.
    #[error("{schedule} schedule, period {period_id}: start must be before end")]
    EmptyPeriodInterval {
        schedule: &'static str,
        period_id: u32,
    },

    /// An activity-day entry outside the weekday range.
    #[error("activity day index {value} is out of range (0 = Sunday … 6 = Saturday)")]
    InvalidWeekday { value: u32 },
}
