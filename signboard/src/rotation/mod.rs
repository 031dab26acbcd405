//! Rotation state for the three content panels.
//!
//! Two timer disciplines coexist here and must not be conflated:
//!
//! * [`MediaRotation`] is driven by a **single-shot timer re-armed on every
//!   transition** — the dwell differs per item, so a fixed-period timer
//!   cannot express it.
//! * [`GoalsPager`] is driven by a **fixed-period repeating timer** — every
//!   page dwells for the same configured duration.
//! * [`TickerReel`] has no timer at all: the news band moves continuously
//!   at constant velocity; this module only assembles its content and
//!   pacing.
//!
//! Each machine owns its cursor exclusively and is advanced from exactly
//! one timer arm of the engine loop, so no locking is needed anywhere.

pub mod goals;
pub mod media;
pub mod ticker;

pub use goals::GoalsPager;
pub use media::{MediaRotation, MediaSlot};
pub use ticker::TickerReel;

use std::time::Duration;

/// Smallest delay any timer is armed with.
///
/// Configured durations are user-editable whole seconds with no enforced
/// minimum; arming a timer with zero or a negative value would refire it in
/// a tight loop, so everything below 1 s is raised to this floor.
pub const MIN_DWELL: Duration = Duration::from_secs(1);

/// Converts a configured whole-second duration into a timer delay,
/// clamping to [`MIN_DWELL`].
pub fn clamp_dwell(seconds: i64) -> Duration {
    if seconds < 1 {
        MIN_DWELL
    } else {
        Duration::from_secs(seconds as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_dwell_floors_degenerate_durations() {
        assert_eq!(clamp_dwell(0), MIN_DWELL);
        assert_eq!(clamp_dwell(-10), MIN_DWELL);
        assert_eq!(clamp_dwell(1), Duration::from_secs(1));
        assert_eq!(clamp_dwell(25), Duration::from_secs(25));
    }
}
