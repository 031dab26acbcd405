//! Timer loops and snapshot publication.
//!
//! [`DisplayEngine`] drives four independent clocks from one cooperative
//! `select!` loop:
//!
//! | Clock | Discipline | Cadence |
//! |---|---|---|
//! | clock/period tick | repeating interval | fixed 1 s |
//! | media/logo alternator | single-shot sleep, re-armed per transition | per-item dwell |
//! | goals paginator | repeating interval | configured page dwell |
//! | news band | none (continuous motion, render-side) | configured cycle |
//!
//! The timers are intentionally unsynchronized — a goals-page change and a
//! media transition need not land on the same instant.  Within one timer's
//! sequence, transitions are strictly ordered: everything runs on this one
//! task, one expiry at a time, so the rotation cursors need no locks.
//!
//! On every firing the engine re-reads the full current settings value
//! from its watch receiver and publishes a freshly built
//! [`DisplaySnapshot`].  When the settings value is replaced, both
//! rotation timers are re-armed so no stale timer fires against content it
//! no longer owns.

pub mod snapshot;

pub use snapshot::{DisplaySnapshot, PeriodView};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::clock::{self, Clock};
use crate::config::DisplaySettings;
use crate::rotation::{clamp_dwell, GoalsPager, MediaRotation, TickerReel};
use crate::schedule;

/// Fixed cadence of the clock/period subsystem.
const TICK_PERIOD: Duration = Duration::from_secs(1);

// ── Snapshot assembly ─────────────────────────────────────────────────────────

/// Assembles a full snapshot from the settings, one instant and the
/// rotation cursors.  Pure: identical inputs yield an identical snapshot.
pub fn build_snapshot(
    settings: &DisplaySettings,
    now: DateTime<FixedOffset>,
    media: &MediaRotation,
    goals: &GoalsPager,
) -> DisplaySnapshot {
    let day_type = schedule::day_type(&settings.activity_days, now);
    let status = schedule::resolve(settings.schedule.for_day(day_type), now);

    DisplaySnapshot {
        period: status.current.map(PeriodView::from),
        seconds_left: status.seconds_left,
        countdown: schedule::format_countdown(status.seconds_left),
        upcoming: status.next.map(PeriodView::from),
        day_type,
        showing_logo: media.showing_logo(),
        media: media.current_item(&settings.media).cloned(),
        goals: goals.page(&settings.goals).into_iter().cloned().collect(),
        ticker: TickerReel::build(&settings.news, settings.news_seconds),
        clock_text: clock::clock_text(now),
        date_text: clock::date_text(now),
    }
}

// ── DisplayEngine ─────────────────────────────────────────────────────────────

/// Owns the rotation cursors and the snapshot channel.
///
/// Construction publishes an initial snapshot immediately; [`run`](Self::run)
/// then keeps it fresh until the settings channel closes.
pub struct DisplayEngine {
    clock: Arc<dyn Clock>,
    settings_rx: watch::Receiver<Arc<DisplaySettings>>,
    snapshot_tx: watch::Sender<DisplaySnapshot>,
    media: MediaRotation,
    goals: GoalsPager,
}

impl DisplayEngine {
    /// Creates an engine and the snapshot receiver the render layer
    /// consumes.  Rotation always starts at index 0.
    pub fn new(
        clock: Arc<dyn Clock>,
        settings_rx: watch::Receiver<Arc<DisplaySettings>>,
    ) -> (Self, watch::Receiver<DisplaySnapshot>) {
        let media = MediaRotation::new();
        let goals = GoalsPager::new();
        let initial = build_snapshot(&settings_rx.borrow(), clock.now(), &media, &goals);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        (
            Self {
                clock,
                settings_rx,
                snapshot_tx,
                media,
                goals,
            },
            snapshot_rx,
        )
    }

    /// Drives the display clocks until the settings channel closes.
    pub async fn run(mut self) {
        let mut clock_tick = time::interval(TICK_PERIOD);
        // A stalled host must not burst-fire a backlog of stale ticks.
        clock_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut goals_tick = self.goals_interval();
        let media_sleep = time::sleep(self.media.dwell(&self.current_settings()));
        tokio::pin!(media_sleep);

        loop {
            tokio::select! {
                _ = clock_tick.tick() => {
                    self.publish();
                }

                _ = &mut media_sleep => {
                    let settings = self.current_settings();
                    self.media.advance(settings.media.len());
                    debug!(slot = ?self.media.slot(), "media rotation advanced");
                    media_sleep.as_mut().reset(Instant::now() + self.media.dwell(&settings));
                    self.publish();
                }

                _ = goals_tick.tick() => {
                    let settings = self.current_settings();
                    self.goals.advance(settings.goals.len());
                    debug!(cursor = self.goals.cursor(), "goals page advanced");
                    self.publish();
                }

                changed = self.settings_rx.changed() => {
                    if changed.is_err() {
                        info!("settings channel closed, stopping display engine");
                        return;
                    }
                    // A stale timer must not fire against settings it no
                    // longer owns: re-arm both rotation timers with the new
                    // durations.
                    let settings = self.settings_rx.borrow_and_update().clone();
                    goals_tick = self.goals_interval();
                    media_sleep.as_mut().reset(Instant::now() + self.media.dwell(&settings));
                    debug!("settings replaced, rotation timers re-armed");
                    self.publish();
                }
            }
        }
    }

    fn current_settings(&self) -> Arc<DisplaySettings> {
        self.settings_rx.borrow().clone()
    }

    /// Fresh repeating timer for the goals page dwell.  The first firing is
    /// one full dwell away — pages never advance at arm time.
    fn goals_interval(&self) -> time::Interval {
        let dwell = clamp_dwell(self.current_settings().goals_seconds);
        let mut interval = time::interval_at(Instant::now() + dwell, dwell);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    }

    /// Rebuilds the snapshot wholesale and replaces the published value.
    fn publish(&self) {
        let snapshot = build_snapshot(
            &self.current_settings(),
            self.clock.now(),
            &self.media,
            &self.goals,
        );
        self.snapshot_tx.send_replace(snapshot);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
