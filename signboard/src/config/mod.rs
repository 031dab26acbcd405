//! Display settings: loading, validation and publication.
//!
//! The expected YAML structure is:
//! ```yaml
//! school_name: "المدرسة النموذجية"
//! activity_days: [2]
//! news_seconds: 25
//! logo_seconds: 5
//! goals_seconds: 10
//! media:
//!   - id: "1"
//!     kind: image
//!     url: "https://example.org/lab.jpg"
//!     duration_seconds: 10
//!     caption: "نشاط الطلاب في المعمل"
//! schedule:
//!   normal:
//!     - { id: 1, name: "الطابور", start: "07:10", end: "07:25" }
//! ```
//!
//! [`SettingsManager`] owns the current settings value and republishes it
//! through a `tokio::sync::watch` channel.  The engine never caches settings
//! across firings — it reads the full current value from its receiver each
//! time a timer fires, so an external edit takes effect on the next firing
//! without an engine restart.

pub mod error;

pub use error::SettingsError;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::schedule::{parse_time_of_day, DayType};

// ── Content types ─────────────────────────────────────────────────────────────

/// One named interval of the school day (class, break, assembly).
///
/// `start`/`end` are `HH:MM` 24-hour wall-clock strings.  They stay as
/// strings here — the resolver parses them at evaluation time and treats an
/// unparseable value as "never active", so one bad entry arriving through
/// [`SettingsManager::replace`] cannot take the tick loop down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: u32,
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Kind of gallery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One gallery entry with its own dwell duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub kind: MediaKind,
    /// URL or local path of the asset.
    pub url: String,
    /// Seconds this item stays on screen.  Whole seconds, user-editable;
    /// non-positive values are clamped when the timer is armed.
    pub duration_seconds: i64,
    #[serde(default)]
    pub caption: String,
}

/// One strategic goal, paginated two at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub text: String,
}

/// One entry of the scrolling news band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub important: bool,
}

/// The two period lists a calendar day can run under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSet {
    pub normal: Vec<Period>,
    pub activity: Vec<Period>,
}

impl ScheduleSet {
    /// Period list governing a day of the given type.
    pub fn for_day(&self, day_type: DayType) -> &[Period] {
        match day_type {
            DayType::Normal => &self.normal,
            DayType::Activity => &self.activity,
        }
    }
}

// ── DisplaySettings ───────────────────────────────────────────────────────────

/// Complete configuration of the board.
///
/// Owned by the settings collaborator and passed to the engine read-only;
/// the engine only ever reads it, so replacing the value is the only way
/// content changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    // ── Identity content (static, consumed by the render layer) ──────────────
    pub school_name: String,
    /// Source locator of the school logo; also the logo interstitial asset.
    pub school_logo: String,
    pub vision: String,
    pub mission: String,
    pub developer_name: String,

    // ── Temporal knobs (whole seconds, no enforced minimum) ──────────────────
    /// Weekdays (0 = Sunday … 6 = Saturday) that run the activity schedule.
    pub activity_days: Vec<u32>,
    /// Seconds for one full traversal of the news band.
    pub news_seconds: i64,
    /// Seconds the logo interstitial stays up between media items.
    pub logo_seconds: i64,
    /// Seconds each goals page stays up.
    pub goals_seconds: i64,

    // ── Rotating content ─────────────────────────────────────────────────────
    pub news: Vec<NewsItem>,
    pub media: Vec<MediaItem>,
    pub goals: Vec<Goal>,

    // ── Schedules ────────────────────────────────────────────────────────────
    pub schedule: ScheduleSet,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            school_logo: String::new(),
            vision: String::new(),
            mission: String::new(),
            developer_name: String::new(),
            activity_days: vec![2],
            news_seconds: 25,
            logo_seconds: 5,
            goals_seconds: 10,
            news: Vec::new(),
            media: Vec::new(),
            goals: Vec::new(),
            schedule: ScheduleSet::default(),
        }
    }
}

fn period(id: u32, name: &str, start: &str, end: &str) -> Period {
    Period {
        id,
        name: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

impl Default for ScheduleSet {
    /// Stock timetable of the original deployment.  A settings file that
    /// omits `schedule` runs a usable school day out of the box.
    fn default() -> Self {
        Self {
            normal: vec![
                period(1, "الطابور", "07:10", "07:25"),
                period(2, "الحصة الأولى", "07:25", "08:05"),
                period(3, "الحصة الثانية", "08:10", "08:50"),
                period(4, "الحصة الثالثة", "08:55", "09:35"),
                period(5, "الحصة الرابعة", "09:40", "10:20"),
                period(6, "الفسحة", "10:20", "10:45"),
                period(7, "الحصة الخامسة", "10:45", "11:25"),
                period(8, "الحصة السادسة", "11:30", "12:10"),
                period(9, "الحصة السابعة", "12:15", "12:55"),
                period(10, "الحصة الثامنة", "13:00", "13:40"),
            ],
            activity: vec![
                period(1, "الطابور", "07:10", "07:45"),
                period(2, "الحصة الأولى", "07:45", "08:25"),
                period(3, "الحصة الثانية", "08:25", "09:05"),
                period(4, "الحصة الثالثة", "09:05", "09:45"),
                period(5, "الحصة الرابعة", "09:45", "10:25"),
                period(6, "الفسحة", "10:25", "10:50"),
                period(7, "الحصة الخامسة", "10:50", "11:30"),
                period(8, "الحصة السادسة", "11:30", "12:10"),
                period(9, "الحصة السابعة", "12:15", "12:55"),
                period(10, "الحصة الثامنة", "13:00", "13:40"),
            ],
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Checks the invariants the period resolver relies on.
///
/// The resolver scans each schedule in list order and stops at the first
/// match, so the lists must be strictly ascending and non-overlapping;
/// adjacent periods sharing a boundary (`end == next.start`) are fine.
pub fn validate(settings: &DisplaySettings) -> Result<(), SettingsError> {
    for &day in &settings.activity_days {
        if day > 6 {
            return Err(SettingsError::InvalidWeekday { value: day });
        }
    }
    validate_periods("normal", &settings.schedule.normal)?;
    validate_periods("activity", &settings.schedule.activity)?;
    Ok(())
}

fn validate_periods(schedule: &'static str, periods: &[Period]) -> Result<(), SettingsError> {
    let mut prev_end: Option<NaiveTime> = None;

    for p in periods {
        let start = parse_field(schedule, p.id, &p.start)?;
        let end = parse_field(schedule, p.id, &p.end)?;

        if start >= end {
            return Err(SettingsError::EmptyPeriodInterval {
                schedule,
                period_id: p.id,
            });
        }
        if let Some(prev) = prev_end {
            if start < prev {
                return Err(SettingsError::UnorderedPeriods {
                    schedule,
                    period_id: p.id,
                });
            }
        }
        prev_end = Some(end);
    }
    Ok(())
}

fn parse_field(
    schedule: &'static str,
    period_id: u32,
    value: &str,
) -> Result<NaiveTime, SettingsError> {
    parse_time_of_day(value).ok_or_else(|| SettingsError::UnparseableTime {
        schedule,
        period_id,
        value: value.to_string(),
    })
}

// ── SettingsManager ───────────────────────────────────────────────────────────

/// Loads, validates and publishes display settings.
///
/// Holds the sending half of the settings channel; the engine and any other
/// consumer hold [`subscribe`](Self::subscribe)d receivers.  Each successful
/// load or [`replace`](Self::replace) publishes a fresh `Arc` — consumers
/// always see a complete value, never a partially updated one.
#[derive(Debug)]
pub struct SettingsManager {
    tx: watch::Sender<Arc<DisplaySettings>>,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl SettingsManager {
    /// Creates a manager publishing the built-in defaults.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(DisplaySettings::default()));
        Self { tx, loaded: false }
    }

    /// Parses `path` and publishes its contents to all subscribers.
    ///
    /// Calling this method a second time replaces the previously published
    /// settings wholesale.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, if the YAML is
    /// structurally invalid, or if validation rejects the schedules.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading display settings from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open settings file: {}", path.display()))?;

        let settings: DisplaySettings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        validate(&settings)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;

        warn_on_degenerate_durations(&settings);

        debug!(
            normal_periods = settings.schedule.normal.len(),
            activity_periods = settings.schedule.activity.len(),
            media_items = settings.media.len(),
            goals = settings.goals.len(),
            news_items = settings.news.len(),
            "Settings parsed"
        );

        self.tx.send_replace(Arc::new(settings));
        self.loaded = true;

        info!("Successfully loaded display settings");
        Ok(())
    }

    /// Validates and publishes an in-memory settings value (the seam for an
    /// external settings editor).
    pub fn replace(&self, settings: DisplaySettings) -> Result<(), SettingsError> {
        validate(&settings)?;
        warn_on_degenerate_durations(&settings);
        self.tx.send_replace(Arc::new(settings));
        Ok(())
    }

    /// A receiver for the current and all future settings values.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DisplaySettings>> {
        self.tx.subscribe()
    }

    /// The currently published settings value.
    pub fn current(&self) -> Arc<DisplaySettings> {
        self.tx.borrow().clone()
    }

    /// Returns `true` after a successful call to [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-positive durations are legal input (clamped to 1 s when a timer is
/// armed); flag them once at publication time instead of on every firing.
fn warn_on_degenerate_durations(settings: &DisplaySettings) {
    for (name, value) in [
        ("news_seconds", settings.news_seconds),
        ("logo_seconds", settings.logo_seconds),
        ("goals_seconds", settings.goals_seconds),
    ] {
        if value < 1 {
            warn!(duration = name, value, "non-positive duration will be clamped to 1s");
        }
    }
    for item in &settings.media {
        if item.duration_seconds < 1 {
            warn!(
                media_id = %item.id,
                value = item.duration_seconds,
                "non-positive media duration will be clamped to 1s"
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn default_settings_have_expected_knobs() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.activity_days, vec![2]);
        assert_eq!(settings.news_seconds, 25);
        assert_eq!(settings.logo_seconds, 5);
        assert_eq!(settings.goals_seconds, 10);
        assert_eq!(settings.schedule.normal.len(), 10);
        assert_eq!(settings.schedule.activity.len(), 10);
        assert!(settings.media.is_empty());
    }

    #[test]
    fn default_schedules_pass_validation() {
        assert_eq!(validate(&DisplaySettings::default()), Ok(()));
    }

    #[test]
    fn for_day_selects_matching_list() {
        let schedule = ScheduleSet::default();
        assert_eq!(schedule.for_day(DayType::Normal)[1].end, "08:05");
        assert_eq!(schedule.for_day(DayType::Activity)[1].end, "08:25");
    }

    // ── load_from_file ────────────────────────────────────────────────────────

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
school_name: "المدرسة النموذجية"
school_logo: "logo.png"
activity_days: [2, 4]
news_seconds: 30
logo_seconds: 4
goals_seconds: 8
news:
  - id: "1"
    text: "أهلاً بكم في مدرستنا العامرة"
  - id: "2"
    text: "يبدأ اختبار منتصف الفصل الأسبوع القادم"
    important: true
media:
  - id: "1"
    kind: image
    url: "https://example.org/lab.jpg"
    duration_seconds: 10
    caption: "نشاط الطلاب في المعمل"
  - id: "2"
    kind: video
    url: "https://example.org/clip.mp4"
    duration_seconds: 15
goals:
  - id: "1"
    text: "ضمان مشاركة فاعلة بين المدرسة والمجتمع المحلي"
schedule:
  normal:
    - { id: 1, name: "الطابور", start: "07:10", end: "07:25" }
    - { id: 2, name: "الحصة الأولى", start: "07:25", end: "08:05" }
  activity:
    - { id: 1, name: "الطابور", start: "07:10", end: "07:45" }
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = SettingsManager::new();
        mgr.load_from_file(f.path()).unwrap();

        assert!(mgr.is_loaded());
        let settings = mgr.current();
        assert_eq!(settings.activity_days, vec![2, 4]);
        assert_eq!(settings.news_seconds, 30);
        assert_eq!(settings.news.len(), 2);
        assert!(settings.news[1].important);
        assert!(!settings.news[0].important);
        assert_eq!(settings.media[0].kind, MediaKind::Image);
        assert_eq!(settings.media[1].kind, MediaKind::Video);
        assert_eq!(settings.media[1].caption, "");
        assert_eq!(settings.schedule.normal.len(), 2);
        assert_eq!(settings.schedule.activity.len(), 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let f = yaml_tempfile("school_name: \"مدرسة\"\n");
        let mut mgr = SettingsManager::new();
        mgr.load_from_file(f.path()).unwrap();

        let settings = mgr.current();
        assert_eq!(settings.school_name, "مدرسة");
        assert_eq!(settings.goals_seconds, 10);
        assert_eq!(settings.schedule.normal.len(), 10);
    }

    #[test]
    fn missing_file_returns_error() {
        let mut mgr = SettingsManager::new();
        let result = mgr.load_from_file(Path::new("/nonexistent/settings.yaml"));
        assert!(result.is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        let mut mgr = SettingsManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn reload_replaces_previous_settings() {
        let f1 = yaml_tempfile("school_name: first\n");
        let f2 = yaml_tempfile("school_name: second\n");

        let mut mgr = SettingsManager::new();
        mgr.load_from_file(f1.path()).unwrap();
        assert_eq!(mgr.current().school_name, "first");

        mgr.load_from_file(f2.path()).unwrap();
        assert_eq!(mgr.current().school_name, "second");
    }

    // ── Validation ────────────────────────────────────────────────────────────

    fn settings_with_normal(periods: Vec<Period>) -> DisplaySettings {
        DisplaySettings {
            schedule: ScheduleSet {
                normal: periods,
                activity: Vec::new(),
            },
            ..DisplaySettings::default()
        }
    }

    #[test]
    fn unparseable_time_is_rejected() {
        let settings = settings_with_normal(vec![period(1, "x", "7h25", "08:05")]);
        assert_eq!(
            validate(&settings),
            Err(SettingsError::UnparseableTime {
                schedule: "normal",
                period_id: 1,
                value: "7h25".into(),
            })
        );
    }

    #[test]
    fn reversed_interval_is_rejected() {
        let settings = settings_with_normal(vec![period(3, "x", "09:00", "08:00")]);
        assert_eq!(
            validate(&settings),
            Err(SettingsError::EmptyPeriodInterval {
                schedule: "normal",
                period_id: 3,
            })
        );
    }

    #[test]
    fn overlapping_periods_are_rejected() {
        let settings = settings_with_normal(vec![
            period(1, "a", "07:00", "08:00"),
            period(2, "b", "07:30", "08:30"),
        ]);
        assert_eq!(
            validate(&settings),
            Err(SettingsError::UnorderedPeriods {
                schedule: "normal",
                period_id: 2,
            })
        );
    }

    #[test]
    fn adjacent_periods_share_a_boundary() {
        // end == next.start is the normal back-to-back timetable case
        let settings = settings_with_normal(vec![
            period(1, "a", "07:00", "08:00"),
            period(2, "b", "08:00", "09:00"),
        ]);
        assert_eq!(validate(&settings), Ok(()));
    }

    #[test]
    fn out_of_range_weekday_is_rejected() {
        let settings = DisplaySettings {
            activity_days: vec![7],
            ..DisplaySettings::default()
        };
        assert_eq!(
            validate(&settings),
            Err(SettingsError::InvalidWeekday { value: 7 })
        );
    }

    #[test]
    fn invalid_settings_file_is_rejected_on_load() {
        let yaml = r#"
schedule:
  normal:
    - { id: 1, name: "a", start: "09:00", end: "08:00" }
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = SettingsManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
        assert!(!mgr.is_loaded());
    }

    // ── replace / subscribe ───────────────────────────────────────────────────

    #[test]
    fn replace_publishes_to_subscribers() {
        let mgr = SettingsManager::new();
        let rx = mgr.subscribe();

        let settings = DisplaySettings {
            school_name: "updated".into(),
            ..DisplaySettings::default()
        };
        mgr.replace(settings).unwrap();

        assert_eq!(rx.borrow().school_name, "updated");
    }

    #[test]
    fn replace_rejects_invalid_settings_and_keeps_previous() {
        let mgr = SettingsManager::new();
        let invalid = DisplaySettings {
            activity_days: vec![9],
            ..DisplaySettings::default()
        };
        assert!(mgr.replace(invalid).is_err());
        assert_eq!(mgr.current().activity_days, vec![2]);
    }
}
