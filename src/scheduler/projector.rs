//! Shift-calendar schedule projection.
//!
//! # Algorithm
//!
//! 1. Zero work completes at the start instant and consumes no shift.
//! 2. Walk forward from the start instant one calendar date at a time.
//! 3. On a day off, or at/after the shift end, move to the next date at 00:00.
//! 4. Before the shift start, snap forward to the shift start.
//! 5. Otherwise consume `min(remaining, shift_end - now)` and record a
//!    segment for the date.
//! 6. Stop when nothing remains; fail after `max_day_advances` date moves.
//!
//! # Breaks
//! In [`CapacityMode::WallClock`] (the default) the per-day draw runs against
//! the wall-clock window and breaks are not subtracted, while
//! [`WeeklyShiftCalendar::daily_capacity_minutes`] does subtract them. The
//! two numbers therefore disagree for days with breaks.
//! [`CapacityMode::NetOfBreaks`] closes each day early by its break minutes
//! so the projection agrees with the displayed capacity.
//!
//! # Complexity
//! O(d) where d = calendar dates walked (bounded by `max_day_advances`).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};
use crate::models::{DaySchedule, ScheduleProjection, WeeklyShiftCalendar, WorkSegment};

/// Default cap on calendar-date advances per projection.
pub const DEFAULT_MAX_DAY_ADVANCES: u32 = 1000;

const MS_PER_MINUTE: f64 = 60_000.0;

/// How a work day's breaks affect the minutes the projector may draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityMode {
    /// Draw against the full `[start, end)` window; breaks ignored.
    #[default]
    WallClock,
    /// Close the window early by the day's aggregate break minutes.
    NetOfBreaks,
}

/// Projector settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Maximum moves to a following calendar date before giving up.
    pub max_day_advances: u32,
    /// Break handling for per-day draws.
    pub capacity_mode: CapacityMode,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_day_advances: DEFAULT_MAX_DAY_ADVANCES,
            capacity_mode: CapacityMode::WallClock,
        }
    }
}

impl ProjectorConfig {
    /// Sets the day-advance cap.
    pub fn with_max_day_advances(mut self, max_day_advances: u32) -> Self {
        self.max_day_advances = max_day_advances;
        self
    }

    /// Sets the break handling mode.
    pub fn with_capacity_mode(mut self, capacity_mode: CapacityMode) -> Self {
        self.capacity_mode = capacity_mode;
        self
    }
}

/// Projects workload completion on a weekly shift calendar.
///
/// Stateless apart from its configuration; a single projector can be shared
/// across threads.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use u_shift::models::WeeklyShiftCalendar;
/// use u_shift::scheduler::ScheduleProjector;
///
/// let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
/// let four = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
/// let cal = WeeklyShiftCalendar::builder("MON-WED")
///     .work_day(Weekday::Mon, eight, four)
///     .day_off(Weekday::Tue)
///     .work_day(Weekday::Wed, eight, four)
///     .day_off(Weekday::Thu)
///     .day_off(Weekday::Fri)
///     .day_off(Weekday::Sat)
///     .day_off(Weekday::Sun)
///     .build()
///     .unwrap();
///
/// // 2025-03-03 is a Monday.
/// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_time(eight);
/// let p = ScheduleProjector::new().project(&cal, 500.0, start).unwrap();
///
/// assert_eq!(p.end.to_string(), "2025-03-05 08:20:00");
/// assert_eq!(p.shifts_consumed, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleProjector {
    config: ProjectorConfig,
}

impl ScheduleProjector {
    /// Creates a projector with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ProjectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Projects when `required_minutes` of work started at `start` completes.
    ///
    /// # Errors
    /// - [`ShiftError::InvalidWorkload`] if `required_minutes` is negative or
    ///   not finite.
    /// - [`ShiftError::Unschedulable`] if the work does not fit within
    ///   `max_day_advances` calendar dates (e.g., a calendar with no work days).
    /// - [`ShiftError::DayNotFound`] if the calendar is malformed.
    pub fn project(
        &self,
        calendar: &WeeklyShiftCalendar,
        required_minutes: f64,
        start: NaiveDateTime,
    ) -> Result<ScheduleProjection> {
        if !required_minutes.is_finite() || required_minutes < 0.0 {
            return Err(ShiftError::invalid_workload(format!(
                "required minutes must be a non-negative number, got {required_minutes}"
            )));
        }

        if required_minutes == 0.0 {
            return Ok(ScheduleProjection::empty(start));
        }
        // any positive workload draws at least one millisecond
        let required_ms = (required_minutes * MS_PER_MINUTE).round().max(1.0) as i64;

        let mut cursor = start;
        let mut remaining = required_ms;
        let mut advances: u32 = 0;
        let mut segments: Vec<WorkSegment> = Vec::new();

        loop {
            let date = cursor.date();
            let entry = calendar.day_schedule(date.weekday())?;

            if let Some((open_ms, close_ms)) = self.work_window(entry) {
                let open_at = at_ms_of_day(date, open_ms);
                let close_at = at_ms_of_day(date, close_ms);
                if cursor < open_at {
                    cursor = open_at;
                }

                // whole milliseconds only, so a draw never passes close_at
                let available = (close_at - cursor).num_milliseconds();
                if available > 0 {
                    let consumed = remaining.min(available);
                    let segment_start = cursor;
                    cursor += TimeDelta::milliseconds(consumed);
                    remaining -= consumed;
                    segments.push(WorkSegment {
                        date,
                        start: segment_start,
                        end: cursor,
                    });
                    tracing::trace!(
                        calendar = calendar.id(),
                        %date,
                        consumed_ms = consumed,
                        remaining_ms = remaining,
                        "drew capacity from shift"
                    );

                    if remaining == 0 {
                        break;
                    }
                }
            }

            advances += 1;
            if advances > self.config.max_day_advances {
                return Err(self.unschedulable(calendar, required_minutes, start));
            }
            cursor = match date.succ_opt() {
                Some(next) => next.and_time(NaiveTime::MIN),
                None => return Err(self.unschedulable(calendar, required_minutes, start)),
            };
        }

        let projection = ScheduleProjection {
            start,
            end: cursor,
            required_minutes,
            shifts_consumed: segments.len() as u32,
            segments,
        };
        tracing::debug!(
            calendar = calendar.id(),
            %start,
            end = %projection.end,
            required_minutes,
            shifts = projection.shifts_consumed,
            "projected schedule"
        );
        Ok(projection)
    }

    /// Drawable `[open, close)` window in ms since midnight, or `None` on a
    /// day off.
    fn work_window(&self, entry: &DaySchedule) -> Option<(i64, i64)> {
        if !entry.is_work_day {
            return None;
        }
        let open = entry.start_ms_of_day();
        let close = match self.config.capacity_mode {
            CapacityMode::WallClock => entry.end_ms_of_day(),
            CapacityMode::NetOfBreaks => {
                let breaks_ms = i64::from(entry.break_minutes()) * 60_000;
                (entry.end_ms_of_day() - breaks_ms).max(open)
            }
        };
        Some((open, close))
    }

    fn unschedulable(
        &self,
        calendar: &WeeklyShiftCalendar,
        required_minutes: f64,
        start: NaiveDateTime,
    ) -> ShiftError {
        tracing::warn!(
            calendar = calendar.id(),
            %start,
            required_minutes,
            max_day_advances = self.config.max_day_advances,
            "no completion within day-advance bound"
        );
        ShiftError::Unschedulable {
            calendar_id: calendar.id().to_string(),
            max_day_advances: self.config.max_day_advances,
        }
    }
}

/// Projects with default settings (wall-clock windows, 1000-day bound).
pub fn project_schedule(
    calendar: &WeeklyShiftCalendar,
    required_minutes: f64,
    start: NaiveDateTime,
) -> Result<ScheduleProjection> {
    ScheduleProjector::new().project(calendar, required_minutes, start)
}

fn at_ms_of_day(date: NaiveDate, ms: i64) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::milliseconds(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WEEKDAYS;
    use chrono::Weekday;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// 2025-03-03 is a Monday.
    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn only_days(id: &str, work: &[Weekday], start: NaiveTime, end: NaiveTime) -> WeeklyShiftCalendar {
        WEEKDAYS
            .iter()
            .fold(WeeklyShiftCalendar::builder(id), |b, &d| {
                if work.contains(&d) {
                    b.work_day(d, start, end)
                } else {
                    b.day_off(d)
                }
            })
            .build()
            .unwrap()
    }

    fn monday_only() -> WeeklyShiftCalendar {
        only_days("MON", &[Weekday::Mon], hm(8, 0), hm(16, 0))
    }

    fn mon_wed() -> WeeklyShiftCalendar {
        only_days("MON-WED", &[Weekday::Mon, Weekday::Wed], hm(8, 0), hm(16, 0))
    }

    fn weekdays() -> WeeklyShiftCalendar {
        WeeklyShiftCalendar::builder("WEEK")
            .standard_week(hm(6, 0), hm(14, 0))
            .with_weekday_break("Lunch", 30)
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_workload() {
        for cal in [monday_only(), mon_wed(), weekdays()] {
            let start = at(4, 11, 17);
            let p = project_schedule(&cal, 0.0, start).unwrap();
            assert_eq!(p.end, start);
            assert_eq!(p.shifts_consumed, 0);
            assert!(p.segments.is_empty());
        }
    }

    #[test]
    fn test_zero_workload_on_closed_calendar() {
        let closed = only_days("CLOSED", &[], hm(8, 0), hm(16, 0));
        let p = project_schedule(&closed, 0.0, at(3, 8, 0)).unwrap();
        assert_eq!(p.end, at(3, 8, 0));
    }

    #[test]
    fn test_single_full_day() {
        let p = project_schedule(&monday_only(), 480.0, at(3, 8, 0)).unwrap();
        assert_eq!(p.end, at(3, 16, 0));
        assert_eq!(p.shifts_consumed, 1);
    }

    #[test]
    fn test_snap_forward_to_shift_start() {
        let p = project_schedule(&monday_only(), 60.0, at(3, 6, 0)).unwrap();
        assert_eq!(p.end, at(3, 9, 0));
        assert_eq!(p.first_work_instant(), Some(at(3, 8, 0)));
        assert_eq!(p.start, at(3, 6, 0));
    }

    #[test]
    fn test_spill_skips_day_off() {
        let p = project_schedule(&mon_wed(), 500.0, at(3, 8, 0)).unwrap();
        assert_eq!(p.end, at(5, 8, 20));
        assert_eq!(p.shifts_consumed, 2);
        assert_eq!(p.segments[0].date, at(3, 0, 0).date());
        assert_eq!(p.segments[1].date, at(5, 0, 0).date());
        assert!((p.segments[1].duration_minutes() - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_start_at_shift_end_moves_to_next_work_day() {
        let p = project_schedule(&mon_wed(), 30.0, at(3, 16, 0)).unwrap();
        assert_eq!(p.end, at(5, 8, 30));
        assert_eq!(p.shifts_consumed, 1);
    }

    #[test]
    fn test_start_mid_shift() {
        // 10:30 → 16:00 is 330 min; 70 spill into next Monday.
        let p = project_schedule(&monday_only(), 400.0, at(3, 10, 30)).unwrap();
        assert_eq!(p.end, at(10, 9, 10));
        assert_eq!(p.shifts_consumed, 2);
    }

    #[test]
    fn test_start_on_day_off() {
        // Saturday start waits for Monday.
        let p = project_schedule(&weekdays(), 60.0, at(8, 9, 0)).unwrap();
        assert_eq!(p.end, at(10, 7, 0));
    }

    #[test]
    fn test_exact_multi_day_fill_ends_at_shift_end() {
        // Two full 480-min windows: Monday and Tuesday.
        let p = project_schedule(&weekdays(), 960.0, at(3, 6, 0)).unwrap();
        assert_eq!(p.end, at(4, 14, 0));
        assert_eq!(p.shifts_consumed, 2);
    }

    #[test]
    fn test_wall_clock_ignores_breaks() {
        // Window is 480 even though displayed capacity is 450.
        let p = project_schedule(&weekdays(), 480.0, at(3, 6, 0)).unwrap();
        assert_eq!(p.end, at(3, 14, 0));
        assert_eq!(p.shifts_consumed, 1);
    }

    #[test]
    fn test_net_of_breaks_matches_capacity() {
        let projector = ScheduleProjector::new()
            .with_config(ProjectorConfig::default().with_capacity_mode(CapacityMode::NetOfBreaks));
        let p = projector.project(&weekdays(), 480.0, at(3, 6, 0)).unwrap();
        // 450 on Monday (closes 13:30), 30 on Tuesday.
        assert_eq!(p.segments[0].end, at(3, 13, 30));
        assert_eq!(p.end, at(4, 6, 30));
        assert_eq!(p.shifts_consumed, 2);
    }

    #[test]
    fn test_net_of_breaks_zero_capacity_day_skipped() {
        let cal = WeeklyShiftCalendar::builder("TIGHT")
            .standard_week(hm(8, 0), hm(9, 0))
            .with_break(Weekday::Mon, "Meeting", 90)
            .build()
            .unwrap();
        let projector = ScheduleProjector::new()
            .with_config(ProjectorConfig::default().with_capacity_mode(CapacityMode::NetOfBreaks));
        let p = projector.project(&cal, 30.0, at(3, 8, 0)).unwrap();
        assert_eq!(p.end, at(4, 8, 30));
    }

    #[test]
    fn test_all_days_off_is_unschedulable() {
        let closed = only_days("CLOSED", &[], hm(8, 0), hm(16, 0));
        let err = project_schedule(&closed, 1.0, at(3, 8, 0)).unwrap_err();
        assert_eq!(
            err,
            ShiftError::Unschedulable {
                calendar_id: "CLOSED".into(),
                max_day_advances: DEFAULT_MAX_DAY_ADVANCES,
            }
        );
    }

    #[test]
    fn test_zero_width_work_days_are_unschedulable() {
        let cal = only_days("EMPTY", &WEEKDAYS, hm(8, 0), hm(8, 0));
        let err = project_schedule(&cal, 10.0, at(3, 7, 0)).unwrap_err();
        assert!(matches!(err, ShiftError::Unschedulable { .. }));
    }

    #[test]
    fn test_day_advance_bound_is_configurable() {
        let projector = ScheduleProjector::new()
            .with_config(ProjectorConfig::default().with_max_day_advances(3));
        // Needs the following Monday: 7 advances.
        let err = projector
            .project(&monday_only(), 600.0, at(3, 8, 0))
            .unwrap_err();
        assert!(matches!(err, ShiftError::Unschedulable { max_day_advances: 3, .. }));

        let p = ScheduleProjector::new()
            .project(&monday_only(), 600.0, at(3, 8, 0))
            .unwrap();
        assert_eq!(p.end, at(10, 10, 0));
    }

    #[test]
    fn test_negative_or_nan_required_rejected() {
        assert!(matches!(
            project_schedule(&monday_only(), -1.0, at(3, 8, 0)),
            Err(ShiftError::InvalidWorkload(_))
        ));
        assert!(matches!(
            project_schedule(&monday_only(), f64::NAN, at(3, 8, 0)),
            Err(ShiftError::InvalidWorkload(_))
        ));
    }

    #[test]
    fn test_sub_millisecond_workload_on_closed_calendar() {
        let closed = only_days("CLOSED", &[], hm(8, 0), hm(16, 0));
        let err = project_schedule(&closed, 1e-6, at(3, 8, 0)).unwrap_err();
        assert!(matches!(err, ShiftError::Unschedulable { .. }));
    }

    #[test]
    fn test_sub_millisecond_workload_consumes_a_shift() {
        let p = project_schedule(&monday_only(), 1e-6, at(3, 8, 0)).unwrap();
        assert_eq!(p.shifts_consumed, 1);
        assert!(p.end > p.start);
        assert!((p.required_minutes - 1e-6).abs() < 1e-15);
    }

    #[test]
    fn test_sub_millisecond_start_stays_inside_window() {
        let start = at(3, 8, 0) + TimeDelta::nanoseconds(500_000);
        let p = project_schedule(&monday_only(), 480.0, start).unwrap();
        assert!(p.segments[0].end <= at(3, 16, 0));
        assert_eq!(p.shifts_consumed, 2);
        assert!(p.end > at(10, 8, 0));
    }

    #[test]
    fn test_fractional_minutes() {
        let p = project_schedule(&monday_only(), 1.5, at(3, 8, 0)).unwrap();
        assert_eq!(p.end, at(3, 8, 1) + TimeDelta::seconds(30));
    }

    #[test]
    fn test_monotonic_in_required_minutes() {
        let mut rng = SmallRng::seed_from_u64(42);
        let cal = mon_wed();
        for _ in 0..200 {
            let a: f64 = rng.random_range(0.0..3000.0);
            let b: f64 = rng.random_range(0.0..3000.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let start = at(rng.random_range(3..10), rng.random_range(0..24), 0);

            let p_lo = project_schedule(&cal, lo, start).unwrap();
            let p_hi = project_schedule(&cal, hi, start).unwrap();
            assert!(p_lo.end <= p_hi.end, "{lo} → {}, {hi} → {}", p_lo.end, p_hi.end);
            assert!(p_lo.shifts_consumed <= p_hi.shifts_consumed);
        }
    }

    #[test]
    fn test_segments_cover_required_minutes() {
        let p = project_schedule(&weekdays(), 1234.0, at(4, 12, 0)).unwrap();
        let drawn: f64 = p.segments.iter().map(|s| s.duration_minutes()).sum();
        assert!((drawn - 1234.0).abs() < 1e-6);
        assert_eq!(p.shifts_consumed as usize, p.segments.len());
    }
}
