//! Weekly shift calendar model.
//!
//! A calendar is a recurring 7-day work pattern: for each weekday, whether
//! production runs, the shift's start and end time of day, and the unpaid
//! breaks taken during it.
//!
//! # Capacity
//! A work day's capacity is `max(0, (end - start) - sum(breaks))` minutes.
//! Breaks are aggregate minutes; they have no position on the clock.
//! A day off has zero capacity regardless of its times.
//!
//! # Time Model
//! Times of day are [`NaiveTime`] values on a 24h clock. Shifts never cross
//! midnight: a work day requires `start_time <= end_time`.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};
use crate::validation::{self, ValidationError};

/// Weekdays in calendar order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// An unpaid break within a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBreak {
    /// Break label (e.g., "Lunch").
    pub name: String,
    /// Break length (minutes).
    pub duration_minutes: u32,
}

impl ShiftBreak {
    /// Creates a new break.
    pub fn new(name: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            name: name.into(),
            duration_minutes,
        }
    }
}

/// Schedule for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Weekday this entry describes.
    pub day: Weekday,
    /// Whether production runs on this weekday.
    pub is_work_day: bool,
    /// Shift start (time of day).
    pub start_time: NaiveTime,
    /// Shift end (time of day, exclusive).
    pub end_time: NaiveTime,
    /// Unpaid breaks, in the order they are taken.
    #[serde(default)]
    pub breaks: Vec<ShiftBreak>,
}

impl DaySchedule {
    /// Creates a work day running `[start, end)`.
    pub fn work(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day,
            is_work_day: true,
            start_time: start,
            end_time: end,
            breaks: Vec::new(),
        }
    }

    /// Creates a day off.
    pub fn off(day: Weekday) -> Self {
        Self {
            day,
            is_work_day: false,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            breaks: Vec::new(),
        }
    }

    /// Adds a break.
    pub fn with_break(mut self, name: impl Into<String>, duration_minutes: u32) -> Self {
        self.breaks.push(ShiftBreak::new(name, duration_minutes));
        self
    }

    /// Wall-clock shift length (minutes). Zero on a day off.
    ///
    /// Counted in whole minutes: leftover seconds in the start or end time
    /// are dropped, so a 08:00:30-16:00:00 shift reports 479. The projector
    /// draws against the exact window.
    pub fn window_minutes(&self) -> u32 {
        if !self.is_work_day || self.end_time <= self.start_time {
            return 0;
        }
        let span = (self.end_time - self.start_time).num_minutes();
        u32::try_from(span).unwrap_or(0)
    }

    /// Aggregate break length (minutes).
    pub fn break_minutes(&self) -> u32 {
        self.breaks
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.duration_minutes))
    }

    /// Working minutes available on this day, net of breaks.
    ///
    /// Floors at zero when breaks exceed the shift window.
    pub fn capacity_minutes(&self) -> u32 {
        if !self.is_work_day {
            return 0;
        }
        self.window_minutes().saturating_sub(self.break_minutes())
    }

    /// Shift start as milliseconds since midnight.
    #[inline]
    pub(crate) fn start_ms_of_day(&self) -> i64 {
        ms_of_day(self.start_time)
    }

    /// Shift end as milliseconds since midnight.
    #[inline]
    pub(crate) fn end_ms_of_day(&self) -> i64 {
        ms_of_day(self.end_time)
    }
}

/// Milliseconds elapsed since midnight.
#[inline]
pub(crate) fn ms_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * 1000 + i64::from(time.nanosecond() / 1_000_000)
}

/// A recurring weekly work pattern.
///
/// Always holds exactly one [`DaySchedule`] per weekday, stored Monday
/// first. Construct through [`WeeklyShiftCalendar::builder`] (or
/// deserialize, which runs the same validation).
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use u_shift::models::WeeklyShiftCalendar;
///
/// let six = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// let two = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
///
/// let cal = WeeklyShiftCalendar::builder("SHIFT-A")
///     .name("Morning shift")
///     .standard_week(six, two)
///     .with_weekday_break("Lunch", 30)
///     .build()
///     .unwrap();
///
/// assert_eq!(cal.daily_capacity_minutes(Weekday::Mon), 450);
/// assert_eq!(cal.weekly_capacity_minutes(), 2250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarDef")]
pub struct WeeklyShiftCalendar {
    /// Calendar identifier.
    id: String,
    /// Display label.
    name: String,
    /// One entry per weekday, Monday first.
    weekly_schedule: Vec<DaySchedule>,
}

impl WeeklyShiftCalendar {
    /// Starts building a calendar with the given ID.
    pub fn builder(id: impl Into<String>) -> CalendarBuilder {
        CalendarBuilder::new(id)
    }

    /// Calendar identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All seven day entries, Monday first.
    pub fn weekly_schedule(&self) -> &[DaySchedule] {
        &self.weekly_schedule
    }

    /// Looks up the entry for a weekday.
    ///
    /// Cannot fail on a calendar produced by the builder; returns
    /// [`ShiftError::DayNotFound`] only if the weekly entries are malformed.
    pub fn day_schedule(&self, day: Weekday) -> Result<&DaySchedule> {
        let idx = day.num_days_from_monday() as usize;
        match self.weekly_schedule.get(idx) {
            Some(entry) if entry.day == day => Ok(entry),
            _ => self
                .weekly_schedule
                .iter()
                .find(|d| d.day == day)
                .ok_or(ShiftError::DayNotFound(day)),
        }
    }

    /// Working minutes on a weekday, net of breaks. Zero on a day off.
    pub fn daily_capacity_minutes(&self, day: Weekday) -> u32 {
        self.day_schedule(day)
            .map(DaySchedule::capacity_minutes)
            .unwrap_or(0)
    }

    /// Sum of daily capacities over the week.
    pub fn weekly_capacity_minutes(&self) -> u32 {
        self.weekly_schedule
            .iter()
            .map(DaySchedule::capacity_minutes)
            .sum()
    }

    /// Wall-clock shift length on a weekday (breaks not subtracted).
    pub fn window_minutes(&self, day: Weekday) -> u32 {
        self.day_schedule(day)
            .map(DaySchedule::window_minutes)
            .unwrap_or(0)
    }

    /// Aggregate break minutes on a weekday.
    pub fn break_minutes(&self, day: Weekday) -> u32 {
        self.day_schedule(day)
            .map(DaySchedule::break_minutes)
            .unwrap_or(0)
    }

    /// Weekdays on which production runs, Monday first.
    pub fn work_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.weekly_schedule
            .iter()
            .filter(|d| d.is_work_day)
            .map(|d| d.day)
    }

    /// Whether any weekday is a work day.
    pub fn has_work_days(&self) -> bool {
        self.weekly_schedule.iter().any(|d| d.is_work_day)
    }
}

/// Sum of daily capacities over the week (minutes).
pub fn weekly_capacity_minutes(calendar: &WeeklyShiftCalendar) -> u32 {
    calendar.weekly_capacity_minutes()
}

/// Builder for [`WeeklyShiftCalendar`].
///
/// Setting a day that already has an entry replaces it. [`build`](Self::build)
/// validates the result and fails fast instead of defaulting missing days.
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    id: String,
    name: String,
    days: Vec<DaySchedule>,
    pending: Vec<ValidationError>,
}

impl CalendarBuilder {
    /// Creates a builder with no day entries.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            days: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Sets the display label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a work day running `[start, end)`.
    pub fn work_day(self, day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        self.upsert(DaySchedule::work(day, start, end))
    }

    /// Sets a day off.
    pub fn day_off(self, day: Weekday) -> Self {
        self.upsert(DaySchedule::off(day))
    }

    /// Sets Monday through Friday as work days and the weekend off.
    pub fn standard_week(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        for day in WEEKDAYS {
            self = match day {
                Weekday::Sat | Weekday::Sun => self.day_off(day),
                _ => self.work_day(day, start, end),
            };
        }
        self
    }

    /// Adds a break to a day that already has an entry.
    pub fn with_break(mut self, day: Weekday, name: impl Into<String>, duration_minutes: u32) -> Self {
        let name = name.into();
        match self.days.iter_mut().rev().find(|d| d.day == day) {
            Some(entry) => entry.breaks.push(ShiftBreak::new(name, duration_minutes)),
            None => self.pending.push(validation::orphan_break(day, &name)),
        }
        self
    }

    /// Adds the same break to every work day set so far.
    pub fn with_weekday_break(mut self, name: impl Into<String>, duration_minutes: u32) -> Self {
        let name = name.into();
        for entry in self.days.iter_mut().filter(|d| d.is_work_day) {
            entry.breaks.push(ShiftBreak::new(name.clone(), duration_minutes));
        }
        self
    }

    /// Appends a raw entry without replacing an existing one.
    pub fn with_day(mut self, entry: DaySchedule) -> Self {
        self.days.push(entry);
        self
    }

    /// Validates and builds the calendar.
    ///
    /// # Errors
    /// [`ShiftError::InvalidCalendar`] listing every issue found.
    pub fn build(self) -> Result<WeeklyShiftCalendar> {
        let mut errors = self.pending;
        if let Err(found) = validation::validate_calendar(&self.id, &self.days) {
            errors.extend(found);
        }
        if !errors.is_empty() {
            return Err(ShiftError::InvalidCalendar(errors));
        }

        let mut days = self.days;
        days.sort_by_key(|d| d.day.num_days_from_monday());

        for entry in days.iter().filter(|d| d.is_work_day) {
            if entry.break_minutes() > entry.window_minutes() {
                tracing::warn!(
                    calendar = %self.id,
                    day = %entry.day,
                    window = entry.window_minutes(),
                    breaks = entry.break_minutes(),
                    "breaks exceed shift window; capacity floors at zero"
                );
            }
        }

        Ok(WeeklyShiftCalendar {
            id: self.id,
            name: self.name,
            weekly_schedule: days,
        })
    }

    fn upsert(mut self, entry: DaySchedule) -> Self {
        match self.days.iter_mut().find(|d| d.day == entry.day) {
            Some(existing) => *existing = entry,
            None => self.days.push(entry),
        }
        self
    }
}

/// Wire shape of a calendar; validated into [`WeeklyShiftCalendar`].
#[derive(Deserialize)]
struct CalendarDef {
    id: String,
    #[serde(default)]
    name: String,
    weekly_schedule: Vec<DaySchedule>,
}

impl TryFrom<CalendarDef> for WeeklyShiftCalendar {
    type Error = ShiftError;

    fn try_from(def: CalendarDef) -> Result<Self> {
        def.weekly_schedule
            .into_iter()
            .fold(CalendarBuilder::new(def.id).name(def.name), |b, d| b.with_day(d))
            .build()
    }
}
