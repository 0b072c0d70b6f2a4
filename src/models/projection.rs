//! Schedule projection (result) model.
//!
//! A projection is derived, read-only output: it is recomputed whenever the
//! calendar, workload, or start instant changes and has no identity of its
//! own.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Work drawn from one shift instance (one calendar date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSegment {
    /// Calendar date of the shift instance.
    pub date: NaiveDate,
    /// First instant of work on that date.
    pub start: NaiveDateTime,
    /// Instant work stopped on that date.
    pub end: NaiveDateTime,
}

impl WorkSegment {
    /// Wall-clock minutes covered by this segment.
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }
}

/// Projected completion of a workload on a shift calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleProjection {
    /// Instant the projection started from (before any snap to shift start).
    pub start: NaiveDateTime,
    /// Instant the work completes.
    pub end: NaiveDateTime,
    /// Minutes of work absorbed.
    pub required_minutes: f64,
    /// Distinct shift instances work was drawn from.
    pub shifts_consumed: u32,
    /// Per-shift work, chronological.
    pub segments: Vec<WorkSegment>,
}

impl ScheduleProjection {
    /// Projection of zero work: ends where it starts, consumes no shift.
    pub fn empty(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start,
            required_minutes: 0.0,
            shifts_consumed: 0,
            segments: Vec::new(),
        }
    }

    /// Instant work actually began (first segment start), if any work ran.
    pub fn first_work_instant(&self) -> Option<NaiveDateTime> {
        self.segments.first().map(|s| s.start)
    }

    /// Wall-clock minutes from `start` to `end`, including nights and days off.
    pub fn elapsed_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }

    /// Whether work finishes no later than `deadline`.
    pub fn finishes_by(&self, deadline: NaiveDateTime) -> bool {
        self.end <= deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_projection() {
        let p = ScheduleProjection::empty(at(3, 8, 0));
        assert_eq!(p.end, p.start);
        assert_eq!(p.shifts_consumed, 0);
        assert!(p.first_work_instant().is_none());
        assert!((p.elapsed_minutes() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_segment_and_elapsed() {
        let seg = WorkSegment {
            date: at(3, 0, 0).date(),
            start: at(3, 8, 0),
            end: at(3, 9, 30),
        };
        assert!((seg.duration_minutes() - 90.0).abs() < 1e-10);

        let p = ScheduleProjection {
            start: at(3, 6, 0),
            end: at(3, 9, 30),
            required_minutes: 90.0,
            shifts_consumed: 1,
            segments: vec![seg],
        };
        assert_eq!(p.first_work_instant(), Some(at(3, 8, 0)));
        assert!((p.elapsed_minutes() - 210.0).abs() < 1e-10);
        assert!(p.finishes_by(at(3, 9, 30)));
        assert!(!p.finishes_by(at(3, 9, 29)));
    }
}
