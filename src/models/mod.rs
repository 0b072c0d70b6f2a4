//! Shift scheduling domain models.
//!
//! Provides the data types for describing when a production line works
//! and how much work an order brings to it.
//!
//! # Domain Mappings
//!
//! | u-shift | Garment plant | Dashboard screen |
//! |---------|---------------|------------------|
//! | WeeklyShiftCalendar | Shift pattern | Calendar CRUD |
//! | Workload | Quantity × standard minutes | Order form |
//! | ProductionOrder | Cutting/sewing order | Scheduling task |
//! | ScheduleProjection | Gantt bar | Timeline |

mod calendar;
mod projection;
mod workload;

pub use calendar::{
    weekly_capacity_minutes, CalendarBuilder, DaySchedule, ShiftBreak, WeeklyShiftCalendar,
    WEEKDAYS,
};
pub use projection::{ScheduleProjection, WorkSegment};
pub use workload::{ProductionOrder, Workload};
