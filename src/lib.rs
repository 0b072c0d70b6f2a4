//! Shift-calendar scheduling for manufacturing lines.
//!
//! Projects when an order's work completes on a recurring weekly shift
//! calendar, and provides the engineering calculations that size that work.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WeeklyShiftCalendar`, `DaySchedule`,
//!   `Workload`, `ProductionOrder`, `ScheduleProjection`
//! - **`validation`**: Calendar integrity checks (missing/duplicate weekdays,
//!   inverted shifts)
//! - **`scheduler`**: `ScheduleProjector`, `OrderPlanner`, `PlanKpi`
//! - **`engineering`**: Time studies and line balancing
//! - **`error`**: `ShiftError` and the crate `Result` alias
//!
//! # Quick Start
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use u_shift::models::{weekly_capacity_minutes, WeeklyShiftCalendar, Workload};
//! use u_shift::scheduler::project_schedule;
//!
//! let cal = WeeklyShiftCalendar::builder("2-SHIFT")
//!     .standard_week(
//!         NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
//!         NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
//!     )
//!     .with_weekday_break("Lunch", 30)
//!     .build()
//!     .unwrap();
//! assert_eq!(weekly_capacity_minutes(&cal), 2250);
//!
//! let work = Workload::new(300, 2.4, 80.0).unwrap(); // 900 min
//! let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(6, 0, 0).unwrap();
//! let p = project_schedule(&cal, work.required_minutes(), start).unwrap();
//!
//! assert_eq!(p.end.to_string(), "2025-03-04 13:00:00");
//! assert_eq!(p.shifts_consumed, 2);
//! ```
//!
//! # Concurrency
//!
//! Everything here is a pure computation over immutable inputs. All types
//! are `Send + Sync` and need no synchronization.

pub mod engineering;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ShiftError};
