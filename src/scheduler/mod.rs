//! Schedule projection, order planning, and KPI evaluation.
//!
//! # Projection
//!
//! `ScheduleProjector` walks a weekly shift calendar forward from a start
//! instant, drawing work from each shift until the required minutes are
//! absorbed. It is a pure function of its inputs.
//!
//! # Planning
//!
//! `OrderPlanner` resolves production orders against calendars by ID and
//! chains them back-to-back on a line.
//!
//! # KPI
//!
//! `PlanKpi` computes makespan, tardiness, and on-time rate for a plan.

mod kpi;
mod planner;
mod projector;

pub use kpi::PlanKpi;
pub use planner::{CalendarRegistry, OrderPlanner, PlannedOrder, ProductionPlan};
pub use projector::{
    project_schedule, CapacityMode, ProjectorConfig, ScheduleProjector, DEFAULT_MAX_DAY_ADVANCES,
};
