//! Production order planner.
//!
//! Resolves each order's calendar by ID and projects its workload onto it.
//! Orders planned as a sequence run back-to-back on one line: each starts
//! when the previous one ends, or at its own release, whichever is later.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};
use crate::models::{ProductionOrder, ScheduleProjection, WeeklyShiftCalendar};

use super::ScheduleProjector;

/// Calendars indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct CalendarRegistry {
    calendars: HashMap<String, WeeklyShiftCalendar>,
}

impl CalendarRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a calendar, replacing any calendar with the same ID.
    pub fn insert(&mut self, calendar: WeeklyShiftCalendar) -> Option<WeeklyShiftCalendar> {
        self.calendars.insert(calendar.id().to_string(), calendar)
    }

    /// Adds a calendar (builder style).
    pub fn with_calendar(mut self, calendar: WeeklyShiftCalendar) -> Self {
        self.insert(calendar);
        self
    }

    /// Looks up a calendar by ID.
    pub fn get(&self, id: &str) -> Option<&WeeklyShiftCalendar> {
        self.calendars.get(id)
    }

    /// Number of calendars.
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl FromIterator<WeeklyShiftCalendar> for CalendarRegistry {
    fn from_iter<I: IntoIterator<Item = WeeklyShiftCalendar>>(iter: I) -> Self {
        let mut registry = Self::new();
        for calendar in iter {
            registry.insert(calendar);
        }
        registry
    }
}

/// A single order's projected run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedOrder {
    /// Planned order ID.
    pub order_id: String,
    /// Calendar the order was projected on.
    pub calendar_id: String,
    /// Projected run.
    pub projection: ScheduleProjection,
}

/// Planned orders, in planning order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// Planned orders.
    pub orders: Vec<PlannedOrder>,
}

impl ProductionPlan {
    /// Latest completion across the plan.
    pub fn makespan_end(&self) -> Option<NaiveDateTime> {
        self.orders.iter().map(|o| o.projection.end).max()
    }

    /// Earliest start across the plan.
    pub fn earliest_start(&self) -> Option<NaiveDateTime> {
        self.orders.iter().map(|o| o.projection.start).min()
    }

    /// Finds a planned order by ID.
    pub fn find(&self, order_id: &str) -> Option<&PlannedOrder> {
        self.orders.iter().find(|o| o.order_id == order_id)
    }

    /// Shift instances consumed across all orders.
    pub fn total_shifts(&self) -> u32 {
        self.orders.iter().map(|o| o.projection.shifts_consumed).sum()
    }

    /// Number of planned orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the plan has no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Plans production orders on their shift calendars.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_shift::models::{ProductionOrder, WeeklyShiftCalendar, Workload};
/// use u_shift::scheduler::{CalendarRegistry, OrderPlanner};
///
/// let cal = WeeklyShiftCalendar::builder("DAY")
///     .standard_week(
///         NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
///     )
///     .build()
///     .unwrap();
/// let planner = OrderPlanner::new(CalendarRegistry::new().with_calendar(cal));
///
/// let order = ProductionOrder::new("PO-1", "DAY", Workload::new(120, 2.0, 100.0).unwrap());
/// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let planned = planner.plan_order(&order, start).unwrap();
///
/// assert_eq!(planned.projection.end.to_string(), "2025-03-03 12:00:00");
/// ```
#[derive(Debug, Clone)]
pub struct OrderPlanner {
    calendars: CalendarRegistry,
    projector: ScheduleProjector,
}

impl OrderPlanner {
    /// Creates a planner with the default projector.
    pub fn new(calendars: CalendarRegistry) -> Self {
        Self {
            calendars,
            projector: ScheduleProjector::new(),
        }
    }

    /// Replaces the projector.
    pub fn with_projector(mut self, projector: ScheduleProjector) -> Self {
        self.projector = projector;
        self
    }

    /// Registered calendars.
    pub fn calendars(&self) -> &CalendarRegistry {
        &self.calendars
    }

    /// Projects one order starting no earlier than `start` or its release.
    ///
    /// # Errors
    /// - [`ShiftError::InvalidWorkload`] if the order's workload is invalid.
    /// - [`ShiftError::CalendarNotFound`] if the calendar ID is unknown.
    /// - Any projection error.
    pub fn plan_order(&self, order: &ProductionOrder, start: NaiveDateTime) -> Result<PlannedOrder> {
        order.workload.validate()?;
        let calendar = self
            .calendars
            .get(&order.calendar_id)
            .ok_or_else(|| ShiftError::CalendarNotFound(order.calendar_id.clone()))?;

        let start = order.release.map_or(start, |r| r.max(start));
        let projection =
            self.projector
                .project(calendar, order.workload.required_minutes(), start)?;

        tracing::debug!(
            order = %order.id,
            calendar = %order.calendar_id,
            end = %projection.end,
            "planned order"
        );

        Ok(PlannedOrder {
            order_id: order.id.clone(),
            calendar_id: order.calendar_id.clone(),
            projection,
        })
    }

    /// Plans orders back-to-back in the given order.
    ///
    /// Fails on the first order that cannot be planned; no partial plan is
    /// returned.
    pub fn plan_sequence(
        &self,
        orders: &[ProductionOrder],
        start: NaiveDateTime,
    ) -> Result<ProductionPlan> {
        let mut plan = ProductionPlan::default();
        let mut cursor = start;

        for order in orders {
            let planned = self.plan_order(order, cursor)?;
            cursor = planned.projection.end;
            plan.orders.push(planned);
        }

        Ok(plan)
    }
}
