//! Production plan quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Earliest start to latest completion (wall clock) |
//! | Total Tardiness | Sum of max(0, completion - due) |
//! | Maximum Tardiness | Largest single delay |
//! | On-Time Rate | Fraction meeting due dates |
//! | Required Minutes | Work absorbed by the plan |
//! | Shifts | Shift instances consumed |
//!
//! Orders without a due date count as on time.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::ProductionOrder;

use super::ProductionPlan;

/// Plan performance indicators. Time values are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    /// Earliest start to latest completion (minutes).
    pub makespan_minutes: f64,
    /// Work absorbed across all planned orders (minutes).
    pub total_required_minutes: f64,
    /// Shift instances consumed across all planned orders.
    pub total_shifts: u32,
    /// Sum of tardiness across orders (minutes).
    pub total_tardiness_minutes: f64,
    /// Maximum tardiness of any single order (minutes).
    pub max_tardiness_minutes: f64,
    /// Fraction of orders completing on time (0.0..1.0).
    pub on_time_rate: f64,
}

impl PlanKpi {
    /// Computes KPIs from a plan and the orders it was built from.
    ///
    /// Orders missing from the plan are ignored.
    pub fn calculate(plan: &ProductionPlan, orders: &[ProductionOrder]) -> Self {
        let due_by_id: HashMap<&str, Option<NaiveDateTime>> =
            orders.iter().map(|o| (o.id.as_str(), o.due)).collect();

        let mut total_tardiness = 0.0;
        let mut max_tardiness: f64 = 0.0;
        let mut on_time_count: usize = 0;
        let mut counted: usize = 0;

        for planned in &plan.orders {
            let Some(due) = due_by_id.get(planned.order_id.as_str()) else {
                continue;
            };
            counted += 1;

            match due {
                Some(due) if planned.projection.end > *due => {
                    let tardiness = minutes_between(*due, planned.projection.end);
                    total_tardiness += tardiness;
                    max_tardiness = max_tardiness.max(tardiness);
                }
                _ => on_time_count += 1,
            }
        }

        let makespan_minutes = match (plan.earliest_start(), plan.makespan_end()) {
            (Some(start), Some(end)) => minutes_between(start, end),
            _ => 0.0,
        };

        let on_time_rate = if counted == 0 {
            1.0
        } else {
            on_time_count as f64 / counted as f64
        };

        Self {
            makespan_minutes,
            total_required_minutes: plan
                .orders
                .iter()
                .map(|o| o.projection.required_minutes)
                .sum(),
            total_shifts: plan.total_shifts(),
            total_tardiness_minutes: total_tardiness,
            max_tardiness_minutes: max_tardiness,
            on_time_rate,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_tardiness_minutes: f64, min_on_time_rate: f64) -> bool {
        self.max_tardiness_minutes <= max_tardiness_minutes && self.on_time_rate >= min_on_time_rate
    }
}

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}
