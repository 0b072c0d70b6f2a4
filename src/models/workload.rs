//! Workload and production order models.
//!
//! A workload converts an order's quantity, the engineered standard time
//! per unit, and the line's efficiency into the minutes a calendar must
//! absorb:
//!
//! ```text
//! required = quantity × standard_minutes_per_unit ÷ (efficiency_percent / 100)
//! ```
//!
//! Efficiency is validated here, before any projection, so the projector
//! never divides by zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// Work required by an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Units to produce.
    pub total_quantity: u32,
    /// Standard time per unit (minutes).
    pub standard_minutes_per_unit: f64,
    /// Line efficiency (percent, 100 = standard pace).
    pub efficiency_percent: f64,
}

impl Workload {
    /// Creates a validated workload.
    ///
    /// # Errors
    /// [`ShiftError::InvalidWorkload`] if quantity is zero, or the standard
    /// time or efficiency is not a positive finite number.
    pub fn new(
        total_quantity: u32,
        standard_minutes_per_unit: f64,
        efficiency_percent: f64,
    ) -> Result<Self> {
        let workload = Self {
            total_quantity,
            standard_minutes_per_unit,
            efficiency_percent,
        };
        workload.validate()?;
        Ok(workload)
    }

    /// Checks the workload's preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.total_quantity == 0 {
            return Err(ShiftError::invalid_workload("total quantity must be positive"));
        }
        if !(self.standard_minutes_per_unit.is_finite() && self.standard_minutes_per_unit > 0.0) {
            return Err(ShiftError::invalid_workload(format!(
                "standard time per unit must be positive, got {}",
                self.standard_minutes_per_unit
            )));
        }
        if !(self.efficiency_percent.is_finite() && self.efficiency_percent > 0.0) {
            return Err(ShiftError::invalid_workload(format!(
                "efficiency must be positive, got {}%",
                self.efficiency_percent
            )));
        }
        Ok(())
    }

    /// Minutes of work at standard pace (quantity × standard time).
    pub fn standard_minutes(&self) -> f64 {
        f64::from(self.total_quantity) * self.standard_minutes_per_unit
    }

    /// Minutes the calendar must absorb at the given efficiency.
    pub fn required_minutes(&self) -> f64 {
        self.standard_minutes() / (self.efficiency_percent / 100.0)
    }
}

/// A production order scheduled against a shift calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// Unique order identifier.
    pub id: String,
    /// Human-readable name (style, article).
    pub name: String,
    /// Calendar the order runs on.
    pub calendar_id: String,
    /// Work to perform.
    pub workload: Workload,
    /// Earliest start. `None` = available immediately.
    pub release: Option<NaiveDateTime>,
    /// Promised completion. `None` = no due date.
    pub due: Option<NaiveDateTime>,
}

impl ProductionOrder {
    /// Creates an order with no release or due date.
    pub fn new(id: impl Into<String>, calendar_id: impl Into<String>, workload: Workload) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            calendar_id: calendar_id.into(),
            workload,
            release: None,
            due: None,
        }
    }

    /// Sets the order name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the earliest start.
    pub fn with_release(mut self, release: NaiveDateTime) -> Self {
        self.release = Some(release);
        self
    }

    /// Sets the due date.
    pub fn with_due(mut self, due: NaiveDateTime) -> Self {
        self.due = Some(due);
        self
    }
}
