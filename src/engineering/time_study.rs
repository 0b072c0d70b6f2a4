//! Stopwatch time study.
//!
//! Converts observed cycle times for one work element into a standard
//! time:
//!
//! ```text
//! normal   = mean(observed) × rating / 100
//! standard = normal × (1 + allowance / 100)
//! ```
//!
//! The rating corrects for the observed operator's pace (100 = normal
//! pace); the allowance covers personal needs, fatigue, and unavoidable
//! delay.
//!
//! # Reference
//! Freivalds & Niebel (2014), "Methods, Standards, and Work Design", Ch. 10-11

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// A time study of one work element.
///
/// # Example
///
/// ```
/// use u_shift::engineering::TimeStudy;
///
/// let study = TimeStudy::new("Attach collar", vec![0.50, 0.55, 0.45, 0.50])
///     .with_rating(110.0)
///     .with_allowance(15.0);
///
/// let standard = study.standard_time().unwrap();
/// assert!((standard - 0.6325).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStudy {
    /// Work element being studied.
    pub element: String,
    /// Observed cycle times (minutes).
    pub observations: Vec<f64>,
    /// Performance rating (percent, 100 = normal pace).
    pub rating_percent: f64,
    /// Personal, fatigue, and delay allowance (percent).
    pub allowance_percent: f64,
}

impl TimeStudy {
    /// Creates a study at 100% rating with no allowance.
    pub fn new(element: impl Into<String>, observations: Vec<f64>) -> Self {
        Self {
            element: element.into(),
            observations,
            rating_percent: 100.0,
            allowance_percent: 0.0,
        }
    }

    /// Sets the performance rating.
    pub fn with_rating(mut self, rating_percent: f64) -> Self {
        self.rating_percent = rating_percent;
        self
    }

    /// Sets the allowance.
    pub fn with_allowance(mut self, allowance_percent: f64) -> Self {
        self.allowance_percent = allowance_percent;
        self
    }

    /// Adds an observed cycle.
    pub fn record(&mut self, minutes: f64) {
        self.observations.push(minutes);
    }

    /// Mean observed cycle time (minutes).
    pub fn observed_average(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.observations.iter().sum::<f64>() / self.observations.len() as f64)
    }

    /// Observed average adjusted to normal pace (minutes).
    pub fn normal_time(&self) -> Result<f64> {
        Ok(self.observed_average()? * self.rating_percent / 100.0)
    }

    /// Normal time plus allowances (minutes per unit).
    pub fn standard_time(&self) -> Result<f64> {
        Ok(self.normal_time()? * (1.0 + self.allowance_percent / 100.0))
    }

    /// Units one operator produces per hour at standard time.
    pub fn units_per_hour(&self) -> Result<f64> {
        Ok(60.0 / self.standard_time()?)
    }

    fn validate(&self) -> Result<()> {
        if self.observations.is_empty() {
            return Err(ShiftError::invalid_workload(format!(
                "time study '{}' has no observations",
                self.element
            )));
        }
        if let Some(bad) = self
            .observations
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0))
        {
            return Err(ShiftError::invalid_workload(format!(
                "time study '{}' has non-positive observation {bad}",
                self.element
            )));
        }
        if !(self.rating_percent.is_finite() && self.rating_percent > 0.0) {
            return Err(ShiftError::invalid_workload(format!(
                "rating must be positive, got {}%",
                self.rating_percent
            )));
        }
        if !(self.allowance_percent.is_finite() && self.allowance_percent >= 0.0) {
            return Err(ShiftError::invalid_workload(format!(
                "allowance must be non-negative, got {}%",
                self.allowance_percent
            )));
        }
        Ok(())
    }
}
