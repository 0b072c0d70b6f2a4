//! Sewing line balancing.
//!
//! Distributes a garment's operations across the operators of a line so
//! their loads are as even as possible. The slowest station (bottleneck)
//! paces the whole line.
//!
//! # Algorithm
//!
//! Longest Processing Time first: sort operations by standard time
//! (descending, ties by input order), then give each to the operator with
//! the smallest load so far (ties to the lowest operator index).
//!
//! # Complexity
//! O(n log n + n·k) where n = operations, k = operators.
//!
//! # References
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (LPT)
//! - Freivalds & Niebel (2014), "Methods, Standards, and Work Design", Ch. 2

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// A sewing operation with its engineered standard time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Standard time per unit (minutes).
    pub standard_minutes: f64,
}

impl Operation {
    /// Creates an operation.
    pub fn new(id: impl Into<String>, standard_minutes: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            standard_minutes,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Operations assigned to one operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Operator index (0-based).
    pub operator: usize,
    /// Assigned operation IDs, in assignment order.
    pub operation_ids: Vec<String>,
    /// Sum of assigned standard times (minutes per unit).
    pub load_minutes: f64,
}

/// Result of balancing a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBalance {
    /// One station per operator.
    pub stations: Vec<Station>,
    /// Total standard minutes per unit across all operations.
    pub total_minutes: f64,
}

impl LineBalance {
    /// Largest station load (minutes per unit). Paces the line.
    pub fn bottleneck_minutes(&self) -> f64 {
        self.stations
            .iter()
            .map(|s| s.load_minutes)
            .fold(0.0, f64::max)
    }

    /// `total / (operators × bottleneck)`, in 0.0..=1.0.
    pub fn line_efficiency(&self) -> f64 {
        let capacity = self.stations.len() as f64 * self.bottleneck_minutes();
        if capacity <= 0.0 {
            0.0
        } else {
            self.total_minutes / capacity
        }
    }

    /// Idle share of the line: `1 - efficiency`.
    pub fn balance_loss(&self) -> f64 {
        1.0 - self.line_efficiency()
    }

    /// Units per hour the line produces at the bottleneck pace.
    pub fn hourly_output(&self) -> f64 {
        let bottleneck = self.bottleneck_minutes();
        if bottleneck <= 0.0 {
            0.0
        } else {
            60.0 / bottleneck
        }
    }

    /// Station holding an operation.
    pub fn station_of(&self, operation_id: &str) -> Option<&Station> {
        self.stations
            .iter()
            .find(|s| s.operation_ids.iter().any(|id| id == operation_id))
    }
}

/// Takt time: available minutes per unit demanded.
///
/// # Errors
/// [`ShiftError::InvalidWorkload`] if `demand` is zero or `available_minutes`
/// is not a positive finite number.
pub fn takt_minutes(available_minutes: f64, demand: u32) -> Result<f64> {
    if demand == 0 {
        return Err(ShiftError::invalid_workload("demand must be positive"));
    }
    if !(available_minutes.is_finite() && available_minutes > 0.0) {
        return Err(ShiftError::invalid_workload(format!(
            "available minutes must be positive, got {available_minutes}"
        )));
    }
    Ok(available_minutes / f64::from(demand))
}

/// Auto-balances operations across a fixed number of operators.
#[derive(Debug, Clone)]
pub struct LineBalancer {
    operator_count: usize,
}

impl LineBalancer {
    /// Creates a balancer for a line of `operator_count` operators.
    pub fn new(operator_count: usize) -> Self {
        Self { operator_count }
    }

    /// Operators on the line.
    pub fn operator_count(&self) -> usize {
        self.operator_count
    }

    /// Operators needed so no station exceeds `takt` minutes, assuming
    /// perfect balance: `ceil(total / takt)`.
    pub fn theoretical_operators(operations: &[Operation], takt: f64) -> Result<usize> {
        validate_operations(operations)?;
        if !(takt.is_finite() && takt > 0.0) {
            return Err(ShiftError::invalid_workload(format!(
                "takt must be positive, got {takt}"
            )));
        }
        let total: f64 = operations.iter().map(|o| o.standard_minutes).sum();
        // absorb float noise so an exact fit does not round up
        Ok((total / takt - 1e-9).ceil() as usize)
    }

    /// Distributes operations over the operators.
    ///
    /// # Errors
    /// [`ShiftError::InvalidWorkload`] if there are no operators, no
    /// operations, or an operation's time is not a positive finite number.
    pub fn balance(&self, operations: &[Operation]) -> Result<LineBalance> {
        if self.operator_count == 0 {
            return Err(ShiftError::invalid_workload("line has no operators"));
        }
        validate_operations(operations)?;

        let mut stations: Vec<Station> = (0..self.operator_count)
            .map(|operator| Station {
                operator,
                operation_ids: Vec::new(),
                load_minutes: 0.0,
            })
            .collect();

        let mut order: Vec<usize> = (0..operations.len()).collect();
        order.sort_by(|&a, &b| {
            operations[b]
                .standard_minutes
                .total_cmp(&operations[a].standard_minutes)
                .then(a.cmp(&b))
        });

        for idx in order {
            let op = &operations[idx];
            let mut target = 0;
            for (i, station) in stations.iter().enumerate().skip(1) {
                if station.load_minutes < stations[target].load_minutes {
                    target = i;
                }
            }
            stations[target].operation_ids.push(op.id.clone());
            stations[target].load_minutes += op.standard_minutes;
        }

        let balance = LineBalance {
            total_minutes: operations.iter().map(|o| o.standard_minutes).sum(),
            stations,
        };
        tracing::debug!(
            operators = self.operator_count,
            operations = operations.len(),
            bottleneck = balance.bottleneck_minutes(),
            efficiency = balance.line_efficiency(),
            "balanced line"
        );
        Ok(balance)
    }
}

fn validate_operations(operations: &[Operation]) -> Result<()> {
    if operations.is_empty() {
        return Err(ShiftError::invalid_workload("no operations to balance"));
    }
    if let Some(bad) = operations
        .iter()
        .find(|o| !(o.standard_minutes.is_finite() && o.standard_minutes > 0.0))
    {
        return Err(ShiftError::invalid_workload(format!(
            "operation '{}' has non-positive standard time {}",
            bad.id, bad.standard_minutes
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt_ops() -> Vec<Operation> {
        vec![
            Operation::new("OP1", 1.2).with_name("Collar attach"),
            Operation::new("OP2", 0.8).with_name("Cuff attach"),
            Operation::new("OP3", 0.6).with_name("Side seam"),
            Operation::new("OP4", 0.5).with_name("Hem"),
            Operation::new("OP5", 0.5).with_name("Button"),
            Operation::new("OP6", 0.4).with_name("Label"),
        ]
    }

    #[test]
    fn test_lpt_assignment() {
        let balance = LineBalancer::new(2).balance(&shirt_ops()).unwrap();
        // OP1→0 (1.2), OP2→1 (0.8), OP3→1 (1.4), OP4→0 (1.7), OP5→1 (1.9), OP6→0 (2.1)
        assert_eq!(balance.stations[0].operation_ids, vec!["OP1", "OP4", "OP6"]);
        assert_eq!(balance.stations[1].operation_ids, vec!["OP2", "OP3", "OP5"]);
        assert!((balance.bottleneck_minutes() - 2.1).abs() < 1e-9);
        assert!((balance.total_minutes - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_and_output() {
        let balance = LineBalancer::new(2).balance(&shirt_ops()).unwrap();
        // 4.0 / (2 × 2.1)
        assert!((balance.line_efficiency() - 4.0 / 4.2).abs() < 1e-9);
        assert!((balance.balance_loss() - 0.2 / 4.2).abs() < 1e-9);
        assert!((balance.hourly_output() - 60.0 / 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_more_operators_than_operations() {
        let ops = vec![Operation::new("A", 1.0), Operation::new("B", 2.0)];
        let balance = LineBalancer::new(4).balance(&ops).unwrap();
        assert_eq!(balance.stations.len(), 4);
        assert!(balance.stations[2].operation_ids.is_empty());
        assert!((balance.line_efficiency() - 3.0 / 8.0).abs() < 1e-9);
        assert_eq!(balance.station_of("B").unwrap().operator, 0);
        assert_eq!(balance.station_of("A").unwrap().operator, 1);
        assert!(balance.station_of("Z").is_none());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ops = vec![Operation::new("X", 1.0), Operation::new("Y", 1.0)];
        let balance = LineBalancer::new(2).balance(&ops).unwrap();
        assert_eq!(balance.stations[0].operation_ids, vec!["X"]);
        assert_eq!(balance.stations[1].operation_ids, vec!["Y"]);
        assert!((balance.line_efficiency() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_balance_inputs() {
        assert!(LineBalancer::new(0).balance(&shirt_ops()).is_err());
        assert!(LineBalancer::new(3).balance(&[]).is_err());
        let err = LineBalancer::new(3)
            .balance(&[Operation::new("BAD", 0.0)])
            .unwrap_err();
        assert!(matches!(err, ShiftError::InvalidWorkload(ref m) if m.contains("BAD")));
    }

    #[test]
    fn test_takt_and_theoretical_operators() {
        // 480 min for 240 shirts → 2.0 min takt
        let takt = takt_minutes(480.0, 240).unwrap();
        assert!((takt - 2.0).abs() < 1e-10);
        assert_eq!(LineBalancer::theoretical_operators(&shirt_ops(), takt).unwrap(), 2);
        assert_eq!(LineBalancer::theoretical_operators(&shirt_ops(), 1.0).unwrap(), 4);

        assert!(takt_minutes(480.0, 0).is_err());
        assert!(takt_minutes(0.0, 10).is_err());
    }
}
