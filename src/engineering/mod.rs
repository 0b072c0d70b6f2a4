//! Industrial engineering calculations.
//!
//! Time studies turn stopwatch observations into standard times; line
//! balancing spreads a garment's operations across the operators of a
//! sewing line. The standard minutes produced here feed
//! [`Workload`](crate::models::Workload) for schedule projection.

mod line_balance;
mod time_study;

pub use line_balance::{takt_minutes, LineBalance, LineBalancer, Operation, Station};
pub use time_study::TimeStudy;
