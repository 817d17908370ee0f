use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Aggregated cash movement for one past calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlows {
    /// Any date inside the month; only year and month are significant
    pub period: Date,
    pub inflow: f64,
    pub outflow: f64,
}
