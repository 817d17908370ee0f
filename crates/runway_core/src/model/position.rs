//! Current-state financial snapshot and raw expense inputs

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite};

/// Benefits and payroll-tax overhead applied on top of base salary.
pub const FULLY_LOADED_FACTOR: f64 = 1.25;

/// Monthly fully-loaded cost of one head at the given base annual salary.
#[inline]
pub fn fully_loaded_monthly(annual_salary: f64) -> f64 {
    annual_salary * FULLY_LOADED_FACTOR / 12.0
}

/// The financial position every calculation starts from.
///
/// Produced by upstream collaborators (bank, billing, accounting and payroll
/// aggregation) and consumed once per engine run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialPosition {
    /// Cash on hand
    pub cash_balance: f64,
    /// Gross monthly cash outflow
    pub monthly_burn: f64,
    /// Gross monthly inflow (MRR equivalent)
    pub monthly_revenue: f64,
    pub headcount: u32,
    /// Average base annual salary per head; the engine applies [`FULLY_LOADED_FACTOR`]
    pub avg_annual_salary: f64,
    /// Receivables past due that could be collected
    pub overdue_ar: f64,
}

impl FinancialPosition {
    /// Reject non-finite fields. Negative values pass through untouched.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("cash_balance", self.cash_balance)?;
        ensure_finite("monthly_burn", self.monthly_burn)?;
        ensure_finite("monthly_revenue", self.monthly_revenue)?;
        ensure_finite("avg_annual_salary", self.avg_annual_salary)?;
        ensure_finite("overdue_ar", self.overdue_ar)?;
        Ok(())
    }

    /// Fully-loaded monthly cost of one average head
    #[must_use]
    pub fn fully_loaded_monthly_salary(&self) -> f64 {
        fully_loaded_monthly(self.avg_annual_salary)
    }

    /// Payroll line used by burn attribution
    #[must_use]
    pub fn payroll_input(&self) -> PayrollInput {
        PayrollInput {
            headcount: self.headcount,
            avg_fully_loaded_monthly: self.fully_loaded_monthly_salary(),
        }
    }
}

/// Payroll modelled as headcount times an average fully-loaded monthly cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    pub headcount: u32,
    /// Per person, per month
    pub avg_fully_loaded_monthly: f64,
}

impl PayrollInput {
    #[must_use]
    pub fn monthly_total(&self) -> f64 {
        f64::from(self.headcount) * self.avg_fully_loaded_monthly
    }
}

/// A raw non-payroll expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub label: String,
    pub monthly_amount: f64,
    /// Trend is treated as flat when absent
    #[serde(default)]
    pub previous_month_amount: Option<f64>,
}

impl ExpenseLine {
    pub fn new(label: impl Into<String>, monthly_amount: f64) -> Self {
        Self {
            label: label.into(),
            monthly_amount,
            previous_month_amount: None,
        }
    }

    #[must_use]
    pub fn with_previous(mut self, previous_month_amount: f64) -> Self {
        self.previous_month_amount = Some(previous_month_amount);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> FinancialPosition {
        FinancialPosition {
            cash_balance: 574_000.0,
            monthly_burn: 287_000.0,
            monthly_revenue: 271_000.0,
            headcount: 34,
            avg_annual_salary: 160_000.0,
            overdue_ar: 94_000.0,
        }
    }

    #[test]
    fn test_fully_loaded_monthly() {
        let monthly = fully_loaded_monthly(120_000.0);
        assert!((monthly - 12_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_payroll_input() {
        let payroll = position().payroll_input();
        assert_eq!(payroll.headcount, 34);
        let expected = 34.0 * 160_000.0 * 1.25 / 12.0;
        assert!((payroll.monthly_total() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_nan_only() {
        let mut p = position();
        p.cash_balance = -10_000.0;
        assert!(p.validate().is_ok(), "negative cash is the caller's concern");

        p.monthly_burn = f64::NAN;
        assert!(p.validate().is_err());
    }
}
