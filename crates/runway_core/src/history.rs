//! Trailing metrics derived from past monthly cash flows
//!
//! These help a calling layer turn transaction history into the burn and
//! revenue figures of a [`FinancialPosition`].

use crate::model::{FinancialPosition, MonthlyFlows};

/// Default number of trailing months averaged into burn and revenue
pub const DEFAULT_LOOKBACK_MONTHS: usize = 6;

/// Average monthly inflow and outflow over the most recent `lookback` months.
///
/// Returns `(avg_inflow, avg_outflow)`; `(0.0, 0.0)` for an empty history or a
/// zero lookback.
pub fn trailing_averages(history: &[MonthlyFlows], lookback: usize) -> (f64, f64) {
    if history.is_empty() || lookback == 0 {
        return (0.0, 0.0);
    }

    let mut sorted: Vec<&MonthlyFlows> = history.iter().collect();
    sorted.sort_by_key(|m| (m.period.year(), m.period.month()));

    let recent = &sorted[sorted.len().saturating_sub(lookback)..];
    let count = recent.len() as f64;
    let inflow: f64 = recent.iter().map(|m| m.inflow).sum();
    let outflow: f64 = recent.iter().map(|m| m.outflow).sum();

    (inflow / count, outflow / count)
}

/// Days sales outstanding: average days to collect payment.
///
/// `revenue` is the total billed over `period_days`. Returns 0 when there is no
/// revenue to measure against.
pub fn days_sales_outstanding(receivables: f64, revenue: f64, period_days: u32) -> u32 {
    if revenue <= 0.0 || period_days == 0 {
        return 0;
    }
    let daily_revenue = revenue / f64::from(period_days);
    if daily_revenue < 1.0 {
        return 0;
    }
    (receivables / daily_revenue).floor().max(0.0) as u32
}

impl FinancialPosition {
    /// Build a position whose burn and revenue are trailing averages of `history`.
    pub fn from_history(
        cash_balance: f64,
        history: &[MonthlyFlows],
        lookback: usize,
        headcount: u32,
        avg_annual_salary: f64,
        overdue_ar: f64,
    ) -> Self {
        let (monthly_revenue, monthly_burn) = trailing_averages(history, lookback);
        Self {
            cash_balance,
            monthly_burn,
            monthly_revenue,
            headcount,
            avg_annual_salary,
            overdue_ar,
        }
    }
}
