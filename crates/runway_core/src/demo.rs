//! Bundled demo data used when a caller has no connected integrations.

use crate::burn::build_burn_breakdown;
use crate::model::{
    BurnBreakdown, ExpenseLine, FinancialPosition, PayrollInput, fully_loaded_monthly,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleStatus {
    Active,
    Onboarding,
    Open,
}

/// One seat on the demo roster
#[derive(Debug, Clone, Copy)]
pub struct DemoRole {
    pub role: &'static str,
    pub dept: &'static str,
    /// Base annual salary
    pub salary: f64,
    pub status: RoleStatus,
}

const fn role(role: &'static str, dept: &'static str, salary: f64, status: RoleStatus) -> DemoRole {
    DemoRole {
        role,
        dept,
        salary,
        status,
    }
}

pub const DEMO_ROSTER: [DemoRole; 14] = [
    role("CEO", "Executive", 180_000.0, RoleStatus::Active),
    role("CTO", "Engineering", 200_000.0, RoleStatus::Active),
    role("Head of AI", "Engineering", 195_000.0, RoleStatus::Active),
    role("Sr. Full-Stack Eng", "Engineering", 165_000.0, RoleStatus::Active),
    role("Sr. Full-Stack Eng", "Engineering", 162_000.0, RoleStatus::Active),
    role("ML Engineer", "Engineering", 175_000.0, RoleStatus::Active),
    role("Head of Growth", "GTM", 150_000.0, RoleStatus::Active),
    role("Account Executive", "GTM", 90_000.0, RoleStatus::Active),
    role("DevOps Engineer", "Engineering", 145_000.0, RoleStatus::Active),
    role("Product Designer", "Product", 140_000.0, RoleStatus::Active),
    role("Sr. Backend Eng", "Engineering", 168_000.0, RoleStatus::Active),
    role("Customer Success", "GTM", 85_000.0, RoleStatus::Active),
    role("Sr. Data Eng", "Engineering", 170_000.0, RoleStatus::Open),
    role("Account Executive", "GTM", 95_000.0, RoleStatus::Open),
];

/// Demo expense lines: (label, monthly amount, month-over-month change in %)
///
/// Payroll is not listed; it is modelled from the roster.
pub const DEMO_EXPENSES: [(&str, f64, f64); 5] = [
    ("Marketing", 24_000.0, 12.0),
    ("Professional services", 28_800.0, 0.4),
    ("SaaS tools", 12_400.0, -5.6),
    ("Cloud infra", 9_800.0, 8.2),
    ("Office & G&A", 25_000.0, -0.5),
];

/// The default position substituted when no data is connected
pub fn demo_position() -> FinancialPosition {
    FinancialPosition {
        cash_balance: 574_000.0,
        monthly_burn: 287_000.0,
        monthly_revenue: 271_000.0,
        headcount: 34,
        avg_annual_salary: 160_000.0,
        overdue_ar: 94_000.0,
    }
}

/// Payroll derived from the active members of the demo roster
pub fn demo_payroll() -> PayrollInput {
    let active: Vec<&DemoRole> = DEMO_ROSTER
        .iter()
        .filter(|r| r.status == RoleStatus::Active)
        .collect();
    let avg_salary = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|r| r.salary).sum::<f64>() / active.len() as f64
    };
    PayrollInput {
        headcount: active.len() as u32,
        avg_fully_loaded_monthly: fully_loaded_monthly(avg_salary),
    }
}

/// Demo expense lines with previous-month amounts reconstructed from the change
pub fn demo_expenses() -> Vec<ExpenseLine> {
    DEMO_EXPENSES
        .iter()
        .map(|&(label, value, delta_pct)| {
            ExpenseLine::new(label, value).with_previous(value * (1.0 - delta_pct / 100.0))
        })
        .collect()
}

/// Burn breakdown built from demo payroll and expenses against `total_burn`
pub fn burn_breakdown_from_demo(total_burn: f64) -> BurnBreakdown {
    build_burn_breakdown(total_burn, &demo_payroll(), &demo_expenses())
}
