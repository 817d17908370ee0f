//! Burn rate attribution.
//!
//! Breaks total monthly burn into payroll plus arbitrary expense lines,
//! classifies each line's trend against the prior period and proposes savings
//! opportunities.

use rustc_hash::FxHashSet;

use crate::format::{round_money, round_tenths};
use crate::model::{
    BurnBreakdown, BurnCategory, ExpenseLine, OptimisationOpportunity, PayrollInput, Trend,
};

pub const PAYROLL_LABEL: &str = "Payroll & Benefits";
pub const OTHER_LABEL: &str = "Other";

/// Absolute discrepancy tolerated before an "Other" bucket is added
pub const RECONCILIATION_THRESHOLD: f64 = 100.0;
/// Relative change inside which a trend is flat (exclusive boundary)
pub const TREND_DEAD_ZONE: f64 = 0.02;

const GENERIC_REDUCIBLE: f64 = 0.15;
const SAAS_REDUCIBLE: f64 = 0.20;
const REVIEW_THRESHOLD_PCT: f64 = 5.0;

/// Break `total_burn` into categories that always reconcile to it.
///
/// Payroll comes first, then each expense line. When the categorised amounts
/// miss the total by more than [`RECONCILIATION_THRESHOLD`], an "Other"
/// category absorbs the remainder (negative if lines overshoot). Categories
/// are returned sorted by amount, largest first.
pub fn build_burn_breakdown(
    total_burn: f64,
    payroll: &PayrollInput,
    other_expenses: &[ExpenseLine],
) -> BurnBreakdown {
    let payroll_monthly = payroll.monthly_total();
    let payroll_pct = share_of(payroll_monthly, total_burn);

    let mut categories = Vec::with_capacity(other_expenses.len() + 2);
    categories.push(build_category(
        PAYROLL_LABEL,
        payroll_monthly,
        total_burn,
        None,
        Some("Fully-loaded at 1.25× base salary"),
    ));
    categories.extend(other_expenses.iter().map(|e| {
        build_category(
            &e.label,
            e.monthly_amount,
            total_burn,
            e.previous_month_amount,
            None,
        )
    }));

    let categorised_total: f64 = categories.iter().map(|c| c.monthly_amount).sum();
    let remainder = total_burn - categorised_total;
    if remainder.abs() > RECONCILIATION_THRESHOLD {
        tracing::trace!(remainder, "adding reconciliation bucket");
        categories.push(build_category(
            OTHER_LABEL,
            remainder,
            total_burn,
            None,
            Some("Uncategorised spend"),
        ));
    }

    categories.sort_by(|a, b| b.monthly_amount.total_cmp(&a.monthly_amount));

    let top_driver = categories
        .first()
        .map_or_else(|| "Unknown".to_string(), |c| c.label.clone());

    BurnBreakdown {
        total_burn: round_money(total_burn),
        categories,
        payroll_ratio: payroll_pct.round(),
        top_driver,
    }
}

/// Trend of `current` versus `previous` with a ±2 % dead zone relative to current.
pub fn classify_trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous else {
        return Trend::Flat;
    };
    let delta = current - previous;
    let band = current * TREND_DEAD_ZONE;
    if delta > band {
        Trend::Up
    } else if delta < -band {
        Trend::Down
    } else {
        Trend::Flat
    }
}

fn build_category(
    label: &str,
    monthly: f64,
    total_burn: f64,
    previous: Option<f64>,
    driver_note: Option<&str>,
) -> BurnCategory {
    let pct = share_of(monthly, total_burn);
    let trend = classify_trend(monthly, previous);

    BurnCategory {
        label: label.to_string(),
        monthly_amount: round_money(monthly),
        pct_of_burn: round_tenths(pct),
        trend,
        driver_note: driver_note.map_or_else(|| infer_driver_note(trend, pct), str::to_string),
    }
}

fn infer_driver_note(trend: Trend, pct: f64) -> String {
    let trend_word = trend.arrow_label();
    if pct > 50.0 {
        format!("{trend_word} · Largest burn driver")
    } else if pct > 20.0 {
        format!("{trend_word} · Significant cost centre")
    } else {
        trend_word.to_string()
    }
}

/// Percentage of total burn; 0 when there is no burn to divide by
fn share_of(amount: f64, total_burn: f64) -> f64 {
    if total_burn > 0.0 {
        amount / total_burn * 100.0
    } else {
        0.0
    }
}

/// Scan a breakdown for savings opportunities.
///
/// Payroll is skipped (headcount planning owns it). A non-payroll category
/// trending up and above 5 % of burn is flagged as 15 % reducible; a category
/// whose label mentions SaaS or software as 20 % reducible. Only the first
/// opportunity per category is kept.
pub fn identify_optimisations(
    breakdown: &BurnBreakdown,
    cash_balance: f64,
) -> Vec<OptimisationOpportunity> {
    let mut opportunities = Vec::new();

    for category in &breakdown.categories {
        if category.label == PAYROLL_LABEL {
            continue;
        }

        if category.trend == Trend::Up && category.pct_of_burn > REVIEW_THRESHOLD_PCT {
            let saving = category.monthly_amount * GENERIC_REDUCIBLE;
            let impact = if cash_balance > 0.0 {
                runway_impact_days(saving, breakdown.total_burn)
            } else {
                0.0
            };
            opportunities.push(OptimisationOpportunity {
                category: category.label.clone(),
                current_spend: category.monthly_amount,
                potential_saving: round_money(saving),
                action: format!(
                    "Audit {} vendors: potential contract renegotiation",
                    category.label.to_lowercase()
                ),
                runway_impact_days: impact,
            });
        }

        if is_software_spend(&category.label) {
            let saving = category.monthly_amount * SAAS_REDUCIBLE;
            opportunities.push(OptimisationOpportunity {
                category: category.label.clone(),
                current_spend: category.monthly_amount,
                potential_saving: round_money(saving),
                action: "Run a SaaS audit: cancel unused seats and consolidate overlapping tools"
                    .to_string(),
                runway_impact_days: runway_impact_days(saving, breakdown.total_burn),
            });
        }
    }

    let mut seen = FxHashSet::default();
    opportunities.retain(|o| seen.insert(o.category.clone()));
    opportunities
}

fn is_software_spend(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("saas") || lower.contains("software")
}

/// Approximate days of runway a monthly saving buys
fn runway_impact_days(monthly_saving: f64, total_burn: f64) -> f64 {
    if total_burn > 0.0 {
        (monthly_saving / total_burn * 30.0).round()
    } else {
        0.0
    }
}
