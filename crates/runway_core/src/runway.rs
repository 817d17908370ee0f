//! Runway analysis & sensitivity.
//!
//! Answers "how many more months do I get from each lever?" by recomputing the
//! instantaneous runway with one lever applied, independent of the
//! month-by-month projector.

use jiff::civil::Date;

use crate::date_math::add_months;
use crate::format::{round_money, round_tenths};
use crate::model::{
    FinancialPosition, Lever, OptimisationOpportunity, RunoutDate, RunwayAnalysis,
    RunwaySensitivity, RunwayZone,
};

/// Runway reported when burn is zero or negative ("effectively infinite")
pub const INFINITE_RUNWAY_MONTHS: f64 = 999.0;
/// Runway beyond which no runout date is reported
pub const FORESEEABLE_RUNWAY_MONTHS: f64 = 120.0;

/// Assumed share of burn going to SaaS vendors
const SAAS_SHARE_OF_BURN: f64 = 0.08;
const SAAS_REDUCTION: f64 = 0.10;
/// Planned hires per month that a hiring freeze avoids
const PLANNED_HIRES: f64 = 2.0;
const REVENUE_ACCELERATION: f64 = 0.05;

/// Months of runway at the current cash and burn.
///
/// Never negative and never divides by zero: a burn of zero or less returns
/// [`INFINITE_RUNWAY_MONTHS`].
#[inline]
pub fn calculate_runway(cash_balance: f64, monthly_burn: f64) -> f64 {
    if monthly_burn <= 0.0 {
        return INFINITE_RUNWAY_MONTHS;
    }
    (cash_balance / monthly_burn).max(0.0)
}

/// Calendar month in which cash runs out at the current burn.
///
/// A runout past the end of the supported calendar is reported as not
/// foreseeable.
pub fn runway_to_date(cash_balance: f64, monthly_burn: f64, as_of: Date) -> RunoutDate {
    let months = calculate_runway(cash_balance, monthly_burn);
    if months >= FORESEEABLE_RUNWAY_MONTHS {
        return RunoutDate::NotForeseeable;
    }
    add_months(as_of, months.ceil() as i32).map_or(RunoutDate::NotForeseeable, RunoutDate::On)
}

pub fn classify_runway_zone(runway_months: f64) -> RunwayZone {
    if runway_months < 3.0 {
        RunwayZone::Critical
    } else if runway_months < 6.0 {
        RunwayZone::Warning
    } else if runway_months < 12.0 {
        RunwayZone::Comfortable
    } else {
        RunwayZone::Healthy
    }
}

/// Effect of one lever on (cash, burn), holding everything else constant
struct LeverEffect {
    current_value: f64,
    new_cash: f64,
    new_burn: f64,
}

impl Lever {
    fn apply(&self, position: &FinancialPosition) -> LeverEffect {
        let cash = position.cash_balance;
        let burn = position.monthly_burn;
        let hire = position.fully_loaded_monthly_salary();

        let (current_value, new_cash, new_burn) = match self {
            Lever::CollectOverdueAr => (position.overdue_ar, cash + position.overdue_ar, burn),
            Lever::DeferOneHire => (hire, cash, burn - hire),
            Lever::SaasCostReduction => {
                let saas_spend = burn * SAAS_SHARE_OF_BURN;
                (saas_spend, cash, burn - saas_spend * SAAS_REDUCTION)
            }
            Lever::Bridge500k => (500_000.0, cash + 500_000.0, burn),
            Lever::Bridge2m => (2_000_000.0, cash + 2_000_000.0, burn),
            Lever::HiringFreeze => {
                let avoided = PLANNED_HIRES * hire;
                (avoided, cash, burn - avoided)
            }
            // Modelled as a burn offset rather than compounding growth
            Lever::RevenueAcceleration => {
                let extra = position.monthly_revenue * REVENUE_ACCELERATION;
                (extra, cash, burn - extra)
            }
        };

        LeverEffect {
            current_value,
            new_cash,
            new_burn: new_burn.max(0.0),
        }
    }
}

/// Baseline runway plus the runway delta of every lever, highest impact first.
///
/// The sort is stable, so levers with equal deltas keep their menu order.
pub fn build_runway_analysis(position: &FinancialPosition, as_of: Date) -> RunwayAnalysis {
    let base_runway = calculate_runway(position.cash_balance, position.monthly_burn);

    let mut sensitivity_table: Vec<RunwaySensitivity> = Lever::ALL
        .iter()
        .map(|lever| {
            let effect = lever.apply(position);
            let new_runway = calculate_runway(effect.new_cash, effect.new_burn);
            let delta = new_runway - base_runway;
            let delta_pct = if base_runway > 0.0 {
                delta / base_runway * 100.0
            } else {
                0.0
            };
            RunwaySensitivity {
                lever: *lever,
                label: lever.label().to_string(),
                current_value: round_money(effect.current_value),
                unit: lever.unit().to_string(),
                delta_runway_months: round_tenths(delta),
                delta_runway_pct: delta_pct.round(),
            }
        })
        .collect();

    sensitivity_table.sort_by(|a, b| b.delta_runway_months.total_cmp(&a.delta_runway_months));

    if let Some(top) = sensitivity_table.first() {
        tracing::debug!(
            lever = top.label.as_str(),
            delta_months = top.delta_runway_months,
            "highest-impact runway lever"
        );
    }

    RunwayAnalysis {
        base_runway_months: round_tenths(base_runway),
        base_runout_date: runway_to_date(position.cash_balance, position.monthly_burn, as_of),
        cash_balance: round_money(position.cash_balance),
        monthly_burn: round_money(position.monthly_burn),
        zone: classify_runway_zone(base_runway),
        sensitivity_table,
    }
}

/// Runway after applying every proposed monthly saving at once.
pub fn runway_with_savings(
    position: &FinancialPosition,
    opportunities: &[OptimisationOpportunity],
) -> f64 {
    let savings: f64 = opportunities.iter().map(|o| o.potential_saving).sum();
    let burn = (position.monthly_burn - savings).max(0.0);
    round_tenths(calculate_runway(position.cash_balance, burn))
}
