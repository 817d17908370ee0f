//! Deterministic month-by-month cash-flow projection.
//!
//! Arithmetic is carried unrounded through the loop; values are rounded only
//! when a [`ProjectedMonth`] is emitted so rounding error never compounds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ForecastConfig, HireRounding};
use crate::date_math::month_label;
use crate::error::{EngineError, Result};
use crate::format::{compact_currency, round_money, round_tenths};
use crate::model::{FinancialPosition, ProjectedMonth, ScenarioAssumptions, fully_loaded_monthly};
use crate::runway::calculate_runway;

/// Projected months plus where (if anywhere) cash ran out.
#[derive(Debug, Clone)]
pub(crate) struct Trajectory {
    pub months: Vec<ProjectedMonth>,
    /// Month index whose emitted closing cash was <= 0; always the last month
    pub runout_month: Option<u32>,
}

/// Projects cash month-by-month over `config.horizon_months` periods.
///
/// The returned list is shorter than the horizon when cash reaches zero: the
/// month in which closing cash first drops to or below zero is the final
/// element.
pub fn project(
    position: &FinancialPosition,
    assumptions: &ScenarioAssumptions,
    config: &ForecastConfig,
) -> Result<Vec<ProjectedMonth>> {
    Ok(simulate(position, assumptions, config)?.months)
}

pub(crate) fn simulate(
    position: &FinancialPosition,
    assumptions: &ScenarioAssumptions,
    config: &ForecastConfig,
) -> Result<Trajectory> {
    config.validate()?;
    position.validate()?;
    assumptions.validate()?;

    let horizon = config.horizon_months;
    let hire_cost = fully_loaded_monthly(assumptions.avg_hire_salary);
    let mut hires = HireSchedule::new(assumptions.hires_per_month, config.hire_rounding);

    let mut cash = position.cash_balance;
    let mut revenue = position.monthly_revenue;
    let mut headcount = position.headcount;
    // Cost optimisation is a persistent baseline shift, applied once up front
    let mut burn = (position.monthly_burn + assumptions.saas_optimisation).max(0.0);

    let mut months = Vec::with_capacity(horizon as usize);
    let mut runout_month = None;

    for i in 0..horizon {
        let opening_cash = cash;
        let mut event_labels = Vec::new();

        revenue *= 1.0 + assumptions.revenue_growth_mom;

        // Creep applies to the pre-hire burn
        let new_hires = hires.next_month();
        headcount = headcount.saturating_add(new_hires);
        burn = burn + f64::from(new_hires) * hire_cost + burn * assumptions.burn_growth_mom;

        let mut event_cash = 0.0;
        for event in &assumptions.events {
            if event.fires_in(i) {
                event_cash += event.amount;
                if event.announced_in(i) {
                    event_labels.push(event.label.clone());
                }
            }
        }

        if assumptions.ar_collection_month == Some(i) && position.overdue_ar > 0.0 {
            event_cash += position.overdue_ar;
            event_labels.push(format!(
                "AR collected +{}",
                compact_currency(position.overdue_ar)
            ));
        }

        let net_cash_flow = revenue - burn + event_cash;
        cash = opening_cash + net_cash_flow;
        let closing_cash = round_money(cash);

        months.push(ProjectedMonth {
            month: i,
            // Month 0 is next calendar month
            label: month_label(config.as_of, i as i32 + 1).ok_or(
                EngineError::DateOutOfRange {
                    as_of: config.as_of,
                    months: i + 1,
                },
            )?,
            opening_cash: round_money(opening_cash),
            revenue: round_money(revenue),
            burn: round_money(burn),
            net_cash_flow: round_money(net_cash_flow),
            closing_cash,
            headcount,
            events: event_labels,
            runway: round_tenths(calculate_runway(cash, burn)),
        });

        // Judged on the emitted value so a month shown at $0 is always the last
        if closing_cash <= 0.0 {
            tracing::debug!(month = i, closing_cash = cash, "cash exhausted, stopping projection");
            runout_month = Some(i);
            break;
        }
    }

    Ok(Trajectory {
        months,
        runout_month,
    })
}

/// Resolves `hires_per_month` into a whole number of hires for each month.
struct HireSchedule {
    whole: u32,
    fraction: f64,
    state: RoundingState,
}

enum RoundingState {
    Accumulate { carry: f64 },
    Stochastic(SmallRng),
}

impl HireSchedule {
    /// Tolerance so that e.g. ten months of 0.1 still yield one hire
    const EPSILON: f64 = 1e-9;

    fn new(hires_per_month: f64, rounding: HireRounding) -> Self {
        let hires = hires_per_month.max(0.0);
        let whole = hires.floor();
        let state = match rounding {
            HireRounding::Accumulate => RoundingState::Accumulate { carry: 0.0 },
            HireRounding::Stochastic { seed } => {
                RoundingState::Stochastic(SmallRng::seed_from_u64(seed))
            }
        };
        Self {
            whole: whole as u32,
            fraction: hires - whole,
            state,
        }
    }

    fn next_month(&mut self) -> u32 {
        if self.fraction <= 0.0 {
            return self.whole;
        }
        let extra = match &mut self.state {
            RoundingState::Accumulate { carry } => {
                *carry += self.fraction;
                if *carry >= 1.0 - Self::EPSILON {
                    *carry -= 1.0;
                    1
                } else {
                    0
                }
            }
            RoundingState::Stochastic(rng) => u32::from(rng.random::<f64>() < self.fraction),
        };
        self.whole + extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CashEvent, EventCategory};

    fn config() -> ForecastConfig {
        ForecastConfig::new(jiff::civil::date(2026, 2, 10))
    }

    fn position() -> FinancialPosition {
        FinancialPosition {
            cash_balance: 1_000_000.0,
            monthly_burn: 100_000.0,
            monthly_revenue: 50_000.0,
            headcount: 10,
            avg_annual_salary: 120_000.0,
            overdue_ar: 0.0,
        }
    }

    fn flat() -> ScenarioAssumptions {
        ScenarioAssumptions {
            revenue_growth_mom: 0.0,
            burn_growth_mom: 0.0,
            hires_per_month: 0.0,
            avg_hire_salary: 0.0,
            saas_optimisation: 0.0,
            ar_collection_month: None,
            events: vec![],
        }
    }

    #[test]
    fn test_flat_projection() {
        let months = project(&position(), &flat(), &config()).unwrap();
        assert_eq!(months.len(), 12);

        let first = &months[0];
        assert_eq!(first.label, "Mar '26");
        assert_eq!(first.opening_cash, 1_000_000.0);
        assert_eq!(first.net_cash_flow, -50_000.0);
        assert_eq!(first.closing_cash, 950_000.0);
        assert_eq!(first.runway, 9.5);

        let last = months.last().unwrap();
        assert_eq!(last.closing_cash, 400_000.0);
        assert_eq!(last.label, "Feb '27");
    }

    #[test]
    fn test_opening_cash_chains_from_previous_close() {
        let mut assumptions = flat();
        assumptions.revenue_growth_mom = 0.07;
        assumptions.burn_growth_mom = 0.02;
        let months = project(&position(), &assumptions, &config()).unwrap();
        for pair in months.windows(2) {
            assert!((pair[1].opening_cash - pair[0].closing_cash).abs() <= 1.0);
        }
    }

    #[test]
    fn test_cost_optimisation_applied_before_loop() {
        let mut assumptions = flat();
        assumptions.saas_optimisation = -10_000.0;
        let months = project(&position(), &assumptions, &config()).unwrap();
        assert!(months.iter().all(|m| m.burn == 90_000.0));
    }

    #[test]
    fn test_cost_optimisation_floors_burn_at_zero() {
        let mut assumptions = flat();
        assumptions.saas_optimisation = -500_000.0;
        let months = project(&position(), &assumptions, &config()).unwrap();
        assert_eq!(months[0].burn, 0.0);
        assert_eq!(months[0].runway, 999.0);
    }

    #[test]
    fn test_whole_hires_add_fully_loaded_cost() {
        let mut assumptions = flat();
        assumptions.hires_per_month = 2.0;
        assumptions.avg_hire_salary = 120_000.0;
        let months = project(&position(), &assumptions, &config()).unwrap();
        // Two hires at 12,500/month fully loaded each
        assert_eq!(months[0].burn, 125_000.0);
        assert_eq!(months[1].burn, 150_000.0);
        assert_eq!(months[0].headcount, 12);
        assert_eq!(months[1].headcount, 14);
    }

    #[test]
    fn test_burn_creep_applies_to_pre_hire_burn() {
        let mut assumptions = flat();
        assumptions.hires_per_month = 1.0;
        assumptions.avg_hire_salary = 120_000.0;
        assumptions.burn_growth_mom = 0.10;
        let months = project(&position(), &assumptions, &config()).unwrap();
        // 100,000 + 12,500 hire + 10,000 creep
        assert_eq!(months[0].burn, 122_500.0);
    }

    #[test]
    fn test_fractional_hires_accumulate() {
        let mut assumptions = flat();
        assumptions.hires_per_month = 1.5;
        assumptions.avg_hire_salary = 120_000.0;
        let months = project(&position(), &assumptions, &config()).unwrap();
        let heads: Vec<u32> = months.iter().take(4).map(|m| m.headcount).collect();
        assert_eq!(heads, vec![11, 13, 14, 16]);
    }

    #[test]
    fn test_small_fraction_accumulates_to_one_hire() {
        let mut schedule = HireSchedule::new(0.1, HireRounding::Accumulate);
        let total: u32 = (0..10).map(|_| schedule.next_month()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_stochastic_hires_reproducible_with_seed() {
        let mut assumptions = flat();
        assumptions.hires_per_month = 1.5;
        assumptions.avg_hire_salary = 120_000.0;
        let config = config().with_hire_rounding(HireRounding::Stochastic { seed: 7 });

        let a = project(&position(), &assumptions, &config).unwrap();
        let b = project(&position(), &assumptions, &config).unwrap();
        assert_eq!(a, b);

        // Each month adds either one or two hires
        let mut previous = position().headcount;
        for month in &a {
            let added = month.headcount - previous;
            assert!(added == 1 || added == 2, "unexpected {added} hires");
            previous = month.headcount;
        }
    }

    #[test]
    fn test_negative_hires_treated_as_zero() {
        let mut assumptions = flat();
        assumptions.hires_per_month = -3.0;
        assumptions.avg_hire_salary = 120_000.0;
        let months = project(&position(), &assumptions, &config()).unwrap();
        assert_eq!(months[0].headcount, 10);
        assert_eq!(months[0].burn, 100_000.0);
    }

    #[test]
    fn test_one_shot_and_recurring_events() {
        let mut assumptions = flat();
        assumptions.events = vec![
            CashEvent::once(1, "Grant", 30_000.0, EventCategory::Other),
            CashEvent::recurring(2, "Lease", -5_000.0, EventCategory::Expense),
        ];
        let months = project(&position(), &assumptions, &config()).unwrap();

        assert!(months[0].events.is_empty());
        assert_eq!(months[1].events, vec!["Grant".to_string()]);
        assert_eq!(months[1].net_cash_flow, -20_000.0);
        assert_eq!(months[2].events, vec!["Lease".to_string()]);
        assert_eq!(months[2].net_cash_flow, -55_000.0);
        // Recurring label only on first firing, cash every month
        assert!(months[3].events.is_empty());
        assert_eq!(months[3].net_cash_flow, -55_000.0);
    }

    #[test]
    fn test_ar_collection_month() {
        let mut p = position();
        p.overdue_ar = 94_000.0;
        let mut assumptions = flat();
        assumptions.ar_collection_month = Some(2);
        let months = project(&p, &assumptions, &config()).unwrap();

        assert_eq!(months[2].events, vec!["AR collected +$94K".to_string()]);
        assert_eq!(months[2].net_cash_flow, 44_000.0);
        assert_eq!(months[3].net_cash_flow, -50_000.0);
    }

    #[test]
    fn test_ar_never_collected() {
        let mut p = position();
        p.overdue_ar = 94_000.0;
        let months = project(&p, &flat(), &config()).unwrap();
        assert!(months.iter().all(|m| m.events.is_empty()));
    }

    #[test]
    fn test_early_termination() {
        let mut p = position();
        p.cash_balance = 120_000.0;
        let trajectory = simulate(&p, &flat(), &config()).unwrap();

        // 120k - 50k - 50k - 50k: negative in month 2
        assert_eq!(trajectory.months.len(), 3);
        assert_eq!(trajectory.runout_month, Some(2));
        let last = trajectory.months.last().unwrap();
        assert_eq!(last.closing_cash, -30_000.0);
        assert_eq!(last.runway, 0.0);
    }

    #[test]
    fn test_exactly_zero_cash_terminates() {
        let mut p = position();
        p.cash_balance = 100_000.0;
        let months = project(&p, &flat(), &config()).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[1].closing_cash, 0.0);
    }

    #[test]
    fn test_sub_dollar_cash_rounds_to_runout() {
        // 0.40 left after month 1 is shown as $0, so month 1 must be the last
        let mut p = position();
        p.cash_balance = 100_000.4;
        let trajectory = simulate(&p, &flat(), &config()).unwrap();

        assert_eq!(trajectory.months.len(), 2);
        assert_eq!(trajectory.runout_month, Some(1));
        assert_eq!(trajectory.months[1].closing_cash, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let err = project(&position(), &flat(), &config().with_horizon(0)).unwrap_err();
        assert_eq!(err, crate::error::EngineError::InvalidHorizon(0));

        let mut assumptions = flat();
        assumptions.revenue_growth_mom = f64::NAN;
        assert!(project(&position(), &assumptions, &config()).is_err());
    }
}
