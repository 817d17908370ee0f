//! Property-based checks of the engine invariants

use jiff::civil::date;
use proptest::prelude::*;

use crate::burn::{RECONCILIATION_THRESHOLD, build_burn_breakdown};
use crate::config::{ForecastConfig, ScenarioBuilder};
use crate::forecast::project;
use crate::model::{ExpenseLine, FinancialPosition, Lever, PayrollInput};
use crate::runway::{INFINITE_RUNWAY_MONTHS, build_runway_analysis, calculate_runway};

fn arb_position() -> impl Strategy<Value = FinancialPosition> {
    (
        0.0..5_000_000.0f64,
        1.0..500_000.0f64,
        0.0..500_000.0f64,
        0u32..200,
        50_000.0..250_000.0f64,
        0.0..300_000.0f64,
    )
        .prop_map(
            |(cash_balance, monthly_burn, monthly_revenue, headcount, avg_annual_salary, overdue_ar)| {
                FinancialPosition {
                    cash_balance,
                    monthly_burn,
                    monthly_revenue,
                    headcount,
                    avg_annual_salary,
                    overdue_ar,
                }
            },
        )
}

proptest! {
    #[test]
    fn breakdown_reconciles_to_total_burn(
        total_burn in 0.0..1_000_000.0f64,
        headcount in 0u32..40,
        monthly_cost in 0.0..25_000.0f64,
        amounts in prop::collection::vec(0.0..60_000.0f64, 0..6),
    ) {
        let payroll = PayrollInput { headcount, avg_fully_loaded_monthly: monthly_cost };
        let lines: Vec<ExpenseLine> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| ExpenseLine::new(format!("Line {i}"), *amount))
            .collect();

        let breakdown = build_burn_breakdown(total_burn, &payroll, &lines);

        prop_assert!(
            (breakdown.categorised_total() - total_burn).abs() <= RECONCILIATION_THRESHOLD
        );

        for pair in breakdown.categories.windows(2) {
            prop_assert!(pair[0].monthly_amount >= pair[1].monthly_amount);
        }
        prop_assert_eq!(&breakdown.top_driver, &breakdown.categories[0].label);
    }

    #[test]
    fn runway_non_negative_and_monotonic_in_cash(
        cash in -1_000_000.0..10_000_000.0f64,
        extra in 0.0..1_000_000.0f64,
        burn in 1.0..1_000_000.0f64,
    ) {
        let runway = calculate_runway(cash, burn);
        prop_assert!(runway >= 0.0);
        prop_assert!(calculate_runway(cash + extra, burn) >= runway);
        prop_assert!(calculate_runway(cash, burn + extra) <= runway);
    }

    #[test]
    fn zero_burn_is_effectively_infinite(cash in -1_000_000.0..10_000_000.0f64) {
        prop_assert_eq!(calculate_runway(cash, 0.0), INFINITE_RUNWAY_MONTHS);
    }

    #[test]
    fn projection_stops_at_first_runout(
        position in arb_position(),
        growth in -0.05..0.10f64,
        creep in 0.0..0.05f64,
        hires in 0.0..3.0f64,
        horizon in 1u32..=36,
    ) {
        let assumptions = ScenarioBuilder::new()
            .revenue_growth(growth)
            .burn_creep(creep)
            .hires_per_month(hires)
            .hire_salary(position.avg_annual_salary)
            .build();
        let config = ForecastConfig::new(date(2026, 3, 1)).with_horizon(horizon);

        let months = project(&position, &assumptions, &config).unwrap();
        prop_assert!(!months.is_empty());
        prop_assert!(months.len() <= horizon as usize);

        let (last, earlier) = months.split_last().unwrap();
        for month in earlier {
            prop_assert!(month.closing_cash > 0.0);
        }
        if months.len() < horizon as usize {
            prop_assert!(last.closing_cash <= 0.0);
        }
        for (i, month) in months.iter().enumerate() {
            prop_assert_eq!(month.month, i as u32);
            prop_assert!(month.runway >= 0.0);
        }
    }

    #[test]
    fn sensitivity_table_sorted_and_complete(position in arb_position()) {
        let analysis = build_runway_analysis(&position, date(2026, 3, 1));
        prop_assert_eq!(analysis.sensitivity_table.len(), Lever::ALL.len());

        for pair in analysis.sensitivity_table.windows(2) {
            prop_assert!(pair[0].delta_runway_months >= pair[1].delta_runway_months);
        }

        let ar = analysis
            .sensitivity_table
            .iter()
            .find(|s| s.lever == Lever::CollectOverdueAr)
            .unwrap();
        prop_assert!(ar.delta_runway_months >= 0.0);
    }
}
