//! Preset scenarios and scenario projections.

use crate::config::ForecastConfig;
use crate::date_math::add_months;
use crate::error::{EngineError, Result};
use crate::forecast::simulate;
use crate::format::{round_money, round_tenths};
use crate::model::{
    CashEvent, EventCategory, FinancialPosition, RunoutDate, ScenarioAssumptions, ScenarioKey,
    ScenarioName, ScenarioProjection, ScenarioSet,
};

/// Canonical assumption set for a preset scenario.
///
/// | Scenario | Rev growth | Burn creep | Hires/mo | Hire salary | Optimisation | AR month |
/// |----------|-----------|------------|----------|-------------|--------------|----------|
/// | bear     | 2 %       | 3 %        | 1.5      | 175,000     | 0            | never    |
/// | base     | 5 %       | 1 %        | 2        | 160,000     | -2,800/mo    | 1        |
/// | bull     | 8 %       | 0.5 %      | 1        | 150,000     | -5,000/mo    | 0        |
///
/// Base and bull also schedule the overdue AR as an `ar_collection` event in
/// their AR month; bull closes a 5M Series A in month 3.
pub fn default_assumptions(key: ScenarioKey, position: &FinancialPosition) -> ScenarioAssumptions {
    let ar_event = |month| {
        CashEvent::once(
            month,
            "AR collection",
            position.overdue_ar,
            EventCategory::ArCollection,
        )
    };

    match key {
        ScenarioKey::Bear => ScenarioAssumptions {
            revenue_growth_mom: 0.02,
            burn_growth_mom: 0.03,
            hires_per_month: 1.5,
            avg_hire_salary: 175_000.0,
            saas_optimisation: 0.0,
            ar_collection_month: None,
            events: vec![],
        },
        ScenarioKey::Base => ScenarioAssumptions {
            revenue_growth_mom: 0.05,
            burn_growth_mom: 0.01,
            hires_per_month: 2.0,
            avg_hire_salary: 160_000.0,
            saas_optimisation: -2_800.0,
            ar_collection_month: Some(1),
            events: vec![ar_event(1)],
        },
        ScenarioKey::Bull => ScenarioAssumptions {
            revenue_growth_mom: 0.08,
            burn_growth_mom: 0.005,
            hires_per_month: 1.0,
            avg_hire_salary: 150_000.0,
            saas_optimisation: -5_000.0,
            ar_collection_month: Some(0),
            events: vec![
                ar_event(0),
                CashEvent::once(3, "Series A close", 5_000_000.0, EventCategory::Fundraise),
            ],
        },
    }
}

/// Run one projection and derive its runway, runout date and period totals.
///
/// Runway is the month index at which cash first reached zero, or the final
/// month's instantaneous runway when cash survives the horizon.
pub fn build_scenario_projection(
    scenario: impl Into<ScenarioName>,
    position: &FinancialPosition,
    assumptions: ScenarioAssumptions,
    config: &ForecastConfig,
) -> Result<ScenarioProjection> {
    let scenario = scenario.into();
    let trajectory = simulate(position, &assumptions, config)?;

    let (runway_months, runout_date) = match trajectory.runout_month {
        Some(month) => {
            let date = add_months(config.as_of, month as i32 + 1).ok_or(
                EngineError::DateOutOfRange {
                    as_of: config.as_of,
                    months: month + 1,
                },
            )?;
            (f64::from(month), RunoutDate::On(date))
        }
        None => (
            trajectory.months.last().map_or(0.0, |m| m.runway),
            RunoutDate::BeyondWindow,
        ),
    };

    let total_burn: f64 = trajectory.months.iter().map(|m| m.burn).sum();
    let total_revenue: f64 = trajectory.months.iter().map(|m| m.revenue).sum();

    tracing::debug!(
        %scenario,
        months = trajectory.months.len(),
        runway_months,
        %runout_date,
        "scenario projected"
    );

    Ok(ScenarioProjection {
        scenario,
        assumptions,
        months: trajectory.months,
        runway_months: round_tenths(runway_months),
        runout_date,
        total_burn_in_period: round_money(total_burn),
        total_revenue_in_period: round_money(total_revenue),
    })
}

/// Project a preset with its default assumptions
pub fn project_preset(
    key: ScenarioKey,
    position: &FinancialPosition,
    config: &ForecastConfig,
) -> Result<ScenarioProjection> {
    build_scenario_projection(key, position, default_assumptions(key, position), config)
}

/// Project bear, base and bull for the same position.
#[cfg(feature = "parallel")]
pub fn run_all_scenarios(
    position: &FinancialPosition,
    config: &ForecastConfig,
) -> Result<ScenarioSet> {
    let (bear, (base, bull)) = rayon::join(
        || project_preset(ScenarioKey::Bear, position, config),
        || {
            rayon::join(
                || project_preset(ScenarioKey::Base, position, config),
                || project_preset(ScenarioKey::Bull, position, config),
            )
        },
    );
    Ok(ScenarioSet {
        bear: bear?,
        base: base?,
        bull: bull?,
    })
}

/// Project bear, base and bull for the same position.
#[cfg(not(feature = "parallel"))]
pub fn run_all_scenarios(
    position: &FinancialPosition,
    config: &ForecastConfig,
) -> Result<ScenarioSet> {
    Ok(ScenarioSet {
        bear: project_preset(ScenarioKey::Bear, position, config)?,
        base: project_preset(ScenarioKey::Base, position, config)?,
        bull: project_preset(ScenarioKey::Bull, position, config)?,
    })
}
