//! Plain-text rendering of engine results for the terminal

use std::fmt::{self, Write};

use runway_core::format::compact_currency;
use runway_core::model::{
    BurnBreakdown, EngineResult, FinancialPosition, OptimisationOpportunity, RunwayAnalysis,
    ScenarioProjection, ScenarioSet,
};
use serde::Serialize;

use crate::input::PositionSource;
use crate::util::format::{
    format_currency_short, format_month_delta, format_months, format_percentage, format_rate,
    format_signed_currency,
};

/// Structured form of a full run, for JSON and YAML output
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub as_of: jiff::civil::Date,
    pub position: &'a FinancialPosition,
    #[serde(flatten)]
    pub result: &'a EngineResult,
    #[serde(skip_serializing_if = "no_custom_scenarios")]
    pub custom_scenarios: &'a [ScenarioProjection],
}

fn no_custom_scenarios(custom: &&[ScenarioProjection]) -> bool {
    custom.is_empty()
}

/// Every text section in reading order
pub fn write_full_report(
    out: &mut impl Write,
    position: &FinancialPosition,
    source: PositionSource,
    result: &EngineResult,
    custom: &[ScenarioProjection],
) -> fmt::Result {
    write_position(out, position, source)?;
    write_runway(out, &result.runway_analysis)?;
    write_scenario_summary(out, &result.scenarios, custom)?;
    write_burn(
        out,
        &result.burn_breakdown,
        &result.optimisations,
        result.optimised_runway_months,
    )
}

fn heading(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

pub fn write_position(
    out: &mut impl Write,
    position: &FinancialPosition,
    source: PositionSource,
) -> fmt::Result {
    let origin = match source {
        PositionSource::Explicit => "input file",
        PositionSource::History => "trailing history",
        PositionSource::Demo => "demo data",
    };
    heading(out, &format!("Position ({origin})"))?;
    writeln!(out, "  Cash balance      {}", format_currency_short(position.cash_balance))?;
    writeln!(out, "  Monthly burn      {}", format_currency_short(position.monthly_burn))?;
    writeln!(out, "  Monthly revenue   {}", format_currency_short(position.monthly_revenue))?;
    writeln!(out, "  Headcount         {}", position.headcount)?;
    writeln!(out, "  Overdue AR        {}", format_currency_short(position.overdue_ar))?;
    writeln!(out)
}

/// One line per scenario: runway, runout and period totals
pub fn write_scenario_summary(
    out: &mut impl Write,
    scenarios: &ScenarioSet,
    custom: &[ScenarioProjection],
) -> fmt::Result {
    heading(out, "Scenarios")?;
    writeln!(
        out,
        "  {:<16} {:>10} {:>26} {:>14} {:>14}",
        "Scenario", "Runway", "Runout", "Burn", "Revenue"
    )?;

    let presets = scenarios.iter().map(|(_, projection)| projection);
    for projection in presets.chain(custom.iter()) {
        writeln!(
            out,
            "  {:<16} {:>10} {:>26} {:>14} {:>14}",
            projection.scenario.to_string(),
            format_months(projection.runway_months),
            projection.runout_date.to_string(),
            format_currency_short(projection.total_burn_in_period),
            format_currency_short(projection.total_revenue_in_period),
        )?;
    }
    writeln!(out)
}

/// Month-by-month table for one projection
pub fn write_projection(out: &mut impl Write, projection: &ScenarioProjection) -> fmt::Result {
    let a = &projection.assumptions;
    heading(out, &format!("{} scenario", projection.scenario))?;
    writeln!(
        out,
        "  growth {} · creep {} · {:.1} hires/mo · optimisation {}",
        format_rate(a.revenue_growth_mom),
        format_rate(a.burn_growth_mom),
        a.hires_per_month,
        format_signed_currency(a.saas_optimisation),
    )?;
    writeln!(
        out,
        "  {:<8} {:>13} {:>12} {:>12} {:>12} {:>13} {:>5} {:>8}  Events",
        "Month", "Opening", "Revenue", "Burn", "Net", "Closing", "HC", "Runway"
    )?;
    for month in &projection.months {
        writeln!(
            out,
            "  {:<8} {:>13} {:>12} {:>12} {:>12} {:>13} {:>5} {:>8}  {}",
            month.label,
            format_currency_short(month.opening_cash),
            format_currency_short(month.revenue),
            format_currency_short(month.burn),
            format_signed_currency(month.net_cash_flow),
            format_currency_short(month.closing_cash),
            month.headcount,
            format_months(month.runway),
            month.events.join(", "),
        )?;
    }
    writeln!(out)
}

pub fn write_burn(
    out: &mut impl Write,
    breakdown: &BurnBreakdown,
    optimisations: &[OptimisationOpportunity],
    optimised_runway_months: f64,
) -> fmt::Result {
    heading(
        out,
        &format!(
            "Burn breakdown ({}/mo, payroll {:.0}%)",
            compact_currency(breakdown.total_burn),
            breakdown.payroll_ratio
        ),
    )?;
    for category in &breakdown.categories {
        writeln!(
            out,
            "  {:<22} {:>12} {:>7}  {}",
            category.label,
            format_currency_short(category.monthly_amount),
            format_percentage(category.pct_of_burn),
            category.driver_note,
        )?;
    }
    writeln!(out, "  Top driver: {}", breakdown.top_driver)?;
    writeln!(out)?;

    if optimisations.is_empty() {
        writeln!(out, "No optimisation opportunities found.")?;
        return writeln!(out);
    }

    heading(out, "Optimisation opportunities")?;
    for opportunity in optimisations {
        writeln!(
            out,
            "  {:<22} save {:>10}/mo  +{:.0} days  {}",
            opportunity.category,
            format_currency_short(opportunity.potential_saving),
            opportunity.runway_impact_days,
            opportunity.action,
        )?;
    }
    writeln!(
        out,
        "  Runway with all savings: {}",
        format_months(optimised_runway_months)
    )?;
    writeln!(out)
}

pub fn write_runway(out: &mut impl Write, analysis: &RunwayAnalysis) -> fmt::Result {
    heading(out, "Runway")?;
    writeln!(
        out,
        "  {} at {}/mo burn, runout {}",
        format_months(analysis.base_runway_months),
        format_currency_short(analysis.monthly_burn),
        analysis.base_runout_date,
    )?;
    writeln!(out, "  {}", analysis.zone.message())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {:<30} {:>12} {:>18} {:>10} {:>8}",
        "Lever", "Value", "Unit", "Δ runway", "Δ %"
    )?;
    for row in &analysis.sensitivity_table {
        writeln!(
            out,
            "  {:<30} {:>12} {:>18} {:>10} {:>7.0}%",
            row.label,
            format_currency_short(row.current_value),
            row.unit,
            format_month_delta(row.delta_runway_months),
            row.delta_runway_pct,
        )?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::ForecastConfig;
    use runway_core::demo::demo_position;
    use runway_core::run_engine;

    fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
        let mut out = String::new();
        f(&mut out).unwrap();
        out
    }

    #[test]
    fn test_report_sections() {
        let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1));
        let result = run_engine(&demo_position(), None, &config).unwrap();

        let summary = render(|out| write_scenario_summary(out, &result.scenarios, &[]));
        assert!(summary.contains("bear"));
        assert!(summary.contains("Beyond projection window"));

        let base = render(|out| write_projection(out, &result.scenarios.base));
        assert!(base.contains("AR collected +$94K"));
        assert!(base.contains("Apr '26"));

        let burn = render(|out| {
            write_burn(
                out,
                &result.burn_breakdown,
                &result.optimisations,
                result.optimised_runway_months,
            )
        });
        assert!(burn.contains("Payroll & Benefits"));
        assert!(burn.contains("Optimisation opportunities"));

        let runway = render(|out| write_runway(out, &result.runway_analysis));
        assert!(runway.contains("$2M bridge round"));
        assert!(runway.contains("2026-05-01"));
    }

    #[test]
    fn test_run_report_json() {
        let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1));
        let position = demo_position();
        let result = run_engine(&position, None, &config).unwrap();
        let report = RunReport {
            as_of: config.as_of,
            position: &position,
            result: &result,
            custom_scenarios: &[],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["as_of"], "2026-03-01");
        assert_eq!(json["position"]["headcount"], 34);
        assert!(json["scenarios"]["base"].is_object());
        assert!(json["runway_analysis"]["sensitivity_table"].is_array());
        assert!(json.get("custom_scenarios").is_none());

        let text = render(|out| {
            write_full_report(out, &position, PositionSource::Demo, &result, &[])
        });
        assert!(text.contains("Runway"));
        assert!(text.contains("Burn breakdown"));
    }

    #[test]
    fn test_position_origin() {
        let text = render(|out| write_position(out, &demo_position(), PositionSource::Demo));
        assert!(text.starts_with("Position (demo data)"));
        assert!(text.contains("$574,000"));
    }
}
