//! Single-call entry point composing scenarios, burn attribution and runway
//! sensitivity for one financial position.

use crate::burn::{build_burn_breakdown, identify_optimisations};
use crate::config::ForecastConfig;
use crate::demo::burn_breakdown_from_demo;
use crate::error::Result;
use crate::model::{EngineResult, ExpenseLine, FinancialPosition};
use crate::runway::{build_runway_analysis, runway_with_savings};
use crate::scenarios::run_all_scenarios;

/// Run the complete engine against a financial position.
///
/// When `other_expenses` is `None` the burn breakdown falls back to the bundled
/// demo expense lines, for callers whose accounting data is not connected.
pub fn run_engine(
    position: &FinancialPosition,
    other_expenses: Option<&[ExpenseLine]>,
    config: &ForecastConfig,
) -> Result<EngineResult> {
    let _span = tracing::debug_span!("run_engine", as_of = %config.as_of).entered();

    let scenarios = run_all_scenarios(position, config)?;

    let burn_breakdown = match other_expenses {
        Some(lines) => build_burn_breakdown(position.monthly_burn, &position.payroll_input(), lines),
        None => {
            tracing::debug!("no expense lines supplied, using demo breakdown");
            burn_breakdown_from_demo(position.monthly_burn)
        }
    };

    let runway_analysis = build_runway_analysis(position, config.as_of);
    let optimisations = identify_optimisations(&burn_breakdown, position.cash_balance);
    let optimised_runway_months = runway_with_savings(position, &optimisations);

    Ok(EngineResult {
        scenarios,
        burn_breakdown,
        runway_analysis,
        optimisations,
        optimised_runway_months,
    })
}
