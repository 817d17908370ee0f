//! Scenario Builder DSL
//!
//! Provides a fluent API for assembling custom scenario assumptions, either
//! from scratch or by tweaking one of the presets.
//!
//! # Examples
//!
//! ```ignore
//! use runway_core::config::ScenarioBuilder;
//!
//! // Lean plan: no hiring, one bridge round, a new recurring tool cost
//! let lean = ScenarioBuilder::new()
//!     .revenue_growth(0.04)
//!     .burn_creep(0.005)
//!     .cost_optimisation(-12_000.0)
//!     .fundraise(2, "Bridge round", 750_000.0)
//!     .recurring_expense(1, "Data warehouse", 4_500.0)
//!     .collect_ar_in(0)
//!     .build();
//! ```

use crate::model::{
    CashEvent, EventCategory, FinancialPosition, ScenarioAssumptions, ScenarioKey,
};
use crate::scenarios::default_assumptions;

/// Builder for [`ScenarioAssumptions`]
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    assumptions: ScenarioAssumptions,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Flat scenario: no growth, no creep, no hires, AR never collected
    pub fn new() -> Self {
        Self {
            assumptions: ScenarioAssumptions {
                revenue_growth_mom: 0.0,
                burn_growth_mom: 0.0,
                hires_per_month: 0.0,
                avg_hire_salary: 0.0,
                saas_optimisation: 0.0,
                ar_collection_month: None,
                events: Vec::new(),
            },
        }
    }

    /// Start from a preset's defaults for `position`
    pub fn from_preset(key: ScenarioKey, position: &FinancialPosition) -> Self {
        Self {
            assumptions: default_assumptions(key, position),
        }
    }

    pub fn revenue_growth(mut self, rate: f64) -> Self {
        self.assumptions.revenue_growth_mom = rate;
        self
    }

    pub fn burn_creep(mut self, rate: f64) -> Self {
        self.assumptions.burn_growth_mom = rate;
        self
    }

    pub fn hires_per_month(mut self, hires: f64) -> Self {
        self.assumptions.hires_per_month = hires;
        self
    }

    pub fn hire_salary(mut self, annual_salary: f64) -> Self {
        self.assumptions.avg_hire_salary = annual_salary;
        self
    }

    /// Persistent monthly burn shift (negative = saving)
    pub fn cost_optimisation(mut self, monthly_delta: f64) -> Self {
        self.assumptions.saas_optimisation = monthly_delta;
        self
    }

    pub fn collect_ar_in(mut self, month: u32) -> Self {
        self.assumptions.ar_collection_month = Some(month);
        self
    }

    pub fn never_collect_ar(mut self) -> Self {
        self.assumptions.ar_collection_month = None;
        self
    }

    /// One-shot equity or debt inflow
    pub fn fundraise(self, month: u32, label: impl Into<String>, amount: f64) -> Self {
        self.event(CashEvent::once(month, label, amount, EventCategory::Fundraise))
    }

    /// Monthly cost starting at `month`; `monthly_cost` is given as a positive number
    pub fn recurring_expense(self, month: u32, label: impl Into<String>, monthly_cost: f64) -> Self {
        self.event(CashEvent::recurring(
            month,
            label,
            -monthly_cost.abs(),
            EventCategory::Expense,
        ))
    }

    pub fn event(mut self, event: CashEvent) -> Self {
        self.assumptions.events.push(event);
        self
    }

    /// Drop all scheduled events, keeping the growth and cost parameters
    pub fn clear_events(mut self) -> Self {
        self.assumptions.events.clear();
        self
    }

    pub fn build(self) -> ScenarioAssumptions {
        self.assumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> FinancialPosition {
        FinancialPosition {
            cash_balance: 1_000_000.0,
            monthly_burn: 100_000.0,
            monthly_revenue: 40_000.0,
            headcount: 8,
            avg_annual_salary: 150_000.0,
            overdue_ar: 20_000.0,
        }
    }

    #[test]
    fn test_builder_from_scratch() {
        let assumptions = ScenarioBuilder::new()
            .revenue_growth(0.04)
            .burn_creep(0.005)
            .cost_optimisation(-12_000.0)
            .fundraise(2, "Bridge round", 750_000.0)
            .recurring_expense(1, "Data warehouse", 4_500.0)
            .collect_ar_in(0)
            .build();

        assert_eq!(assumptions.revenue_growth_mom, 0.04);
        assert_eq!(assumptions.ar_collection_month, Some(0));
        assert_eq!(assumptions.events.len(), 2);
        assert_eq!(assumptions.events[0].category, EventCategory::Fundraise);
        assert!(!assumptions.events[0].recurring);
        assert_eq!(assumptions.events[1].amount, -4_500.0);
        assert!(assumptions.events[1].recurring);
    }

    #[test]
    fn test_builder_from_preset_overrides() {
        let assumptions = ScenarioBuilder::from_preset(ScenarioKey::Bull, &position())
            .hires_per_month(0.0)
            .never_collect_ar()
            .build();

        assert_eq!(assumptions.revenue_growth_mom, 0.08);
        assert_eq!(assumptions.hires_per_month, 0.0);
        assert_eq!(assumptions.ar_collection_month, None);
        // Preset events are kept
        assert!(
            assumptions
                .events
                .iter()
                .any(|e| e.category == EventCategory::Fundraise)
        );
    }

    #[test]
    fn test_clear_events() {
        let assumptions = ScenarioBuilder::from_preset(ScenarioKey::Bull, &position())
            .clear_events()
            .build();
        assert!(assumptions.events.is_empty());
    }
}
