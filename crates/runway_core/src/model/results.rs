//! Engine outputs
//!
//! Every record here is produced by the engine and consumed read-only by
//! reporting collaborators. Monetary values are already rounded to whole
//! currency units; runway figures to one decimal place.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::scenario::{ScenarioAssumptions, ScenarioKey, ScenarioName};

/// One simulated month of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMonth {
    /// 0-based
    pub month: u32,
    /// e.g. "Mar '26"
    pub label: String,
    pub opening_cash: f64,
    pub revenue: f64,
    pub burn: f64,
    /// revenue - burn + event cash
    pub net_cash_flow: f64,
    pub closing_cash: f64,
    /// Projected heads after this month's hires
    pub headcount: u32,
    /// Labels of events that fired this month
    pub events: Vec<String>,
    /// Months of burn remaining at closing cash
    pub runway: f64,
}

/// Calendar month in which cash first reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum RunoutDate {
    On(Date),
    /// Cash survives the whole projection horizon
    BeyondWindow,
    /// Runway is long enough (or burn zero) that no date is meaningful
    NotForeseeable,
}

impl RunoutDate {
    pub fn date(&self) -> Option<Date> {
        match self {
            RunoutDate::On(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for RunoutDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunoutDate::On(d) => write!(f, "{d}"),
            RunoutDate::BeyondWindow => f.write_str("Beyond projection window"),
            RunoutDate::NotForeseeable => f.write_str("No foreseeable runout"),
        }
    }
}

/// Full projection for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: ScenarioName,
    pub assumptions: ScenarioAssumptions,
    /// Stops early at the first month with closing cash <= 0
    pub months: Vec<ProjectedMonth>,
    pub runway_months: f64,
    pub runout_date: RunoutDate,
    pub total_burn_in_period: f64,
    pub total_revenue_in_period: f64,
}

impl ScenarioProjection {
    /// Month index at which cash ran out, if it did within the horizon
    pub fn runout_month(&self) -> Option<u32> {
        // The projector stops at the runout month, so it is always the last one
        self.runout_date
            .date()
            .and_then(|_| self.months.last())
            .map(|m| m.month)
    }
}

/// The three preset projections side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub bear: ScenarioProjection,
    pub base: ScenarioProjection,
    pub bull: ScenarioProjection,
}

impl ScenarioSet {
    pub fn get(&self, key: ScenarioKey) -> &ScenarioProjection {
        match key {
            ScenarioKey::Bear => &self.bear,
            ScenarioKey::Base => &self.base,
            ScenarioKey::Bull => &self.bull,
        }
    }

    /// Projections in bear, base, bull order
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioKey, &ScenarioProjection)> {
        ScenarioKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

// ============================================================================
// Burn attribution
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn arrow_label(&self) -> &'static str {
        match self {
            Trend::Up => "↑ Increasing",
            Trend::Down => "↓ Decreasing",
            Trend::Flat => "→ Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnCategory {
    pub label: String,
    pub monthly_amount: f64,
    pub pct_of_burn: f64,
    pub trend: Trend,
    pub driver_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnBreakdown {
    pub total_burn: f64,
    /// Sorted descending by `monthly_amount`
    pub categories: Vec<BurnCategory>,
    /// Payroll as a whole-number percentage of total burn
    pub payroll_ratio: f64,
    pub top_driver: String,
}

impl BurnBreakdown {
    /// Sum of all category amounts
    pub fn categorised_total(&self) -> f64 {
        self.categories.iter().map(|c| c.monthly_amount).sum()
    }
}

/// A proposed saving found by scanning a burn breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimisationOpportunity {
    pub category: String,
    pub current_spend: f64,
    pub potential_saving: f64,
    pub action: String,
    pub runway_impact_days: f64,
}

// ============================================================================
// Runway sensitivity
// ============================================================================

/// Discrete management actions whose runway impact is estimated in isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    CollectOverdueAr,
    DeferOneHire,
    SaasCostReduction,
    Bridge500k,
    Bridge2m,
    HiringFreeze,
    RevenueAcceleration,
}

impl Lever {
    pub const ALL: [Lever; 7] = [
        Lever::CollectOverdueAr,
        Lever::DeferOneHire,
        Lever::SaasCostReduction,
        Lever::Bridge500k,
        Lever::Bridge2m,
        Lever::HiringFreeze,
        Lever::RevenueAcceleration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Lever::CollectOverdueAr => "Collect overdue AR",
            Lever::DeferOneHire => "Defer 1 planned hire",
            Lever::SaasCostReduction => "10% SaaS cost reduction",
            Lever::Bridge500k => "$500K bridge / SAFEs",
            Lever::Bridge2m => "$2M bridge round",
            Lever::HiringFreeze => "Hiring freeze (0 new hires)",
            Lever::RevenueAcceleration => "+5% MoM revenue acceleration",
        }
    }

    /// Display unit for the lever's current value
    pub fn unit(&self) -> &'static str {
        match self {
            Lever::CollectOverdueAr | Lever::Bridge500k | Lever::Bridge2m => "$",
            Lever::DeferOneHire | Lever::SaasCostReduction | Lever::HiringFreeze => "$/mo saved",
            Lever::RevenueAcceleration => "$/mo extra inflow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwaySensitivity {
    pub lever: Lever,
    pub label: String,
    pub current_value: f64,
    pub unit: String,
    /// Change in runway versus baseline if the lever were applied today
    pub delta_runway_months: f64,
    /// Delta as a whole-number percentage of baseline runway
    pub delta_runway_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayZone {
    Critical,
    Warning,
    Comfortable,
    Healthy,
}

impl RunwayZone {
    pub fn message(&self) -> &'static str {
        match self {
            RunwayZone::Critical => {
                "Immediate action required: begin fundraising and cut non-essential spend now."
            }
            RunwayZone::Warning => {
                "Start fundraising today. Initiate burn reduction measures in parallel."
            }
            RunwayZone::Comfortable => {
                "Healthy position but begin Series A conversations; 6 months passes quickly."
            }
            RunwayZone::Healthy => {
                "Strong runway. Focus on growth and prepare metrics for next round."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayAnalysis {
    pub base_runway_months: f64,
    pub base_runout_date: RunoutDate,
    pub cash_balance: f64,
    pub monthly_burn: f64,
    pub zone: RunwayZone,
    /// Sorted descending by `delta_runway_months`; index 0 is the highest-impact lever
    pub sensitivity_table: Vec<RunwaySensitivity>,
}

// ============================================================================
// Facade
// ============================================================================

/// Everything one engine invocation produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    pub scenarios: ScenarioSet,
    pub burn_breakdown: BurnBreakdown,
    pub runway_analysis: RunwayAnalysis,
    pub optimisations: Vec<OptimisationOpportunity>,
    /// Runway if every proposed optimisation were applied
    pub optimised_runway_months: f64,
}
