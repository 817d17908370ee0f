//! Scenario assumptions and scheduled cash events
//!
//! The three presets are a closed enum; the assumptions themselves are an open
//! record so callers can build arbitrary custom scenarios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite};

/// Named default parameterisations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKey {
    Bear,
    Base,
    Bull,
}

impl ScenarioKey {
    pub const ALL: [ScenarioKey; 3] = [ScenarioKey::Bear, ScenarioKey::Base, ScenarioKey::Bull];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKey::Bear => "bear",
            ScenarioKey::Base => "base",
            ScenarioKey::Bull => "bull",
        }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bear" => Ok(ScenarioKey::Bear),
            "base" => Ok(ScenarioKey::Base),
            "bull" => Ok(ScenarioKey::Bull),
            other => Err(format!("unknown scenario `{other}` (expected bear, base or bull)")),
        }
    }
}

/// Identifies which scenario a projection was produced for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Preset(ScenarioKey),
    Custom(String),
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioName::Preset(key) => write!(f, "{key}"),
            ScenarioName::Custom(name) => f.write_str(name),
        }
    }
}

impl From<ScenarioKey> for ScenarioName {
    fn from(key: ScenarioKey) -> Self {
        ScenarioName::Preset(key)
    }
}

impl From<String> for ScenarioName {
    fn from(name: String) -> Self {
        ScenarioName::Custom(name)
    }
}

impl From<&str> for ScenarioName {
    fn from(name: &str) -> Self {
        ScenarioName::Custom(name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Fundraise,
    Hire,
    Expense,
    ArCollection,
    Other,
}

/// A scheduled cash effect inside a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEvent {
    /// 0-based offset from the first projected month
    pub month: u32,
    pub label: String,
    /// Positive = cash in, negative = cash out
    pub amount: f64,
    pub category: EventCategory,
    /// Repeats every month from `month` onward when set
    #[serde(default)]
    pub recurring: bool,
}

impl CashEvent {
    /// A one-shot event firing only in `month`
    pub fn once(month: u32, label: impl Into<String>, amount: f64, category: EventCategory) -> Self {
        Self {
            month,
            label: label.into(),
            amount,
            category,
            recurring: false,
        }
    }

    /// An event firing every month from `month` onward
    pub fn recurring(
        month: u32,
        label: impl Into<String>,
        amount: f64,
        category: EventCategory,
    ) -> Self {
        Self {
            month,
            label: label.into(),
            amount,
            category,
            recurring: true,
        }
    }

    /// Whether the event moves cash in projection month `month`
    #[inline]
    pub fn fires_in(&self, month: u32) -> bool {
        if self.recurring {
            month >= self.month
        } else {
            month == self.month
        }
    }

    /// Whether the event's label is reported in `month`: one-shot events when
    /// they fire, recurring events only on their first firing.
    #[inline]
    pub fn announced_in(&self, month: u32) -> bool {
        month == self.month
    }
}

/// Growth and cost parameters driving one simulation
///
/// Rates are fractions, not percentages: `0.05` is 5 % per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssumptions {
    /// Month-over-month revenue growth (may be negative)
    pub revenue_growth_mom: f64,
    /// Month-over-month burn creep applied to pre-hire burn
    pub burn_growth_mom: f64,
    /// Supports fractional hiring; see [`crate::config::HireRounding`]
    pub hires_per_month: f64,
    /// Base annual salary of each new hire
    pub avg_hire_salary: f64,
    /// Persistent monthly burn shift from cost optimisation (negative = saving)
    pub saas_optimisation: f64,
    /// Month in which overdue AR is collected; `None` means never
    #[serde(default)]
    pub ar_collection_month: Option<u32>,
    #[serde(default)]
    pub events: Vec<CashEvent>,
}

impl ScenarioAssumptions {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("revenue_growth_mom", self.revenue_growth_mom)?;
        ensure_finite("burn_growth_mom", self.burn_growth_mom)?;
        ensure_finite("hires_per_month", self.hires_per_month)?;
        ensure_finite("avg_hire_salary", self.avg_hire_salary)?;
        ensure_finite("saas_optimisation", self.saas_optimisation)?;
        for event in &self.events {
            ensure_finite("events.amount", event.amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_event_fires_once() {
        let event = CashEvent::once(3, "Series A close", 5_000_000.0, EventCategory::Fundraise);
        let fired: Vec<u32> = (0..12).filter(|&m| event.fires_in(m)).collect();
        assert_eq!(fired, vec![3]);
    }

    #[test]
    fn test_recurring_event_fires_from_start() {
        let event = CashEvent::recurring(2, "New office lease", -18_000.0, EventCategory::Expense);
        assert!(!event.fires_in(1));
        assert!(event.fires_in(2));
        assert!(event.fires_in(11));
        assert!(event.announced_in(2));
        assert!(!event.announced_in(3));
    }

    #[test]
    fn test_scenario_key_parse() {
        assert_eq!("Bull".parse::<ScenarioKey>(), Ok(ScenarioKey::Bull));
        assert_eq!(" base ".parse::<ScenarioKey>(), Ok(ScenarioKey::Base));
        assert!("sideways".parse::<ScenarioKey>().is_err());
    }

    #[test]
    fn test_assumptions_deserialize_defaults() {
        let json = r#"{
            "revenue_growth_mom": 0.03,
            "burn_growth_mom": 0.0,
            "hires_per_month": 0.5,
            "avg_hire_salary": 140000.0,
            "saas_optimisation": 0.0
        }"#;
        let assumptions: ScenarioAssumptions = serde_json::from_str(json).unwrap();
        assert_eq!(assumptions.ar_collection_month, None);
        assert!(assumptions.events.is_empty());
    }
}
