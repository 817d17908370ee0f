//! Engine input files
//!
//! An input file is YAML (`.yaml`/`.yml`) or JSON (`.json`). Every section is
//! optional:
//!
//! ```yaml
//! position:
//!   cash_balance: 574000
//!   monthly_burn: 287000
//!   monthly_revenue: 271000
//!   headcount: 34
//!   avg_annual_salary: 160000
//!   overdue_ar: 94000
//! expenses:
//!   - label: Marketing
//!     monthly_amount: 24000
//!     previous_month_amount: 21120
//! custom_scenarios:
//!   - name: Lean
//!     from: base
//!     hires_per_month: 0
//!     events:
//!       - month: 2
//!         label: Bridge round
//!         amount: 750000
//!         category: fundraise
//! ```
//!
//! A `history` section derives the position from trailing monthly flows when
//! no explicit `position` is given; with neither, the demo position is used.

use std::fs;
use std::path::Path;

use runway_core::ScenarioBuilder;
use runway_core::demo::demo_position;
use runway_core::history::DEFAULT_LOOKBACK_MONTHS;
use runway_core::model::{
    CashEvent, ExpenseLine, FinancialPosition, MonthlyFlows, ScenarioAssumptions, ScenarioKey,
};
use serde::{Deserialize, Serialize};

/// Error types for loading an input file
#[derive(Debug)]
pub enum InputError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(msg) => write!(f, "IO error: {msg}"),
            InputError::Parse(msg) => write!(f, "Parse error: {msg}"),
            InputError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported input format `{ext}` (expected yaml, yml or json)")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Everything the engine can be fed from one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<FinancialPosition>,
    /// `None` falls back to the demo breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<ExpenseLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_scenarios: Vec<CustomScenario>,
}

/// Trailing ledger months plus the point-in-time facts they cannot supply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryInput {
    pub cash_balance: f64,
    pub months: Vec<MonthlyFlows>,
    #[serde(default = "default_lookback")]
    pub lookback_months: usize,
    pub headcount: u32,
    pub avg_annual_salary: f64,
    #[serde(default)]
    pub overdue_ar: f64,
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK_MONTHS
}

/// A named scenario, optionally starting from a preset, with field overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomScenario {
    pub name: String,
    /// Preset to start from; a flat scenario when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ScenarioKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_growth_mom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_growth_mom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hires_per_month: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_hire_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saas_optimisation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_collection_month: Option<u32>,
    /// Drop the preset's AR collection entirely
    #[serde(default)]
    pub never_collect_ar: bool,
    /// Drop the preset's scheduled events before appending `events`
    #[serde(default)]
    pub clear_events: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CashEvent>,
}

impl CustomScenario {
    /// Resolve the overrides into a full assumption set for `position`
    pub fn assumptions(&self, position: &FinancialPosition) -> ScenarioAssumptions {
        let mut builder = match self.from {
            Some(key) => ScenarioBuilder::from_preset(key, position),
            None => ScenarioBuilder::new(),
        };

        if let Some(rate) = self.revenue_growth_mom {
            builder = builder.revenue_growth(rate);
        }
        if let Some(rate) = self.burn_growth_mom {
            builder = builder.burn_creep(rate);
        }
        if let Some(hires) = self.hires_per_month {
            builder = builder.hires_per_month(hires);
        }
        if let Some(salary) = self.avg_hire_salary {
            builder = builder.hire_salary(salary);
        }
        if let Some(delta) = self.saas_optimisation {
            builder = builder.cost_optimisation(delta);
        }
        if let Some(month) = self.ar_collection_month {
            builder = builder.collect_ar_in(month);
        }
        if self.never_collect_ar {
            builder = builder.never_collect_ar();
        }
        if self.clear_events {
            builder = builder.clear_events();
        }

        self.events
            .iter()
            .cloned()
            .fold(builder, |b, event| b.event(event))
            .build()
    }
}

/// Where the resolved position came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    Explicit,
    History,
    Demo,
}

impl EngineInput {
    /// Load an input file, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path)
            .map_err(|e| InputError::Io(format!("Failed to read {}: {e}", path.display())))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            other => Err(InputError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, InputError> {
        serde_saphyr::from_str(yaml).map_err(|e| InputError::Parse(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Parse(e.to_string()))
    }

    /// Explicit position first, then one derived from history, then the demo
    pub fn resolve_position(&self) -> (FinancialPosition, PositionSource) {
        if let Some(position) = self.position {
            return (position, PositionSource::Explicit);
        }
        if let Some(history) = &self.history {
            let position = FinancialPosition::from_history(
                history.cash_balance,
                &history.months,
                history.lookback_months,
                history.headcount,
                history.avg_annual_salary,
                history.overdue_ar,
            );
            return (position, PositionSource::History);
        }
        (demo_position(), PositionSource::Demo)
    }
}
