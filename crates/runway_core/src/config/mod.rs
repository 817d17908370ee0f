//! Engine configuration
//!
//! `ForecastConfig` carries everything about a run that is not part of the
//! company's financial position: the reference date, the horizon and how
//! fractional hires are resolved. The reference date is always injected so a
//! run is reproducible given its inputs.
//!
//! # Builder DSL
//!
//! Custom scenarios are assembled with [`ScenarioBuilder`]:
//!
//! ```ignore
//! use runway_core::config::{ForecastConfig, ScenarioBuilder};
//! use runway_core::model::ScenarioKey;
//!
//! let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1)).with_horizon(18);
//!
//! let assumptions = ScenarioBuilder::from_preset(ScenarioKey::Base, &position)
//!     .hires_per_month(1.0)
//!     .fundraise(6, "Seed extension", 1_500_000.0)
//!     .build();
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::add_months;
use crate::error::{EngineError, MAX_HORIZON_MONTHS, Result};

pub mod scenario_builder;

pub use scenario_builder::ScenarioBuilder;

/// Default projection length in months
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// How the fractional part of `hires_per_month` becomes whole hires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HireRounding {
    /// Carry the fractional remainder forward and add a hire each time the
    /// accumulated fraction reaches one. Fully deterministic.
    #[default]
    Accumulate,
    /// Treat the fraction as the probability of one extra hire each month,
    /// drawn from a generator seeded with `seed`.
    Stochastic { seed: u64 },
}

/// Per-run settings for the projector and the facade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Reference "today"; month 0 is the calendar month after this date
    pub as_of: Date,
    pub horizon_months: u32,
    #[serde(default)]
    pub hire_rounding: HireRounding,
}

impl ForecastConfig {
    pub fn new(as_of: Date) -> Self {
        Self {
            as_of,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            hire_rounding: HireRounding::default(),
        }
    }

    #[must_use]
    pub fn with_horizon(mut self, horizon_months: u32) -> Self {
        self.horizon_months = horizon_months;
        self
    }

    #[must_use]
    pub fn with_hire_rounding(mut self, hire_rounding: HireRounding) -> Self {
        self.hire_rounding = hire_rounding;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_months == 0 || self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(EngineError::InvalidHorizon(self.horizon_months));
        }
        // Runout dates reach up to the maximum horizon regardless of this run's horizon
        if add_months(self.as_of, MAX_HORIZON_MONTHS as i32).is_none() {
            return Err(EngineError::DateOutOfRange {
                as_of: self.as_of,
                months: MAX_HORIZON_MONTHS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1));
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.hire_rounding, HireRounding::Accumulate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_horizon_bounds() {
        let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1));
        assert_eq!(
            config.with_horizon(0).validate(),
            Err(EngineError::InvalidHorizon(0))
        );
        assert!(config.with_horizon(120).validate().is_ok());
        assert_eq!(
            config.with_horizon(121).validate(),
            Err(EngineError::InvalidHorizon(121))
        );
    }

    #[test]
    fn test_as_of_near_calendar_end() {
        let last_ok = ForecastConfig::new(jiff::civil::date(9989, 12, 1));
        assert!(last_ok.validate().is_ok());

        let as_of = jiff::civil::date(9999, 12, 1);
        assert_eq!(
            ForecastConfig::new(as_of).validate(),
            Err(EngineError::DateOutOfRange {
                as_of,
                months: MAX_HORIZON_MONTHS
            })
        );
    }
}
