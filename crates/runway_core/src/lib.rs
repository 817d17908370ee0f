//! Deterministic cash-flow forecasting and runway sensitivity engine
//!
//! This crate turns a company's current cash position into month-by-month
//! projections and runway figures. It supports:
//! - Month-by-month cash projection with growth, burn creep, hiring and scheduled events
//! - Bear / base / bull preset scenarios plus arbitrary custom assumptions
//! - Burn attribution into payroll and expense categories with trend detection
//! - Ranking of management levers by the runway they buy
//!
//! Every function is pure: no I/O, no shared state, no clock reads. The
//! reference date is passed in through [`config::ForecastConfig`].
//!
//! ```ignore
//! use runway_core::{ForecastConfig, run_engine};
//!
//! let config = ForecastConfig::new(jiff::civil::date(2026, 3, 1));
//! let result = run_engine(&position, Some(&expenses), &config)?;
//! println!("base runout: {}", result.scenarios.base.runout_date);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod burn;
pub mod date_math;
pub mod demo;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod format;
pub mod history;
pub mod runway;
pub mod scenarios;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ForecastConfig, HireRounding, ScenarioBuilder};
pub use engine::run_engine;
pub use error::{EngineError, Result};
