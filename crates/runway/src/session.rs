//! One engine context per input + config, memoised with a TTL

use std::time::Instant;

use runway_core::model::{EngineResult, FinancialPosition, ScenarioProjection};
use runway_core::scenarios::build_scenario_projection;
use runway_core::{EngineError, ForecastConfig, run_engine};

use crate::cache::{ContextCache, fingerprint};
use crate::input::{EngineInput, PositionSource};

pub struct Session {
    input: EngineInput,
    position: FinancialPosition,
    source: PositionSource,
    config: ForecastConfig,
    cache: ContextCache<EngineResult>,
}

impl Session {
    pub fn new(input: EngineInput, config: ForecastConfig) -> Self {
        Self::with_cache(input, config, ContextCache::default())
    }

    pub fn with_cache(
        input: EngineInput,
        config: ForecastConfig,
        cache: ContextCache<EngineResult>,
    ) -> Self {
        let (position, source) = input.resolve_position();
        if source == PositionSource::Demo {
            tracing::info!("no position or history supplied, using demo data");
        }
        Self {
            input,
            position,
            source,
            config,
            cache,
        }
    }

    pub fn position(&self) -> &FinancialPosition {
        &self.position
    }

    pub fn position_source(&self) -> PositionSource {
        self.source
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Everything that determines the engine result
    fn context_key(&self) -> u64 {
        fingerprint(&format!(
            "{:?}|{:?}|{:?}",
            self.position, self.input.expenses, self.config
        ))
    }

    /// Engine result for this session, computed at most once per TTL window
    pub fn result(&mut self) -> Result<&EngineResult, EngineError> {
        self.result_at(Instant::now())
    }

    pub fn result_at(&mut self, now: Instant) -> Result<&EngineResult, EngineError> {
        let key = self.context_key();
        let position = &self.position;
        let expenses = self.input.expenses.as_deref();
        let config = &self.config;
        self.cache
            .get_or_try_insert_with(key, now, || run_engine(position, expenses, config))
    }

    /// Projections for every custom scenario in the input, in file order
    pub fn custom_projections(&self) -> Result<Vec<ScenarioProjection>, EngineError> {
        self.input
            .custom_scenarios
            .iter()
            .map(|custom| {
                build_scenario_projection(
                    custom.name.as_str(),
                    &self.position,
                    custom.assumptions(&self.position),
                    &self.config,
                )
            })
            .collect()
    }
}
