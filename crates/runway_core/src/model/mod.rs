mod history;
mod position;
mod results;
mod scenario;

pub use history::MonthlyFlows;
pub use position::{
    ExpenseLine, FULLY_LOADED_FACTOR, FinancialPosition, PayrollInput, fully_loaded_monthly,
};
pub use results::{
    BurnBreakdown, BurnCategory, EngineResult, Lever, OptimisationOpportunity, ProjectedMonth,
    RunoutDate, RunwayAnalysis, RunwaySensitivity, RunwayZone, ScenarioProjection, ScenarioSet,
    Trend,
};
pub use scenario::{CashEvent, EventCategory, ScenarioAssumptions, ScenarioKey, ScenarioName};
