//! Command-line front end for the runway engine
//!
//! Loads a position (from an input file, trailing history or the bundled demo
//! data), runs the engine and renders scenarios, burn attribution and runway
//! sensitivity as text, JSON or YAML.

pub mod cache;
pub mod input;
pub mod logging;
pub mod report;
pub mod session;
pub mod util;

pub use cache::ContextCache;
pub use input::{EngineInput, InputError, PositionSource};
pub use logging::init_logging;
pub use session::Session;
