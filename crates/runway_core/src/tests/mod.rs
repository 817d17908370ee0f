//! Cross-module tests for the runway engine
//!
//! Tests are organized by topic:
//! - `engine` - End-to-end runs through `run_engine` on the demo position
//! - `custom_scenarios` - Builder-assembled scenarios driving the projector
//! - `properties` - Property-based checks of the engine invariants

mod properties;
