//! Scenario execution engine
//!
//! Dependency ordering, run state and the sequential suite runner.

mod graph;
mod runner;
mod state;

pub use graph::DependencyGraph;
pub use runner::{Selection, SuiteRunner};
pub use state::RunState;
