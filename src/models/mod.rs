//! Data models for the suite
//!
//! Wire payloads, scenario records and run results.

mod payload;
mod result;
mod scenario;

pub use payload::{
    ErrorBody, LoginRequest, LoginResponse, RegistrationRequest, RegistrationResponse,
};
pub use result::{ScenarioResult, ScenarioStatus, SuiteSummary};
pub use scenario::{
    Action, Expectation, Scenario, ScenarioGroup, ScenarioId, TokenRef, UserRef,
};
