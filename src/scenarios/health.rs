//! Health scenarios
//!
//! Independent of every other scenario.

use crate::models::{Action, Expectation, Scenario, ScenarioGroup};

pub const HEALTHY_BODY: &str = "{\"status\":\"healthy\"}\n";

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "health.status",
            ScenarioGroup::Health,
            "service reports healthy",
            Action::Health { repeat: 1 },
            healthy(),
        ),
        Scenario::new(
            "health.idempotent",
            ScenarioGroup::Health,
            "repeated health checks return identical responses",
            Action::Health { repeat: 3 },
            healthy(),
        ),
    ]
}

fn healthy() -> Expectation {
    Expectation::Body {
        status: 200,
        body: HEALTHY_BODY.to_string(),
    }
}
