//! Scenario matrix for the user service
//!
//! Every scenario is a literal record; the runner is the only code that
//! interprets them.
//!
//! ## Groups
//!
//! ### Health
//! - status and repeated status checks, no dependencies
//!
//! ### Registration
//! - `register.create` seeds the run with the generated user
//! - duplicate username/email, invalid email
//! - missing mandatory fields
//! - username/password format violations (UTF-16 bodies)
//!
//! ### Login
//! - `login.valid` captures the access token
//! - unknown user, wrong password
//!
//! ### User Lookup
//! - profile echo, forged token, unknown id

mod health;
mod identity;
mod login;
mod registration;
mod user;

pub use health::HEALTHY_BODY;
pub use identity::Identity;

use crate::models::{Scenario, ScenarioId};

/// Registration whose id every dependent lookup uses
pub const REGISTER_CREATE: ScenarioId = ScenarioId("register.create");

/// Login whose token every authenticated lookup presents
pub const LOGIN_VALID: ScenarioId = ScenarioId("login.valid");

/// Full matrix for one run, in declaration order
pub fn matrix(identity: &Identity) -> Vec<Scenario> {
    let mut scenarios = health::scenarios();
    scenarios.extend(registration::scenarios(identity));
    scenarios.extend(login::scenarios(identity));
    scenarios.extend(user::scenarios(identity));
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, ScenarioGroup, TokenRef, UserRef};
    use std::collections::HashSet;

    fn sample() -> Vec<Scenario> {
        matrix(&Identity::with_username("test123"))
    }

    #[test]
    fn test_matrix_ids_are_unique() {
        let scenarios = sample();
        let ids: HashSet<_> = scenarios.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), scenarios.len());
        assert_eq!(scenarios.len(), 24);
    }

    #[test]
    fn test_every_dependency_is_declared() {
        let scenarios = sample();
        let ids: HashSet<_> = scenarios.iter().map(|s| s.id).collect();
        for scenario in &scenarios {
            for dep in &scenario.depends_on {
                assert!(ids.contains(dep), "{} depends on unknown {}", scenario.id, dep);
            }
        }
    }

    #[test]
    fn test_health_is_isolated() {
        for scenario in sample()
            .iter()
            .filter(|s| s.group == ScenarioGroup::Health)
        {
            assert!(scenario.depends_on.is_empty());
        }
    }

    #[test]
    fn test_state_consumers_declare_producers() {
        for scenario in sample() {
            if let Action::GetUser { user, token } = &scenario.action {
                if *user == UserRef::Created {
                    assert!(scenario.depends_on.contains(&REGISTER_CREATE));
                }
                if *token == TokenRef::Issued {
                    assert!(scenario.depends_on.contains(&LOGIN_VALID));
                }
            }
        }
    }
}
