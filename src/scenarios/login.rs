//! Login scenarios

use super::identity::{Identity, DEFAULT_PASSWORD};
use super::{LOGIN_VALID, REGISTER_CREATE};
use crate::models::{Action, Expectation, LoginRequest, Scenario, ScenarioGroup};

pub fn scenarios(identity: &Identity) -> Vec<Scenario> {
    vec![
        Scenario::new(
            LOGIN_VALID.as_str(),
            ScenarioGroup::Login,
            "valid credentials issue an access token",
            Action::Login(identity.login()),
            Expectation::LoggedIn,
        )
        .depends_on(REGISTER_CREATE),
        Scenario::new(
            "login.unknown_user",
            ScenarioGroup::Login,
            "username that was never registered",
            Action::Login(LoginRequest::new("usr12345", DEFAULT_PASSWORD)),
            Expectation::error(401, "User does not exist"),
        ),
        Scenario::new(
            "login.wrong_password",
            ScenarioGroup::Login,
            "registered username with a wrong password",
            Action::Login(LoginRequest::new(&identity.username, "pswd12345")),
            Expectation::error(401, "Invalid password"),
        )
        .depends_on(REGISTER_CREATE),
    ]
}
