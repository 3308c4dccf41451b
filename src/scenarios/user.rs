//! Authenticated user lookup scenarios
//!
//! All of them need run state produced by registration and login.

use super::identity::Identity;
use super::{LOGIN_VALID, REGISTER_CREATE};
use crate::models::{Action, Expectation, Scenario, ScenarioGroup, TokenRef, UserRef};

/// Well-formed but unsigned token prefix
const FORGED_TOKEN: &str = "eyJhbGciOiJIUzI1";

const UNKNOWN_USER_ID: i64 = 123_456_789;

pub fn scenarios(identity: &Identity) -> Vec<Scenario> {
    vec![
        Scenario::new(
            "user.get",
            ScenarioGroup::UserLookup,
            "registered user with the issued token",
            Action::GetUser {
                user: UserRef::Created,
                token: TokenRef::Issued,
            },
            Expectation::Profile(identity.registration()),
        )
        .depends_on(REGISTER_CREATE)
        .depends_on(LOGIN_VALID)
        .known_issue("service has been observed returning null middleName for registered users"),
        Scenario::new(
            "user.invalid_token",
            ScenarioGroup::UserLookup,
            "registered user with a forged token",
            Action::GetUser {
                user: UserRef::Created,
                token: TokenRef::Literal(FORGED_TOKEN.to_string()),
            },
            Expectation::error(401, "Invalid token"),
        )
        .depends_on(REGISTER_CREATE)
        .depends_on(LOGIN_VALID),
        Scenario::new(
            "user.not_found",
            ScenarioGroup::UserLookup,
            "unknown user id with the issued token",
            Action::GetUser {
                user: UserRef::Id(UNKNOWN_USER_ID),
                token: TokenRef::Issued,
            },
            Expectation::error(404, "User not found"),
        )
        .depends_on(LOGIN_VALID),
    ]
}
