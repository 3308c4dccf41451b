//! Scenario records
//!
//! A scenario pairs one literal input with the outcome the service must
//! produce, plus the scenarios that have to run before it.

use reqwest::Method;
use serde::Serialize;
use std::fmt;

use crate::config::Endpoint;
use crate::http::BodyEncoding;
use crate::models::payload::{LoginRequest, RegistrationRequest};

/// Stable scenario identifier, e.g. `register.duplicate_username`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScenarioId(pub &'static str);

impl ScenarioId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Scenario groups, one per endpoint under test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioGroup {
    Health,
    Registration,
    Login,
    UserLookup,
}

impl ScenarioGroup {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioGroup::Health => "Health",
            ScenarioGroup::Registration => "Registration",
            ScenarioGroup::Login => "Login",
            ScenarioGroup::UserLookup => "User Lookup",
        }
    }

    pub fn all() -> Vec<ScenarioGroup> {
        vec![
            ScenarioGroup::Health,
            ScenarioGroup::Registration,
            ScenarioGroup::Login,
            ScenarioGroup::UserLookup,
        ]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<ScenarioGroup> {
        match s.to_lowercase().as_str() {
            "health" => Some(ScenarioGroup::Health),
            "registration" | "register" => Some(ScenarioGroup::Registration),
            "login" => Some(ScenarioGroup::Login),
            "user" | "user-lookup" | "user_lookup" => Some(ScenarioGroup::UserLookup),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which user id a lookup targets
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserRef {
    /// Id captured by the successful registration
    Created,
    Id(i64),
}

/// Which token a lookup presents in `Authorization`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenRef {
    /// Token captured by the successful login
    Issued,
    Literal(String),
}

/// Request a scenario sends
#[derive(Clone, Debug)]
pub enum Action {
    /// `GET health`, sent `repeat` times
    Health { repeat: u32 },
    /// `POST register` with a serialized request
    Register {
        request: RegistrationRequest,
        encoding: BodyEncoding,
    },
    /// `POST register` with a hand-written JSON body
    RegisterRaw { body: String },
    /// `POST login`
    Login(LoginRequest),
    /// `GET user/{id}` with an `Authorization` header
    GetUser { user: UserRef, token: TokenRef },
}

impl Action {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Action::Health { .. } => Endpoint::Health,
            Action::Register { .. } | Action::RegisterRaw { .. } => Endpoint::Register,
            Action::Login(_) => Endpoint::Login,
            Action::GetUser { .. } => Endpoint::User,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Action::Health { .. } | Action::GetUser { .. } => Method::GET,
            _ => Method::POST,
        }
    }
}

/// Outcome a scenario asserts
#[derive(Clone, Debug)]
pub enum Expectation {
    /// Exact status and exact body text
    Body { status: u16, body: String },
    /// `{"error":"<message>"}` plus newline
    Error { status: u16, message: String },
    /// 200 echoing the submitted profile with a positive `id`, which is captured
    Registered(RegistrationRequest),
    /// 200 with `Login successful` and a non-empty token, which is captured
    LoggedIn,
    /// 200 echoing the registered profile
    Profile(RegistrationRequest),
}

impl Expectation {
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Expectation::Error {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Expectation::Body { status, .. } | Expectation::Error { status, .. } => *status,
            _ => 200,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Body { status, body } => write!(f, "{status} {}", body.trim_end()),
            Expectation::Error { status, message } => write!(f, "{status} error \"{message}\""),
            Expectation::Registered(_) => write!(f, "200 profile echo + id"),
            Expectation::LoggedIn => write!(f, "200 Login successful + access-token"),
            Expectation::Profile(_) => write!(f, "200 profile echo"),
        }
    }
}

/// One entry of the scenario matrix
#[derive(Clone, Debug)]
pub struct Scenario {
    pub id: ScenarioId,
    pub group: ScenarioGroup,
    pub description: String,
    pub depends_on: Vec<ScenarioId>,
    pub action: Action,
    pub expect: Expectation,
    /// Known defect of the service this scenario runs into
    pub known_issue: Option<String>,
}

impl Scenario {
    pub fn new(
        id: &'static str,
        group: ScenarioGroup,
        description: impl Into<String>,
        action: Action,
        expect: Expectation,
    ) -> Self {
        Self {
            id: ScenarioId(id),
            group,
            description: description.into(),
            depends_on: Vec::new(),
            action,
            expect,
            known_issue: None,
        }
    }

    pub fn depends_on(mut self, id: ScenarioId) -> Self {
        if !self.depends_on.contains(&id) {
            self.depends_on.push(id);
        }
        self
    }

    pub fn known_issue(mut self, note: impl Into<String>) -> Self {
        self.known_issue = Some(note.into());
        self
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_str() {
        assert_eq!(ScenarioGroup::from_str("LOGIN"), Some(ScenarioGroup::Login));
        assert_eq!(
            ScenarioGroup::from_str("user-lookup"),
            Some(ScenarioGroup::UserLookup)
        );
        assert_eq!(ScenarioGroup::from_str("admin"), None);
    }

    #[test]
    fn test_expectation_status_and_display() {
        let expect = Expectation::error(401, "Invalid password");
        assert_eq!(expect.status(), 401);
        assert_eq!(expect.to_string(), "401 error \"Invalid password\"");
        assert_eq!(Expectation::LoggedIn.status(), 200);
    }

    #[test]
    fn test_scenario_builder_dedups_dependencies() {
        let scenario = Scenario::new(
            "login.valid",
            ScenarioGroup::Login,
            "valid credentials",
            Action::Login(LoginRequest::new("test1", "Password1@")),
            Expectation::LoggedIn,
        )
        .depends_on(ScenarioId("register.create"))
        .depends_on(ScenarioId("register.create"));

        assert_eq!(scenario.depends_on.len(), 1);
        assert_eq!(scenario.action.endpoint(), Endpoint::Login);
        assert_eq!(scenario.action.method(), Method::POST);
    }
}
