//! Registration scenarios
//!
//! Covers the successful registration that seeds the run, duplicate and
//! invalid email rejection, missing mandatory fields and field format
//! violations. Format violations are sent UTF-16 encoded.

use super::identity::{Identity, DEFAULT_PASSWORD};
use super::REGISTER_CREATE;
use crate::http::BodyEncoding;
use crate::models::{Action, Expectation, RegistrationRequest, Scenario, ScenarioGroup};

const USERNAME_LENGTH: &str = "Username must be between 5 and 8 characters";

pub fn scenarios(identity: &Identity) -> Vec<Scenario> {
    let mut scenarios = vec![Scenario::new(
        REGISTER_CREATE.as_str(),
        ScenarioGroup::Registration,
        "register the generated user",
        register(identity.registration(), BodyEncoding::Utf8),
        Expectation::Registered(identity.registration()),
    )];

    scenarios.extend(conflicts(identity));
    scenarios.extend(missing_fields());
    scenarios.extend(format_violations(identity));
    scenarios
}

fn register(request: RegistrationRequest, encoding: BodyEncoding) -> Action {
    Action::Register { request, encoding }
}

fn filler(username: impl Into<String>, email: impl Into<String>) -> RegistrationRequest {
    RegistrationRequest::new(username, DEFAULT_PASSWORD, email, "testFirstName")
        .last_name("testLastName")
        .middle_name("testMiddleName")
}

/// Second registrations colliding with the generated user
fn conflicts(identity: &Identity) -> Vec<Scenario> {
    let sibling = identity.sibling_username();

    vec![
        Scenario::new(
            "register.duplicate_username",
            ScenarioGroup::Registration,
            "same username twice",
            register(
                filler(&identity.username, &identity.email),
                BodyEncoding::Utf8,
            ),
            Expectation::error(400, "Username already exists"),
        )
        .depends_on(REGISTER_CREATE),
        Scenario::new(
            "register.duplicate_email",
            ScenarioGroup::Registration,
            "new username with an already registered email",
            register(filler(&sibling, &identity.email), BodyEncoding::Utf8),
            Expectation::error(400, "Email already exists"),
        )
        .depends_on(REGISTER_CREATE),
        Scenario::new(
            "register.invalid_email",
            ScenarioGroup::Registration,
            "email without @",
            register(filler(&sibling, "123.com"), BodyEncoding::Utf8),
            Expectation::error(400, "Invalid email format"),
        )
        .depends_on(REGISTER_CREATE),
    ]
}

/// Raw bodies each omitting one mandatory field
fn missing_fields() -> Vec<Scenario> {
    const NOTE: &str = "firstName is mandatory in the request model but never reported \
                        missing; omitting an optional name makes the service answer with \
                        an HTML 400 page instead of a JSON error";

    let cases: [(&'static str, &'static str, &str); 3] = [
        (
            "register.missing_username",
            "username",
            r#"{
    "password": "Password1@",
    "email": "test1@gmail.com",
    "firstName": "test",
    "lastName": "test3",
    "middleName": "test4"
}"#,
        ),
        (
            "register.missing_password",
            "password",
            r#"{
    "username": "testUs10",
    "email": "test1@gmail.com",
    "firstName": "test",
    "lastName": "test3",
    "middleName": "test4"
}"#,
        ),
        (
            "register.missing_email",
            "email",
            r#"{
    "username": "testUs10",
    "password": "Password1@",
    "firstName": "test",
    "lastName": "test3",
    "middleName": "test4"
}"#,
        ),
    ];

    cases
        .into_iter()
        .map(|(id, field, body)| {
            Scenario::new(
                id,
                ScenarioGroup::Registration,
                format!("body without {field}"),
                Action::RegisterRaw {
                    body: body.to_string(),
                },
                Expectation::error(400, format!("Missing required fields: {field}")),
            )
            .known_issue(NOTE)
        })
        .collect()
}

/// Username, password and email format checks, in the service's precedence order
fn format_violations(identity: &Identity) -> Vec<Scenario> {
    let blank = |username: &str, password: &str| {
        RegistrationRequest::new(username, password, "", "")
            .last_name("")
            .middle_name("")
    };

    let literal: [(&'static str, &str, &str, &str); 7] = [
        ("register.username_empty", "empty username", "", USERNAME_LENGTH),
        ("register.username_too_short", "single character username", "你", USERNAME_LENGTH),
        (
            "register.username_too_long",
            "13 character username",
            ",%^$^&^#$%@$%",
            USERNAME_LENGTH,
        ),
        (
            "register.password_too_short",
            "4 character password",
            "pass",
            "Password must be at least 6 characters long",
        ),
        (
            "register.password_no_uppercase",
            "password without uppercase letter",
            "password",
            "Password must contain at least one uppercase letter",
        ),
        (
            "register.password_no_digit",
            "password without digit",
            "Password",
            "Password must contain at least one number",
        ),
        (
            "register.password_no_special",
            "password without special character",
            "Password1",
            "Password must contain at least one special character",
        ),
    ];

    let mut scenarios: Vec<Scenario> = literal
        .into_iter()
        .map(|(id, description, value, message)| {
            // username cases leave the password empty; password cases use a valid username
            let request = if message == USERNAME_LENGTH {
                blank(value, "")
            } else {
                blank("testUser", value)
            };
            Scenario::new(
                id,
                ScenarioGroup::Registration,
                description,
                register(request, BodyEncoding::Utf16),
                Expectation::error(400, message),
            )
        })
        .collect();

    let taken = RegistrationRequest::new(&identity.username, DEFAULT_PASSWORD, &identity.email, "")
        .last_name("")
        .middle_name("");
    let bad_email = RegistrationRequest::new(&identity.username, DEFAULT_PASSWORD, "123@com", "")
        .last_name("")
        .middle_name("");

    scenarios.push(
        Scenario::new(
            "register.username_taken",
            ScenarioGroup::Registration,
            "well-formed fields with the registered username",
            register(taken, BodyEncoding::Utf16),
            Expectation::error(400, "Username already exists"),
        )
        .depends_on(REGISTER_CREATE),
    );
    scenarios.push(
        Scenario::new(
            "register.email_without_domain_dot",
            ScenarioGroup::Registration,
            "registered username with email 123@com",
            register(bad_email, BodyEncoding::Utf16),
            Expectation::error(400, "Invalid email format"),
        )
        .depends_on(REGISTER_CREATE),
    );

    scenarios
}
