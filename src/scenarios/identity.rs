//! Generated test user
//!
//! Each run registers a fresh user so duplicate checks have something to
//! collide with.

use crate::models::{LoginRequest, RegistrationRequest};

pub const DEFAULT_PASSWORD: &str = "Password1@";

/// Credentials and profile of the user registered by one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

impl Identity {
    /// `test` followed by a number below 1000; always 5 to 7 characters
    pub fn generate() -> Self {
        let suffix = rand::random::<u32>() % 1000;
        Self::with_username(format!("test{suffix}"))
    }

    pub fn with_username(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            email: format!("{username}@mail.com"),
            username,
            password: DEFAULT_PASSWORD.to_string(),
            first_name: "John".to_string(),
            middle_name: "Sarah".to_string(),
            last_name: "Connor".to_string(),
        }
    }

    pub fn registration(&self) -> RegistrationRequest {
        RegistrationRequest::new(
            &self.username,
            &self.password,
            &self.email,
            &self.first_name,
        )
        .last_name(&self.last_name)
        .middle_name(&self.middle_name)
    }

    pub fn login(&self) -> LoginRequest {
        LoginRequest::new(&self.username, &self.password)
    }

    /// Username that differs from the registered one but shares its prefix
    pub fn sibling_username(&self) -> String {
        format!("{}1", self.username)
    }
}
