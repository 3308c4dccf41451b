//! Request and response payloads exchanged with the service
//!
//! JSON field names follow the service contract (camelCase, plus the
//! hyphenated `access-token`).

use serde::{Deserialize, Serialize};

/// Body of `POST register`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Mandatory in the request model even though the service never reports it missing
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: None,
            middle_name: None,
        }
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    /// Profile fields the service is expected to echo back
    pub fn profile(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("username", Some(self.username.as_str())),
            ("email", Some(self.email.as_str())),
            ("firstName", Some(self.first_name.as_str())),
            ("lastName", self.last_name.as_deref()),
            ("middleName", self.middle_name.as_deref()),
        ]
    }
}

/// Body returned by `POST register` and `GET user/{id}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Present only on successful registration
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
}

impl RegistrationResponse {
    /// Profile fields in the same order as [`RegistrationRequest::profile`]
    pub fn profile(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("username", self.username.as_deref()),
            ("email", self.email.as_deref()),
            ("firstName", self.first_name.as_deref()),
            ("lastName", self.last_name.as_deref()),
            ("middleName", self.middle_name.as_deref()),
        ]
    }
}

/// Body of `POST login`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: Option<String>,
    #[serde(rename = "access-token")]
    pub access_token: Option<String>,
}

/// Error body returned for every rejected request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Exact text the service sends: compact JSON plus a trailing newline
    pub fn render(message: &str) -> String {
        let body = serde_json::json!({ "error": message });
        format!("{body}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_json_keys() {
        let req = RegistrationRequest::new("test123", "Password1@", "test123@mail.com", "John")
            .last_name("Connor")
            .middle_name("Sarah");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Connor");
        assert_eq!(json["middleName"], "Sarah");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_optional_names_are_omitted() {
        let req = RegistrationRequest::new("testUser", "pass", "", "");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("lastName").is_none());
        assert!(json.get("middleName").is_none());
        assert_eq!(json["firstName"], "");
    }

    #[test]
    fn test_registration_response_tolerates_nulls() {
        let body = r#"{"id":42,"username":"test1","email":"test1@mail.com","firstName":"John","lastName":"Connor","middleName":null}"#;
        let resp: RegistrationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.id, Some(42));
        assert_eq!(resp.middle_name, None);
        assert_eq!(resp.profile()[2], ("firstName", Some("John")));
    }

    #[test]
    fn test_login_response_hyphenated_token() {
        let body = r#"{"message":"Login successful","access-token":"abc.def"}"#;
        let resp: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.message.as_deref(), Some("Login successful"));
        assert_eq!(resp.access_token.as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_error_body_render() {
        assert_eq!(
            ErrorBody::render("Invalid token"),
            "{\"error\":\"Invalid token\"}\n"
        );
    }
}
