//! Request construction
//!
//! Turns an endpoint of the configured service plus an optional payload into
//! an [`HttpRequest`] descriptor.

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method, Url,
};
use serde::Serialize;

use super::client::HttpRequest;
use crate::config::{Endpoint, ServiceConfig};
use crate::error::{SuiteError, SuiteResult};

/// Character encoding of a JSON body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    #[default]
    Utf8,
    /// Big-endian with a byte-order mark; produces a malformed request on purpose
    Utf16,
}

impl BodyEncoding {
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            BodyEncoding::Utf8 => text.as_bytes().to_vec(),
            BodyEncoding::Utf16 => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                bytes.extend_from_slice(&[0xFE, 0xFF]);
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
                bytes
            }
        }
    }
}

/// Builder for requests against one configured service
#[derive(Clone, Debug)]
pub struct RequestBuilder<'a> {
    config: &'a ServiceConfig,
    method: Method,
    endpoint: Endpoint,
    segment: Option<String>,
    body: Option<String>,
    encoding: BodyEncoding,
    headers: Vec<(String, String)>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ServiceConfig, method: Method, endpoint: Endpoint) -> Self {
        Self {
            config,
            method,
            endpoint,
            segment: None,
            body: None,
            encoding: BodyEncoding::Utf8,
            headers: Vec::new(),
        }
    }

    /// Append a path segment after the endpoint path, e.g. a user id
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segment = Some(segment.to_string());
        self
    }

    /// Serialize a payload as the JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> SuiteResult<Self> {
        let body =
            serde_json::to_string(payload).map_err(|e| SuiteError::Encoding(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    /// Use pre-serialized JSON text as the body
    pub fn raw_json(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Compose `http://host:port/<path>[/<segment>]`
    pub fn url(&self) -> SuiteResult<Url> {
        let base = format!("{}/", self.config.base_url());
        let mut url = Url::parse(&base).map_err(|e| {
            SuiteError::Configuration(format!("invalid service address {base}: {e}"))
        })?;

        let path = self.config.path(self.endpoint).trim_matches('/');
        let full_path = match &self.segment {
            Some(segment) => format!("/{path}/{segment}"),
            None => format!("/{path}"),
        };
        url.set_path(&full_path);

        Ok(url)
    }

    pub fn build(self) -> SuiteResult<HttpRequest> {
        let url = self.url()?;

        let mut headers = HeaderMap::new();
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| SuiteError::Encoding(format!("invalid header name {key:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SuiteError::Encoding(format!("invalid value for header {key}: {e}")))?;
            headers.insert(name, value);
        }

        let body = self.body.as_deref().map(|text| self.encoding.encode(text));

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginRequest, RegistrationRequest};
    use reqwest::header::AUTHORIZATION;
    use serde::ser::Error as _;

    #[test]
    fn test_get_without_body() {
        let config = ServiceConfig::example();
        let request = RequestBuilder::new(&config, Method::GET, Endpoint::Health)
            .build()
            .unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "http://localhost:5000/health");
        assert!(request.body.is_none());
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_post_json_sets_content_type() {
        let config = ServiceConfig::example();
        let login = LoginRequest::new("test42", "Password1@");
        let request = RequestBuilder::new(&config, Method::POST, Endpoint::Login)
            .json(&login)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url.as_str(), "http://localhost:5000/login");
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body: LoginRequest = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, login);
    }

    #[test]
    fn test_user_segment_and_authorization() {
        let mut config = ServiceConfig::example();
        config.endpoints.user = "/user/".to_string();

        let request = RequestBuilder::new(&config, Method::GET, Endpoint::User)
            .segment(17)
            .header("Authorization", "abc")
            .build()
            .unwrap();

        assert_eq!(request.url.as_str(), "http://localhost:5000/user/17");
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "abc");
    }

    #[test]
    fn test_utf16_body_has_bom_and_two_bytes_per_unit() {
        let config = ServiceConfig::example();
        let registration = RegistrationRequest::new("你", "", "", "");
        let json = serde_json::to_string(&registration).unwrap();

        let request = RequestBuilder::new(&config, Method::POST, Endpoint::Register)
            .json(&registration)
            .unwrap()
            .encoding(BodyEncoding::Utf16)
            .build()
            .unwrap();

        let body = request.body.unwrap();
        assert_eq!(&body[..2], &[0xFE, 0xFF]);
        assert_eq!(body.len(), 2 + json.encode_utf16().count() * 2);
        assert_eq!(&body[2..4], &[0x00, b'{']);
    }

    #[test]
    fn test_invalid_header_is_encoding_error() {
        let config = ServiceConfig::example();
        let err = RequestBuilder::new(&config, Method::GET, Endpoint::User)
            .header("Authorization", "line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, SuiteError::Encoding(_)));
    }

    #[test]
    fn test_unserializable_payload_is_encoding_error() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("refusing to serialize"))
            }
        }

        let config = ServiceConfig::example();
        let err = RequestBuilder::new(&config, Method::POST, Endpoint::Register)
            .json(&Broken)
            .unwrap_err();
        assert!(matches!(err, SuiteError::Encoding(ref m) if m.contains("refusing")));
    }
}
