//! HTTP client for the service under test
//!
//! Executes request descriptors in a single attempt. Transport failures are
//! reported as network errors and never retried.

use reqwest::{header::HeaderMap, Client, Method, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{SuiteError, SuiteResult};

/// HTTP client for scenarios
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout_secs: Option<u64>,
}

impl HttpClient {
    /// Create a client; the transport's default timeout applies unless one is configured
    pub fn from_config(config: &ServiceConfig) -> SuiteResult<Self> {
        let timeout_secs = config.timeout_secs;
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| SuiteError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Send HTTP request
    pub async fn send(&self, request: &HttpRequest) -> SuiteResult<HttpResponse> {
        debug!("Sending {} request to {}", request.method, request.url);

        let mut req_builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SuiteError::Network(match self.timeout_secs {
                    Some(secs) => format!("timeout after {secs} seconds: {}", request.url),
                    None => format!("timeout: {}", request.url),
                })
            } else if e.is_connect() {
                SuiteError::Network(format!("connection refused to {}", request.url))
            } else {
                SuiteError::Network(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| SuiteError::Network(format!("failed to read response body: {e}")))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );
        debug!("Response body: {}", body.trim_end());

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers,
            body,
            duration_ms,
        })
    }
}

/// Fully-formed request: method, URI, headers and encoded body
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// HTTP response; header names are lowercase
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Decode the body as JSON; an undecodable body is an assertion failure
    pub fn json<T: DeserializeOwned>(&self) -> SuiteResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            SuiteError::mismatch(
                "response body",
                format!("JSON ({e})"),
                self.body.trim_end(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginResponse;
    use reqwest::header::{HeaderValue, AUTHORIZATION};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: body.to_string(),
            duration_ms: 3,
        }
    }

    #[test]
    fn test_json_body_and_header_lookup() {
        let resp = response(200, "{\"message\":\"Login successful\",\"access-token\":\"t\"}");
        assert_eq!(resp.get_header("Content-Type"), Some("application/json"));
        let login: LoginResponse = resp.json().unwrap();
        assert_eq!(login.access_token.as_deref(), Some("t"));
    }

    #[test]
    fn test_undecodable_body_is_assertion_failure() {
        let resp = response(400, "<h1>Bad Request</h1>");
        let err = resp.json::<LoginResponse>().unwrap_err();
        assert!(err.is_assertion());
    }

    #[tokio::test]
    async fn test_send_passes_headers_and_reads_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/7"))
            .and(header("Authorization", "token-7"))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("X-Request-Id", "req-1")
                    .set_body_string("{\"error\":\"User not found\"}\n"),
            )
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("token-7"));
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse(&format!("{}/user/7", server.uri())).unwrap(),
            headers,
            body: None,
        };

        let client = HttpClient::from_config(&ServiceConfig::example()).unwrap();
        let resp = client.send(&request).await.unwrap();
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "{\"error\":\"User not found\"}\n");
        assert_eq!(resp.get_header("x-request-id"), Some("req-1"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = Url::parse(&format!("http://127.0.0.1:{port}/health")).unwrap();

        let request = HttpRequest {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        };

        let mut config = ServiceConfig::example();
        config.timeout_secs = Some(5);
        let err = HttpClient::from_config(&config)
            .unwrap()
            .send(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::Network(_)));
    }
}
