//! Configuration file management
//!
//! Handles finding, loading, validating and writing the YAML file that
//! points the suite at a running service.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SuiteError, SuiteResult};

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./configuration.yaml",
    "./configuration.yml",
    "./resources/configuration.yaml",
    "~/.config/user-api-suite/configuration.yaml",
];

/// Logical endpoints exposed by the service under test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Register,
    Login,
    User,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::Register => "register",
            Endpoint::Login => "login",
            Endpoint::User => "user",
        }
    }

    pub fn all() -> [Endpoint; 4] {
        [
            Endpoint::Health,
            Endpoint::Register,
            Endpoint::Login,
            Endpoint::User,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Host the service listens on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Hostname or IP address, without scheme
    pub url: String,
    pub port: u16,
}

/// Path of every logical endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPaths {
    #[serde(alias = "health_status")]
    pub health: String,
    pub register: String,
    pub login: String,
    pub user: String,
}

/// Service under test
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: HostConfig,
    pub endpoints: EndpointPaths,

    /// Request timeout; the transport default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SuiteError::Configuration(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config = Self::from_yaml(&content).map_err(|e| match e {
            SuiteError::Configuration(msg) => {
                SuiteError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> SuiteResult<Self> {
        let mut config: Self = serde_yaml::from_str(content)
            .map_err(|e| SuiteError::Configuration(format!("failed to parse YAML: {e}")))?;

        config.host.url = normalize_host(&config.host.url);
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: impl AsRef<Path>) -> SuiteResult<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).map_err(|e| {
            SuiteError::Configuration(format!("failed to serialize config: {e}"))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SuiteError::Configuration(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        std::fs::write(path, content).map_err(|e| {
            SuiteError::Configuration(format!(
                "failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> SuiteResult<()> {
        if self.host.url.is_empty() || self.host.url.contains(char::is_whitespace) {
            return Err(SuiteError::Configuration(format!(
                "invalid host url: {:?}",
                self.host.url
            )));
        }

        if self.host.port == 0 {
            return Err(SuiteError::Configuration(
                "host port must be greater than 0".to_string(),
            ));
        }

        // host must be a bare name or address; a port or path in it would
        // redirect every request
        let base = self.base_url();
        let url = Url::parse(&base).map_err(|e| {
            SuiteError::Configuration(format!("invalid service address {base}: {e}"))
        })?;
        let host_matches = url
            .host_str()
            .is_some_and(|h| h.eq_ignore_ascii_case(&self.host.url));
        if !host_matches
            || url.port_or_known_default() != Some(self.host.port)
            || url.path() != "/"
        {
            return Err(SuiteError::Configuration(format!(
                "host {:?} must not carry a port, path or credentials",
                self.host.url
            )));
        }

        for endpoint in Endpoint::all() {
            if self.path(endpoint).trim_matches('/').trim().is_empty() {
                return Err(SuiteError::Configuration(format!(
                    "endpoint path for '{endpoint}' is empty"
                )));
            }
        }

        Ok(())
    }

    /// Override host and port, re-validating the result
    pub fn with_overrides(mut self, host: Option<&str>, port: Option<u16>) -> SuiteResult<Self> {
        if let Some(host) = host {
            self.host.url = normalize_host(host);
        }
        if let Some(port) = port {
            self.host.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    /// Configured path of an endpoint
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Health => &self.endpoints.health,
            Endpoint::Register => &self.endpoints.register,
            Endpoint::Login => &self.endpoints.login,
            Endpoint::User => &self.endpoints.user,
        }
    }

    /// Base URL of the service, e.g. `http://localhost:5000`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host.url, self.host.port)
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            host: HostConfig {
                url: "localhost".to_string(),
                port: 5000,
            },
            endpoints: EndpointPaths {
                health: "health".to_string(),
                register: "register".to_string(),
                login: "login".to_string(),
                user: "user".to_string(),
            },
            timeout_secs: None,
        }
    }
}

/// Strip a scheme prefix and trailing slashes from a host
fn normalize_host(url: &str) -> String {
    let url = url.trim();
    let url = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    url.trim_end_matches('/').to_string()
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
