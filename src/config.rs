//! Configuration management for gql-fetch.
//!
//! Handles loading the endpoint configuration from a TOML file and
//! environment variables. The result is built once at start-up and handed
//! to the executor by reference.

use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Environment variable selecting the runtime mode.
pub const ENV_MODE: &str = "GQL_FETCH_ENV";
/// Environment variable holding the host part of an absolute endpoint URL.
pub const ENV_HOST_URI: &str = "GQL_FETCH_HOST_URI";
/// Environment variable holding the endpoint path.
pub const ENV_ENDPOINT: &str = "GQL_FETCH_ENDPOINT";
/// Environment variable holding the `user:password` Basic credential.
pub const ENV_AUTHORIZATION: &str = "GQL_FETCH_AUTHORIZATION";

/// Runtime mode of the process.
///
/// Development uses the endpoint as a relative URL and relies on an external
/// proxy to route it; every other mode uses an absolute URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuntimeMode {
    /// Local development behind a proxy.
    Development,
    /// Any other deployment context.
    #[default]
    Other,
}

impl RuntimeMode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Other => "other",
        }
    }

    /// Returns true for development mode.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for RuntimeMode {
    type Err = std::convert::Infallible;

    /// Anything other than "development" is treated as a non-development mode.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("development") {
            Ok(Self::Development)
        } else {
            Ok(Self::Other)
        }
    }
}

impl From<String> for RuntimeMode {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<RuntimeMode> for String {
    fn from(mode: RuntimeMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// GraphQL endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// Endpoint configuration: where queries go and how they authenticate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Runtime mode; `None` means no layer has set it yet.
    #[serde(default)]
    pub mode: Option<RuntimeMode>,

    /// Scheme and authority prepended to the endpoint outside development,
    /// e.g. `https://author.example.com`.
    pub host_uri: Option<String>,

    /// Endpoint path, e.g. `/content/graphql/global`.
    pub endpoint: Option<String>,

    /// Basic credential in `user:password` form (not recommended to store in config).
    pub authorization: Option<String>,
}

impl EndpointConfig {
    /// Creates a config for the given mode and endpoint parts.
    pub fn new(
        mode: RuntimeMode,
        host_uri: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            mode: Some(mode),
            host_uri: Some(host_uri.into()),
            endpoint: Some(endpoint.into()),
            authorization: None,
        }
    }

    /// Sets the Basic credential.
    pub fn with_authorization(mut self, credential: impl Into<String>) -> Self {
        self.authorization = Some(credential.into());
        self
    }

    /// Creates a config from a full endpoint URL.
    ///
    /// Format: `https://host[:port]/path[?query]`
    pub fn from_url(endpoint_url: &str) -> Result<Self> {
        let url = Url::parse(endpoint_url)
            .map_err(|e| FetchError::config(format!("Invalid endpoint URL: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| FetchError::config("Endpoint URL has no host"))?;

        let mut host_uri = format!("{}://{}", url.scheme(), host);
        if let Some(port) = url.port() {
            host_uri.push(':');
            host_uri.push_str(&port.to_string());
        }

        let mut endpoint = url.path().to_string();
        if let Some(query) = url.query() {
            endpoint.push('?');
            endpoint.push_str(query);
        }

        Ok(Self {
            mode: None,
            host_uri: Some(host_uri),
            endpoint: Some(endpoint),
            authorization: None,
        })
    }

    /// Effective runtime mode; unset resolves to `Other`.
    pub fn mode(&self) -> RuntimeMode {
        self.mode.unwrap_or_default()
    }

    /// Builds a config purely from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_defaults();
        config
    }

    /// Returns the credential if one is configured and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.authorization.as_deref().filter(|c| !c.is_empty())
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &EndpointConfig) {
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.host_uri.is_some() {
            self.host_uri = other.host_uri.clone();
        }
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint.clone();
        }
        if other.authorization.is_some() {
            self.authorization = other.authorization.clone();
        }
    }

    /// Applies environment variables (GQL_FETCH_ENV, GQL_FETCH_HOST_URI, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        if self.mode.is_none() {
            self.mode = std::env::var(ENV_MODE).ok().map(RuntimeMode::from);
        }
        if self.host_uri.is_none() {
            self.host_uri = std::env::var(ENV_HOST_URI).ok();
        }
        if self.endpoint.is_none() {
            self.endpoint = std::env::var(ENV_ENDPOINT).ok();
        }
        if self.authorization.is_none() {
            self.authorization = std::env::var(ENV_AUTHORIZATION).ok();
        }
    }

    /// Resolves the final config from its layers.
    ///
    /// `overrides` (command line) wins over `file`; environment variables
    /// only fill what neither layer set.
    pub fn resolve(file: EndpointConfig, overrides: &EndpointConfig) -> Self {
        let mut config = file;
        config.merge(overrides);
        config.apply_env_defaults();
        config
    }

    /// Returns a display-safe string (no credential) for log output.
    pub fn display_string(&self) -> String {
        let endpoint = self.endpoint.as_deref().unwrap_or("");
        let target = if self.mode().is_development() {
            endpoint.to_string()
        } else {
            format!("{}{}", self.host_uri.as_deref().unwrap_or(""), endpoint)
        };
        let auth = if self.credential().is_some() {
            " (basic auth)"
        } else {
            ""
        };
        format!("{target} [{}]{auth}", self.mode())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gql-fetch")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FetchError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            FetchError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
