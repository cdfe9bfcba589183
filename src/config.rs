use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_HOST: &str = "http://34.67.4.17:8080";
pub const DEFAULT_API_PATH: &str = "/api/v1/chat";

/// Environment variable that replaces the composed host + path URL.
pub const OVERRIDE_ENV: &str = "ALERT_API_URL";

/// Optional `~/.alertgen/config.toml`. Only ever read.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct AlertgenConfig {
    pub host: Option<String>,
    pub path: Option<String>,
    pub output: Option<String>,
}

impl AlertgenConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            let content = std::fs::read_to_string(path).unwrap_or_default();
            toml::from_str(&content).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".alertgen")
            .join("config.toml")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub host: String,
    pub path: String,
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Plain concatenation; no separator is inserted or removed.
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST, DEFAULT_API_PATH)
    }
}

/// Picks the URL to call. A non-empty override wins verbatim, then the
/// current fields, then the defaults.
pub fn resolve_endpoint(override_url: Option<&str>, fields: Option<&EndpointConfig>) -> String {
    if let Some(url) = override_url.filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    match fields {
        Some(fields) => fields.url(),
        None => EndpointConfig::default().url(),
    }
}

/// Reads the override variable. Unset and empty are the same thing.
pub fn endpoint_override() -> Option<String> {
    normalize_override(std::env::var(OVERRIDE_ENV).ok())
}

fn normalize_override(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// State owned by the interaction layer and handed to the dispatcher.
#[derive(Debug, Default)]
pub struct Session {
    override_url: Option<String>,
    endpoint: Option<EndpointConfig>,
    last_url: Option<String>,
}

impl Session {
    pub fn new(override_url: Option<String>) -> Self {
        Self {
            override_url: normalize_override(override_url),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: EndpointConfig) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn override_url(&self) -> Option<&str> {
        self.override_url.as_deref()
    }

    /// Current host/path fields, initialized to the defaults on first access.
    pub fn endpoint(&mut self) -> &EndpointConfig {
        self.endpoint.get_or_insert_with(EndpointConfig::default)
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.endpoint.get_or_insert_with(EndpointConfig::default).host = host.into();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.endpoint.get_or_insert_with(EndpointConfig::default).path = path.into();
    }

    pub fn resolve_url(&mut self) -> String {
        self.endpoint();
        resolve_endpoint(self.override_url.as_deref(), self.endpoint.as_ref())
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn record_url(&mut self, url: impl Into<String>) {
        self.last_url = Some(url.into());
    }
}
