//! Configuration types for listing APIs
//!
//! An API is described in YAML: where it lives, how to talk to it, and
//! which resources can be listed.
//!
//! ```yaml
//! base_url: "https://www.googleapis.com/youtube/v3"
//! query:
//!   key: "..."
//! resources:
//!   playlistItems:
//!     path: "/playlistItems"
//!     defaults:
//!       part: "snippet,contentDetails"
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_RETRY_AFTER_SECS};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level API Config
// ============================================================================

/// Complete API configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for API requests
    pub base_url: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Query parameters sent with every request
    #[serde(default)]
    pub query: BTreeMap<String, String>,

    /// Listable resources by name
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl ApiConfig {
    /// Check the base URL and every resource definition
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }

        for (name, resource) in &self.resources {
            if resource.path.trim().is_empty() {
                return Err(Error::config(format!("resource '{name}' has an empty path")));
            }
        }
        Ok(())
    }

    /// Look up a resource by name
    pub fn resource(&self, name: &str) -> Result<&ResourceConfig> {
        self.resources.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.resources.keys().map(String::as_str).collect();
            Error::config(format!(
                "Resource '{name}' not configured. Known resources: {}",
                known.join(", ")
            ))
        })
    }

    /// Build the HTTP client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            )
            .default_retry_after(Duration::from_secs(self.http.default_retry_after_seconds));

        builder = match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        for (key, value) in &self.query {
            builder = builder.query(key, value);
        }
        builder.build()
    }
}

// ============================================================================
// Resource Config
// ============================================================================

/// Operations a resource supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Fetch the first page
    List,
    /// Fetch a page from a continuation token
    ListNext,
}

/// A listable resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Path relative to the base URL
    pub path: String,

    /// Supported operations
    #[serde(default = "default_operations")]
    pub operations: Vec<Operation>,

    /// Parameters sent unless the caller overrides them
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl ResourceConfig {
    /// Create a resource supporting both list operations
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            operations: default_operations(),
            defaults: BTreeMap::new(),
        }
    }

    /// Check if an operation is supported
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }
}

fn default_operations() -> Vec<Operation> {
    vec![Operation::List, Operation::ListNext]
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of transport retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Seconds to wait after a 429 without a `retry-after` header
    #[serde(default = "default_retry_after")]
    pub default_retry_after_seconds: u64,

    /// Rate limiting configuration; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            default_retry_after_seconds: default_retry_after(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_after() -> u64 {
    DEFAULT_RETRY_AFTER_SECS
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Loader Functions
// ============================================================================

/// Load and validate an API configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ApiConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;
    load_config_from_str(&content)
}

/// Load and validate an API configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ApiConfig> {
    let config: ApiConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
