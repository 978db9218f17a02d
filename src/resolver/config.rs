use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

// Defaults for outbound requests
pub const MAX_HOPS: usize = 10;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_PROBE_BYTES: usize = 64 * 1024;
pub const SHORTENER_ENDPOINT: &str = "http://tinyurl.com/api-create.php";
pub const USER_AGENT: &str = concat!("url-helper/", env!("CARGO_PKG_VERSION"));

/// Prefix for environment overrides, e.g. `URL_HELPER_MAX_HOPS=3`
pub const ENV_PREFIX: &str = "URL_HELPER";

/// Configuration shared by the HTTP collaborators
///
/// Every call performs a single blocking request bounded by these timeouts;
/// nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub request_timeout: Duration,   // Whole-request timeout
    pub connect_timeout: Duration,   // Timeout for establishing the connection
    pub max_hops: usize,             // Redirects followed before giving up
    pub user_agent: String,          // User-Agent header sent with every request
    pub shortener_endpoint: String,  // Endpoint taking the long URL as `url` query parameter
    pub max_probe_bytes: usize,      // Bytes read when sniffing an image
}

impl ResolverConfig {
    /// Creates a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whole-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum number of redirects to follow
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Sets the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the shortening service endpoint
    pub fn with_shortener_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.shortener_endpoint = endpoint.into();
        self
    }

    /// Sets how many bytes the image probe reads
    pub fn with_max_probe_bytes(mut self, max: usize) -> Self {
        self.max_probe_bytes = max;
        self
    }

    /// Loads the configuration from defaults, an optional file and the environment
    ///
    /// Later sources win: values from `URL_HELPER_*` variables override the
    /// file, which overrides the defaults. Timeouts are given in seconds
    /// (`request_timeout_secs`, `connect_timeout_secs`).
    ///
    /// # Arguments
    /// * `path` - Optional configuration file; its format follows the extension
    ///
    /// # Returns
    /// * `Result<ResolverConfig>` - The merged configuration or an error
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration file {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let overrides: ConfigOverrides = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration values")?;

        Ok(overrides.apply(Self::default()))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            request_timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECTION_TIMEOUT,
            max_hops: MAX_HOPS,
            user_agent: USER_AGENT.to_string(),
            shortener_endpoint: SHORTENER_ENDPOINT.to_string(),
            max_probe_bytes: MAX_PROBE_BYTES,
        }
    }
}

/// Optional values read by [`ResolverConfig::load`]
#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_hops: Option<usize>,
    user_agent: Option<String>,
    shortener_endpoint: Option<String>,
    max_probe_bytes: Option<usize>,
}

impl ConfigOverrides {
    fn apply(self, mut config: ResolverConfig) -> ResolverConfig {
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(max_hops) = self.max_hops {
            config.max_hops = max_hops;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(endpoint) = self.shortener_endpoint {
            config.shortener_endpoint = endpoint;
        }
        if let Some(max) = self.max_probe_bytes {
            config.max_probe_bytes = max;
        }
        config
    }
}
