//! Client configuration
//!
//! Resolved once at process start and immutable after the client is built.

use crate::environment::ExecutionEnvironment;
use crate::types::{ApiError, ApiResult};
use std::env;
use std::time::Duration;
use url::Url;

/// Port the API server listens on when none is configured
pub const DEFAULT_PORT: u16 = 3000;

/// Request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for TLS
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub min_tls_version: Option<reqwest::tls::Version>,
    pub cert_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_tls_version: Some(reqwest::tls::Version::TLS_1_2),
            cert_verification: true,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service port, used only for the server-side loopback base URL
    pub port: u16,
    /// Whether this process renders on the server or acts as the browser
    pub environment: ExecutionEnvironment,
    /// Origin the path-relative browser base URL is resolved against
    pub origin: Option<Url>,
    pub timeout: Duration,
    pub tls: TlsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: ExecutionEnvironment::default(),
            origin: None,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for server-side rendering against the local API port
    pub fn server(port: u16) -> Self {
        Self {
            port,
            environment: ExecutionEnvironment::Server,
            ..Self::default()
        }
    }

    /// Configuration for browser execution against the given origin
    pub fn browser(origin: &str) -> ApiResult<Self> {
        Ok(Self {
            environment: ExecutionEnvironment::Browser,
            origin: Some(parse_origin(origin)?),
            ..Self::default()
        })
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `PORT`: service port for the server-side base URL
    /// - `CMS_EXECUTION_CONTEXT`: `server` or `browser`
    /// - `CMS_ORIGIN`: origin used for browser execution
    /// - `CMS_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let environment = match env::var("CMS_EXECUTION_CONTEXT") {
            Ok(raw) => raw.parse()?,
            Err(_) => ExecutionEnvironment::default(),
        };

        let origin = env::var("CMS_ORIGIN")
            .ok()
            .map(|raw| parse_origin(&raw))
            .transpose()?;

        let timeout = match env::var("CMS_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map(Duration::from_secs).map_err(|_| {
                ApiError::Config(format!("CMS_TIMEOUT_SECS is not a valid number of seconds: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        let config = Self {
            port,
            environment,
            origin,
            timeout,
            tls: TlsConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_origin(mut self, origin: &str) -> ApiResult<Self> {
        self.origin = Some(parse_origin(origin)?);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.port == 0 {
            return Err(ApiError::Config("port must be greater than 0".into()));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than 0".into()));
        }
        if self.environment == ExecutionEnvironment::Browser && self.origin.is_none() {
            return Err(ApiError::Config(
                "browser execution requires an origin to resolve /api/ against".into(),
            ));
        }
        Ok(())
    }
}

fn parse_origin(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("invalid origin {:?}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("origin {:?} cannot be a base URL", raw)));
    }
    Ok(url)
}
