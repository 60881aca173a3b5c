//! Execution environment and base-URL resolution.
//!
//! A server-rendering process cannot reach itself through the public address,
//! so it talks to the API over loopback on the configured port. A browser
//! uses a path-relative root and lets the current origin supply the host.

use crate::config::ClientConfig;
use crate::types::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path of the API root, shared by both environments
pub const API_ROOT: &str = "/api/";

/// Where the code is executing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionEnvironment {
    /// Server-side page generation; no interactive UI
    #[default]
    Server,
    /// Interactive browser context
    Browser,
}

impl ExecutionEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for ExecutionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionEnvironment {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" | "ssr" => Ok(Self::Server),
            "browser" | "client" => Ok(Self::Browser),
            other => Err(ApiError::Config(format!(
                "unknown execution context {:?}, expected \"server\" or \"browser\"",
                other
            ))),
        }
    }
}

/// Resolves the API base URL for the current execution environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentResolver {
    environment: ExecutionEnvironment,
    port: u16,
}

impl EnvironmentResolver {
    pub fn new(environment: ExecutionEnvironment, port: u16) -> Self {
        Self { environment, port }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.environment, config.port)
    }

    pub fn environment(&self) -> ExecutionEnvironment {
        self.environment
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_server_execution(&self) -> bool {
        self.environment == ExecutionEnvironment::Server
    }

    /// `http://localhost:<port>/api/` on the server, `/api/` in the browser
    pub fn resolve_base_url(&self) -> String {
        match self.environment {
            ExecutionEnvironment::Server => format!("http://localhost:{}{}", self.port, API_ROOT),
            ExecutionEnvironment::Browser => API_ROOT.to_string(),
        }
    }
}
