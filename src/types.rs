// Core types and errors

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use std::pin::Pin;
use std::future::Future;
use std::sync::Arc;

/// The result type used throughout the SDK
pub type ApiResult<T> = Result<T, ApiError>;

/// Type alias for future returning a deserialized payload
pub type JsonFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// Convert reqwest::Error to our ApiError
///
/// reqwest only reports an error when no HTTP response could be obtained
/// (the transport never turns a status code into an error), so every
/// conversion lands in `TransportFailure`.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        ApiError::TransportFailure {
            message: err.to_string(),
            url,
            location: None,
            source: Some(Arc::new(err) as Arc<dyn std::error::Error + Send + Sync>),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError {
            message: err.to_string(),
            source_text: None,
            location: None,
            source: Some(Arc::new(err) as Arc<dyn std::error::Error + Send + Sync>),
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout).
    #[error("Request failed without a response: {message}")]
    TransportFailure {
        message: String,
        url: String,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered with a non-2xx status.
    #[error("API returned error: {status} for {url}")]
    HttpError {
        status: u16,
        /// Server-provided body, unwrapped the same way as a success payload
        body: Value,
        url: String,
        request_name: Option<String>,
    },

    #[error("Failed to parse API response: {message}")]
    ParseError {
        message: String,
        source_text: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Domain reading of an HTTP failure status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    /// 400
    ValidationError,
    /// 404
    NotFound,
    /// 409, a concurrent edit invalidated the caller's view
    Conflict,
    Other,
}

impl HttpErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => HttpErrorKind::ValidationError,
            404 => HttpErrorKind::NotFound,
            409 => HttpErrorKind::Conflict,
            _ => HttpErrorKind::Other,
        }
    }
}

// Implementation of helper methods for ApiError
impl ApiError {
    pub fn transport_failure<T: Into<String>>(
        message: T,
        url: impl Into<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::TransportFailure {
            message: message.into(),
            url: url.into(),
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };

        if let Some(loc) = &error.location() {
            log::error!("{} at {}", error, loc);
        } else {
            log::error!("{}", error);
        }

        error
    }

    pub fn parse_error<T: Into<String>>(
        message: T,
        source_text: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::ParseError {
            message: message.into(),
            source_text,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };

        if let Some(loc) = &error.location() {
            log::error!("{} at {}", error, loc);
        } else {
            log::error!("{}", error);
        }

        error
    }

    pub fn http_error(status: u16, body: Value, url: impl Into<String>, request_name: Option<String>) -> Self {
        Self::HttpError {
            status,
            body,
            url: url.into(),
            request_name,
        }
    }

    /// HTTP status of the failed response, absent for transport-level failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        self.status().map(HttpErrorKind::from_status)
    }

    pub fn is_not_found(&self) -> bool {
        self.http_kind() == Some(HttpErrorKind::NotFound)
    }

    pub fn is_validation_error(&self) -> bool {
        self.http_kind() == Some(HttpErrorKind::ValidationError)
    }

    pub fn is_conflict(&self) -> bool {
        self.http_kind() == Some(HttpErrorKind::Conflict)
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure { .. })
    }

    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::HttpError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// URL the failed request was sent to, when the failure carries one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::HttpError { url, .. } => Some(url),
            Self::TransportFailure { url, .. } if !url.is_empty() => Some(url),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::TransportFailure { location, .. } => location.as_deref(),
            Self::ParseError { location, .. } => location.as_deref(),
            _ => None,
        }
    }

    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            Self::TransportFailure { source, .. } => source.as_ref().map(|s| s.as_ref()),
            Self::ParseError { source, .. } => source.as_ref().map(|s| s.as_ref()),
            _ => None,
        }
    }
}

/// Per-call options a caller can attach to a façade operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Human-readable label used in notification messages
    pub request_name: Option<String>,
    /// Statuses that bypass the global notifier for this call
    pub skip_error_codes: Option<Vec<u16>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    pub fn skip_error_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.skip_error_codes = Some(codes.into_iter().collect());
        self
    }
}

/// Configuration attached to a single outgoing request.
///
/// Built by a façade per call. The client fills `base_url` through its
/// request pipeline and `resolved_url` right before dispatch.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Path relative to the API root, e.g. `category/42`
    pub path: String,
    pub method: Method,
    /// Query parameters, sent in order
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub request_name: Option<String>,
    pub skip_error_codes: Option<Vec<u16>>,
    pub base_url: Option<String>,
    pub resolved_url: Option<String>,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            params: Vec::new(),
            body: None,
            request_name: None,
            skip_error_codes: None,
            base_url: None,
            resolved_url: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn request_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    pub fn skip_error_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.skip_error_codes = Some(codes.into_iter().collect());
        self
    }

    /// Overlay caller options; a caller-supplied name wins over the façade default
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        if options.request_name.is_some() {
            self.request_name = options.request_name;
        }
        if options.skip_error_codes.is_some() {
            self.skip_error_codes = options.skip_error_codes;
        }
        self
    }

    pub fn skips_status(&self, status: u16) -> bool {
        self.skip_error_codes
            .as_ref()
            .map_or(false, |codes| codes.contains(&status))
    }
}

/// Fully resolved request handed to a transport
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: url::Url,
    pub body: Option<Value>,
}

/// Raw HTTP response as returned by a transport, before unwrapping
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL of the response (after redirects)
    pub url: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A status outside 100..=599 means no HTTP response was received
    pub fn has_valid_status(&self) -> bool {
        (100..=599).contains(&self.status)
    }
}
