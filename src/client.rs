// Core Client Implementation

use crate::classifier::ErrorClassifier;
use crate::config::{ClientConfig, TlsConfig};
use crate::environment::EnvironmentResolver;
use crate::middleware::{
    BaseUrlInterceptor, ErrorMiddleware, NotifyingErrorInterceptor, RequestMiddleware, ResponseMiddleware,
};
use crate::notifier::{LogNotifier, Notifier};
use crate::services::CategoryService;
use crate::types::*;
use crate::utils::payload::unwrap_payload;
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Executes a fully resolved request and returns the raw response.
///
/// Implementations return `Ok` for every HTTP response regardless of status
/// and `Err(ApiError::TransportFailure)` only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> ApiResult<RawResponse>;
}

/// Default transport backed by reqwest
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, tls_config: &TlsConfig) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(!tls_config.cert_verification);

        if let Some(version) = tls_config.min_tls_version {
            builder = builder.min_tls_version(version);
        }

        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> ApiResult<RawResponse> {
        let mut builder = self.http_client.request(request.method, request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        Ok(RawResponse { status, url, body })
    }
}

/// Shared API client.
///
/// Built once and immutable afterwards; clones share the same transport and
/// pipeline. No per-call state lives on the client.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    resolver: EnvironmentResolver,
    classifier: ErrorClassifier,
    transport: Arc<dyn Transport>,
    base_url_step: BaseUrlInterceptor,
    notify_step: Arc<NotifyingErrorInterceptor>,
    pub(crate) request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    pub(crate) response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
    pub(crate) error_middleware: Vec<Arc<dyn ErrorMiddleware>>,
}

impl ApiClient {
    /// Create a new client from a validated configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout, &config.tls)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client that dispatches through a custom transport
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let resolver = EnvironmentResolver::from_config(&config);
        let classifier = ErrorClassifier::new(config.environment);

        Self {
            config: Arc::new(config),
            resolver,
            classifier,
            transport: Arc::new(transport),
            base_url_step: BaseUrlInterceptor::new(resolver),
            notify_step: Arc::new(NotifyingErrorInterceptor::new(classifier, Arc::new(LogNotifier))),
            request_middleware: Vec::new(),
            response_middleware: Vec::new(),
            error_middleware: Vec::new(),
        }
    }

    /// Install the notifier that receives failures which must interrupt the user
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notify_step = Arc::new(NotifyingErrorInterceptor::new(self.classifier, Arc::new(notifier)));
        self
    }

    /// Add a step that runs after the base URL has been applied
    pub fn add_request_middleware(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request_middleware.push(Arc::new(middleware));
        self
    }

    /// Add a step that processes unwrapped payloads of successful responses
    pub fn add_response_middleware(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response_middleware.push(Arc::new(middleware));
        self
    }

    /// Add a side-effect step that runs after the notifier on failures
    pub fn add_error_middleware(mut self, middleware: impl ErrorMiddleware + 'static) -> Self {
        self.error_middleware.push(Arc::new(middleware));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Façade for category resources
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(Arc::new(self.clone()))
    }

    // Pipeline order is fixed: base URL first, then registered steps.
    fn request_steps(&self) -> impl Iterator<Item = &dyn RequestMiddleware> {
        std::iter::once(&self.base_url_step as &dyn RequestMiddleware)
            .chain(self.request_middleware.iter().map(|m| m.as_ref() as &dyn RequestMiddleware))
    }

    // Notifier first, then registered steps.
    fn error_steps(&self) -> impl Iterator<Item = &dyn ErrorMiddleware> {
        std::iter::once(self.notify_step.as_ref() as &dyn ErrorMiddleware)
            .chain(self.error_middleware.iter().map(|m| m.as_ref() as &dyn ErrorMiddleware))
    }

    /// Join base URL, path and query parameters into the request URL
    fn resolve_url(&self, context: &RequestContext) -> ApiResult<Url> {
        let base = context
            .base_url
            .as_deref()
            .ok_or_else(|| ApiError::Config("base URL was not applied to the request".into()))?;

        let base = match Url::parse(base) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self.config.origin.as_ref().ok_or_else(|| {
                    ApiError::Config(format!("cannot resolve relative base URL {:?} without an origin", base))
                })?;
                origin
                    .join(base)
                    .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {}", base, e)))?
            }
            Err(e) => return Err(ApiError::Config(format!("invalid base URL {:?}: {}", base, e))),
        };

        let mut url = base
            .join(context.path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidParameter(format!("invalid path {:?}: {}", context.path, e)))?;

        if !context.params.is_empty() {
            url.query_pairs_mut().extend_pairs(context.params.iter());
        }

        Ok(url)
    }

    /// Dispatch and map the raw response to a payload or an `HttpError`
    async fn dispatch(&self, context: &RequestContext, url: Url) -> ApiResult<Value> {
        let request = PreparedRequest {
            method: context.method.clone(),
            url,
            body: context.body.clone(),
        };

        let response = self.transport.execute(request).await?;
        if !response.has_valid_status() {
            return Err(ApiError::transport_failure(
                format!("no valid HTTP response (status {})", response.status),
                response.url,
                None::<reqwest::Error>,
                Some(concat!(file!(), ":", line!())),
            ));
        }
        let payload = unwrap_payload(&response.body);

        if response.is_success() {
            Ok(payload)
        } else {
            Err(ApiError::http_error(
                response.status,
                payload,
                response.url,
                context.request_name.clone(),
            ))
        }
    }

    /// Run a request through the pipeline and return the unwrapped payload.
    ///
    /// Every failure is returned to the caller; notification is an additional
    /// side effect decided by the classifier.
    pub async fn request_value(&self, context: RequestContext) -> ApiResult<Value> {
        let mut context = context;
        for step in self.request_steps() {
            context = step.process_request(context).await?;
        }

        let url = self.resolve_url(&context)?;
        context.resolved_url = Some(url.to_string());
        debug!(method = %context.method, url = %url, "dispatching request");

        match self.dispatch(&context, url).await {
            Ok(mut payload) => {
                for step in &self.response_middleware {
                    payload = step.process_response(payload).await?;
                }
                Ok(payload)
            }
            Err(error) => {
                debug!(error = %error, "request failed");
                for step in self.error_steps() {
                    step.process_error(&error, &context).await;
                }
                Err(error)
            }
        }
    }

    /// Run a request and deserialize the payload into `T`
    pub async fn request<T: DeserializeOwned>(&self, context: RequestContext) -> ApiResult<T> {
        let payload = self.request_value(context).await?;
        T::deserialize(&payload).map_err(|e| {
            ApiError::parse_error(
                format!("Failed to parse payload: {}", e),
                Some(payload.to_string()),
                Some(e),
                Some(concat!(file!(), ":", line!())),
            )
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> ApiResult<T> {
        self.request(RequestContext::get(path)).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: impl Into<String>, params: &[(&str, &str)]) -> ApiResult<T> {
        let context = params
            .iter()
            .fold(RequestContext::post(path), |ctx, (k, v)| ctx.param(*k, *v));
        self.request(context).await
    }
}
