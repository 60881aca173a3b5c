// Interceptor pipeline steps

use crate::classifier::ErrorClassifier;
use crate::environment::EnvironmentResolver;
use crate::notifier::{Notification, Notifier};
use crate::types::*;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    /// Process and possibly modify the request context before dispatch
    async fn process_request(&self, request: RequestContext) -> ApiResult<RequestContext>;
}

#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    /// Process and possibly modify the unwrapped payload of a successful response
    async fn process_response(&self, payload: Value) -> ApiResult<Value>;
}

/// Side-effect step run on every failed call.
///
/// Steps only observe the failure; the client returns it to the caller afterwards.
#[async_trait]
pub trait ErrorMiddleware: Send + Sync {
    async fn process_error(&self, error: &ApiError, context: &RequestContext);
}

/// Sets the base URL of every outgoing request
#[derive(Debug, Clone, Copy)]
pub struct BaseUrlInterceptor {
    resolver: EnvironmentResolver,
}

impl BaseUrlInterceptor {
    pub fn new(resolver: EnvironmentResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl RequestMiddleware for BaseUrlInterceptor {
    async fn process_request(&self, mut request: RequestContext) -> ApiResult<RequestContext> {
        request.base_url = Some(self.resolver.resolve_base_url());
        Ok(request)
    }
}

/// Routes failures the classifier marks for notification to the notifier
#[derive(Clone)]
pub struct NotifyingErrorInterceptor {
    classifier: ErrorClassifier,
    notifier: Arc<dyn Notifier>,
}

impl NotifyingErrorInterceptor {
    pub fn new(classifier: ErrorClassifier, notifier: Arc<dyn Notifier>) -> Self {
        Self { classifier, notifier }
    }
}

#[async_trait]
impl ErrorMiddleware for NotifyingErrorInterceptor {
    async fn process_error(&self, error: &ApiError, context: &RequestContext) {
        let classification = self.classifier.classify(error, context);

        if let Some(reason) = classification.skip_reason {
            debug!(path = %context.path, ?reason, "failure not surfaced to notifier");
            return;
        }

        let notification = Notification::for_failure(&classification.error, context.request_name.as_deref());
        self.notifier.error_toast(notification);
    }
}
