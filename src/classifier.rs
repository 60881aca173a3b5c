//! Error classification.
//!
//! Decides whether a failed call should additionally raise a user
//! notification. The failure itself is always returned to the caller.
//!
//! A failure is kept silent when:
//!
//! - execution is server-side (there is no UI to notify),
//! - there was no HTTP response at all (the caller handles transport failures),
//! - the response status is in the call's `skip_error_codes`.
//!
//! The status is read from the failure before it is tested against
//! `skip_error_codes`.

use crate::environment::ExecutionEnvironment;
use crate::types::{ApiError, RequestContext};
use serde_json::Value;

/// Transient view of a failed response
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    pub http_status: Option<u16>,
    pub is_skippable: bool,
    pub response_body: Value,
    pub request_path: String,
}

impl ClassifiedError {
    pub fn from_failure(error: &ApiError, context: &RequestContext) -> Self {
        let http_status = error.status();
        let is_skippable = http_status.map_or(false, |status| context.skips_status(status));

        let request_path = error
            .url()
            .map(String::from)
            .or_else(|| context.resolved_url.clone())
            .unwrap_or_else(|| context.path.clone());

        Self {
            http_status,
            is_skippable,
            response_body: error.response_body().cloned().unwrap_or(Value::Null),
            request_path,
        }
    }
}

/// Why a failure was kept away from the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ServerExecution,
    NoResponse,
    SkippedStatus(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub notify: bool,
    pub skip_reason: Option<SkipReason>,
    pub error: ClassifiedError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassifier {
    environment: ExecutionEnvironment,
}

impl ErrorClassifier {
    pub fn new(environment: ExecutionEnvironment) -> Self {
        Self { environment }
    }

    pub fn classify(&self, error: &ApiError, context: &RequestContext) -> Classification {
        let classified = ClassifiedError::from_failure(error, context);

        let skip_reason = if self.environment == ExecutionEnvironment::Server {
            Some(SkipReason::ServerExecution)
        } else {
            match classified.http_status {
                None => Some(SkipReason::NoResponse),
                Some(status) if classified.is_skippable => Some(SkipReason::SkippedStatus(status)),
                Some(_) => None,
            }
        };

        Classification {
            notify: skip_reason.is_none(),
            skip_reason,
            error: classified,
        }
    }
}
