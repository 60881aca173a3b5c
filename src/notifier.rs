// Notifier collaborator contract

use crate::classifier::ClassifiedError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured notification handed to the UI's error toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub details: NotificationDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetails {
    /// Resolved URL of the failed request
    pub path: String,
    pub response_code: Option<u16>,
    /// Server-provided response body
    pub message: Value,
}

impl Notification {
    /// Build the generic "something went wrong" notification for a failure
    pub fn for_failure(failure: &ClassifiedError, request_name: Option<&str>) -> Self {
        Self {
            message: failure_message(request_name),
            details: NotificationDetails {
                path: failure.request_path.clone(),
                response_code: failure.http_status,
                message: failure.response_body.clone(),
            },
        }
    }
}

/// User-facing message, naming the request when the caller labelled it
pub fn failure_message(request_name: Option<&str>) -> String {
    match request_name {
        Some(name) => format!("Something went wrong, could not process \"{}\" request.", name),
        None => "Something went wrong, could not process request.".to_string(),
    }
}

/// Receives notifications for failures that must interrupt the user.
///
/// The client never awaits or inspects the outcome of a notification.
pub trait Notifier: Send + Sync {
    fn error_toast(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn error_toast(&self, notification: Notification) {
        self(notification)
    }
}

/// Fallback notifier that writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error_toast(&self, notification: Notification) {
        tracing::warn!(
            path = %notification.details.path,
            response_code = ?notification.details.response_code,
            details = %notification.details.message,
            "{}",
            notification.message
        );
    }
}
