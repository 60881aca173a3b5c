//! # cms-api-rs: Typed data-access layer for a content-management API
//!
//! This crate provides one shared HTTP client with an explicit interceptor
//! pipeline, plus typed resource façades (categories) built on top of it.
//!
//! ## Key Features
//!
//! - Environment-aware base URL: loopback on the server, path-relative in the browser
//! - Success payloads are unwrapped; transport metadata never reaches callers
//! - Failures are classified: some additionally raise a user notification,
//!   all of them are returned to the caller
//! - Per-call `skip_error_codes` for failures the caller handles itself (e.g. 409 conflicts)
//! - Pluggable transport and notifier
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cms_api_rs::{ApiClient, ClientConfig, CategoryStatus, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::browser("https://cms.example.com")?)?
//!         .with_notifier(|notification: cms_api_rs::Notification| eprintln!("{}", notification.message));
//!
//!     let categories = client.categories();
//!     for info in categories.get_category_list().await? {
//!         println!("{} ({})", info.title, info.status);
//!     }
//!
//!     // Handle edit conflicts locally instead of through the notifier
//!     let result = categories
//!         .update_category_info_with(
//!             "42",
//!             "New Title",
//!             "Guides",
//!             CategoryStatus::InProgress,
//!             RequestOptions::new().skip_error_codes([409]),
//!         )
//!         .await;
//!     if let Err(e) = result {
//!         if e.is_conflict() {
//!             println!("someone else edited this category");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod client;
pub mod config;
pub mod environment;
pub mod classifier;
pub mod notifier;
mod middleware;
pub mod services;
pub mod utils;

// Re-export core components
pub use client::{ApiClient, ReqwestTransport, Transport};
pub use types::{
    ApiError, ApiResult, HttpErrorKind, PreparedRequest, RawResponse, RequestContext, RequestOptions,
};
pub use config::{ClientConfig, TlsConfig};
pub use environment::{EnvironmentResolver, ExecutionEnvironment};
pub use classifier::{Classification, ClassifiedError, ErrorClassifier, SkipReason};
pub use notifier::{LogNotifier, Notification, NotificationDetails, Notifier};
pub use middleware::{
    BaseUrlInterceptor, ErrorMiddleware, NotifyingErrorInterceptor, RequestMiddleware, ResponseMiddleware,
};

pub mod prelude {
    //! Convenient imports for commonly used types and functions
    pub use crate::{ApiClient, ApiError, ApiResult, ClientConfig, ExecutionEnvironment, RequestOptions, from_env, new_client};
    pub use crate::{Notification, Notifier};
    pub use crate::services::{CategoryService, CategoryInfo, CategoryFull, CategoryStatus, NewCategory};
}

// Public façade access
pub use services::{
    ResourceService,
    ServiceOperations,
    ValidationOperations,
    CategoryService,
    CategoryInfo,
    CategoryFull,
    CategoryItem,
    CategoryStatus,
    NewCategory,
};

// Entry point functions
pub fn new_client(config: ClientConfig) -> ApiResult<ApiClient> {
    ApiClient::new(config)
}

pub fn from_env() -> ApiResult<ApiClient> {
    ApiClient::new(ClientConfig::from_env()?)
}
