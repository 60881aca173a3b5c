//! Resource Service Façades
//!
//! Each façade exposes the operations of one domain resource on top of the
//! shared [`ApiClient`]. A façade builds a [`RequestContext`] per call,
//! dispatches it through the client pipeline and returns the unwrapped
//! payload, typed as a domain record where one exists.
//!
//! ## Architecture
//!
//! - `ResourceService` trait: names the resource a façade serves
//! - `ServiceOperations` trait: dispatch helpers over the shared client
//! - `ValidationOperations` trait: client-side argument checks
//! - `BaseService`: implements all three and serves as a composition base
//!
//! ## Example: Adding a façade for another resource
//!
//! ```rust
//! use cms_api_rs::{ApiClient, ApiResult, RequestContext};
//! use cms_api_rs::services::{ResourceService, ServiceOperations, ValidationOperations, base::BaseService};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! struct TagService {
//!     base: BaseService,
//! }
//!
//! impl TagService {
//!     pub fn new(client: Arc<ApiClient>) -> Self {
//!         Self { base: BaseService::new(client, "tag") }
//!     }
//!
//!     pub async fn get_tag(&self, id: impl Into<String>) -> ApiResult<Value> {
//!         let id = self.validate_id(id, "id")?;
//!         self.fetch(RequestContext::get(format!("tag/{}", id))).await
//!     }
//! }
//!
//! impl ResourceService for TagService {
//!     fn resource_name(&self) -> &str {
//!         self.base.resource_name()
//!     }
//! }
//!
//! impl ValidationOperations for TagService {}
//!
//! impl ServiceOperations for TagService {
//!     fn client(&self) -> &ApiClient {
//!         self.base.client()
//!     }
//! }
//! ```

pub mod base;
pub mod category;

pub use category::{CategoryFull, CategoryInfo, CategoryItem, CategoryService, CategoryStatus, NewCategory};

use crate::client::ApiClient;
use crate::types::*;
use crate::utils::StringValidator;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Common trait for all resource façades
pub trait ResourceService: Send + Sync {
    /// Name of the resource this façade serves
    fn resource_name(&self) -> &str;
}

/// Client-side argument checks run before anything is dispatched
pub trait ValidationOperations: ResourceService {
    /// Validate an identifier used as a path segment
    fn validate_id<S: Into<String>>(&self, value: S, param_name: &str) -> ApiResult<String> {
        StringValidator::path_segment(value, param_name).map_err(|e| match e {
            ApiError::InvalidParameter(message) => {
                ApiError::InvalidParameter(format!("{}: {}", self.resource_name(), message))
            }
            other => other,
        })
    }
}

/// Common dispatch operations for façades
pub trait ServiceOperations: ResourceService {
    /// Get a reference to the shared client
    fn client(&self) -> &ApiClient;

    /// Dispatch a request and deserialize the payload
    fn fetch<'a, T: DeserializeOwned + Send + 'a>(&'a self, context: RequestContext) -> JsonFuture<'a, T> {
        Box::pin(async move { self.client().request(context).await })
    }

    /// Dispatch a request and return the payload untyped
    fn fetch_value<'a>(&'a self, context: RequestContext) -> JsonFuture<'a, Value> {
        Box::pin(async move { self.client().request_value(context).await })
    }
}
