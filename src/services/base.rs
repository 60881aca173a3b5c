//! Base implementation for resource façades.

use crate::client::ApiClient;
use crate::services::{ResourceService, ServiceOperations, ValidationOperations};
use std::sync::Arc;

/// Base façade that concrete services compose
pub struct BaseService {
    client: Arc<ApiClient>,
    resource_name: String,
}

impl BaseService {
    pub fn new(client: Arc<ApiClient>, resource_name: impl Into<String>) -> Self {
        Self {
            client,
            resource_name: resource_name.into(),
        }
    }
}

impl ResourceService for BaseService {
    fn resource_name(&self) -> &str {
        &self.resource_name
    }
}

impl ValidationOperations for BaseService {}

impl ServiceOperations for BaseService {
    fn client(&self) -> &ApiClient {
        &self.client
    }
}
