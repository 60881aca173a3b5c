// Category Service

use crate::client::ApiClient;
use crate::services::{base::BaseService, ResourceService, ServiceOperations, ValidationOperations};
use crate::types::*;
use crate::utils::payload::payload_to_id;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Façade over the category endpoints
pub struct CategoryService {
    base: BaseService,
}

/// Editorial status of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryStatus {
    #[serde(rename = "CategoryFinished")]
    Finished,
    #[serde(rename = "CategoryWIP")]
    InProgress,
    #[serde(rename = "CategoryStub")]
    ToBeWritten,
}

impl CategoryStatus {
    /// Wire value of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Finished => "CategoryFinished",
            CategoryStatus::InProgress => "CategoryWIP",
            CategoryStatus::ToBeWritten => "CategoryStub",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub title: String,
    pub created: String,
    pub group: String,
    pub status: CategoryStatus,
    /// Fields the server sends beyond the known ones
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFull {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub group: String,
    pub status: CategoryStatus,
    /// Rich-text document, kept as delivered
    pub description: Value,
    pub items: Vec<CategoryItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of a category; fields other than `id` are passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Fields required to create a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub title: String,
    pub group: String,
}

impl NewCategory {
    pub fn new(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
        }
    }
}

impl CategoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            base: BaseService::new(client, "category"),
        }
    }

    /// Fetch a single category with its items
    ///
    /// A missing id surfaces as an `HttpError` whose kind is `NotFound`.
    pub async fn get_category_by_id(&self, id: impl Into<String>) -> ApiResult<CategoryFull> {
        self.get_category_by_id_with(id, RequestOptions::default()).await
    }

    pub async fn get_category_by_id_with(
        &self,
        id: impl Into<String>,
        options: RequestOptions,
    ) -> ApiResult<CategoryFull> {
        let id = self.validate_id(id, "id")?;
        let context = RequestContext::get(format!("category/{}", id))
            .request_name("get category")
            .with_options(options);
        self.fetch(context).await
    }

    /// List all categories; no matches is an empty list
    pub async fn get_category_list(&self) -> ApiResult<Vec<CategoryInfo>> {
        self.get_category_list_with(RequestOptions::default()).await
    }

    pub async fn get_category_list_with(&self, options: RequestOptions) -> ApiResult<Vec<CategoryInfo>> {
        let context = RequestContext::get("categories")
            .request_name("get category list")
            .with_options(options);
        let categories: Option<Vec<CategoryInfo>> = self.fetch(context).await?;
        Ok(categories.unwrap_or_default())
    }

    /// Create a category and return the identifier assigned by the server
    pub async fn create_category(&self, category: NewCategory) -> ApiResult<String> {
        self.create_category_with(category, RequestOptions::default()).await
    }

    pub async fn create_category_with(&self, category: NewCategory, options: RequestOptions) -> ApiResult<String> {
        let context = RequestContext::post("category")
            .param("title", category.title)
            .param("group", category.group)
            .request_name("create category")
            .with_options(options);
        let payload = self.fetch_value(context).await?;
        payload_to_id(payload)
    }

    /// Update the mutable fields of a category.
    ///
    /// A concurrent edit answers 409; callers that resolve conflicts
    /// themselves should use [`update_category_info_with`](Self::update_category_info_with)
    /// and skip 409 so the generic notifier stays quiet.
    pub async fn update_category_info(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        group: impl Into<String>,
        status: CategoryStatus,
    ) -> ApiResult<Value> {
        self.update_category_info_with(id, title, group, status, RequestOptions::default())
            .await
    }

    pub async fn update_category_info_with(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        group: impl Into<String>,
        status: CategoryStatus,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let id = self.validate_id(id, "id")?;
        let context = RequestContext::post(format!("category/{}/info", id))
            .param("title", title)
            .param("group", group)
            .param("status", status.as_str())
            .request_name("update category info")
            .with_options(options);
        self.fetch_value(context).await
    }
}

impl ResourceService for CategoryService {
    fn resource_name(&self) -> &str {
        self.base.resource_name()
    }
}

impl ValidationOperations for CategoryService {}

impl ServiceOperations for CategoryService {
    fn client(&self) -> &ApiClient {
        self.base.client()
    }
}
