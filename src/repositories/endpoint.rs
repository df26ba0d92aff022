//! CRUD plumbing shared by every resource repository.

use crate::client::{AsyncDolibarrClient, Method};
use crate::domain::RecordId;
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use serde_json::Value;
use std::sync::Arc;

/// One Dolibarr resource endpoint (`contacts`, `tickets`, ...).
///
/// Each method issues exactly one request through the async client.
#[derive(Clone)]
pub struct ResourceEndpoint {
    client: Arc<dyn AsyncDolibarrClient>,
    resource: Resource,
}

impl ResourceEndpoint {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, resource: Resource) -> Self {
        Self { client, resource }
    }

    /// `GET /{resource}{query}`; `query` is empty or starts with `?`.
    pub async fn list(&self, query: &str) -> DolibarrApiResult<Value> {
        let path = format!("{}{}", self.resource.endpoint(), query);
        self.client.request(Method::Get, &path, None).await
    }

    /// `GET /{resource}/{id}`
    pub async fn get(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.client
            .request(Method::Get, &self.record_path(id), None)
            .await
    }

    /// `GET /{resource}/{key}/{value}`, e.g. `tickets/ref/TS0001`.
    pub async fn get_by(&self, key: &str, value: &RecordId) -> DolibarrApiResult<Value> {
        let path = format!(
            "{}/{}/{}",
            self.resource.endpoint(),
            key,
            value.path_segment()
        );
        self.client.request(Method::Get, &path, None).await
    }

    /// `POST /{resource}` with the record, normalizing the response.
    pub async fn create(&self, record: Record) -> DolibarrApiResult<CreationResult> {
        let response = self
            .client
            .request(
                Method::Post,
                self.resource.endpoint(),
                Some(Value::Object(record)),
            )
            .await?;

        let created = CreationResult::from(response);
        tracing::info!(
            "{} created with id: {}",
            self.resource.label(),
            created.id().unwrap_or_else(|| "N/A".to_string())
        );
        Ok(created)
    }

    /// `PUT /{resource}/{id}` with the fields to change.
    pub async fn update(&self, id: &RecordId, fields: Record) -> DolibarrApiResult<Value> {
        self.client
            .request(Method::Put, &self.record_path(id), Some(Value::Object(fields)))
            .await
    }

    /// `DELETE /{resource}/{id}`
    pub async fn delete(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.client
            .request(Method::Delete, &self.record_path(id), None)
            .await
    }

    /// `POST /{resource}/{action}`, e.g. `tickets/newmessage`.
    pub async fn post_action(&self, action: &str, body: Record) -> DolibarrApiResult<Value> {
        let path = format!("{}/{}", self.resource.endpoint(), action);
        self.client
            .request(Method::Post, &path, Some(Value::Object(body)))
            .await
    }

    fn record_path(&self, id: &RecordId) -> String {
        format!("{}/{}", self.resource.endpoint(), id.path_segment())
    }
}
