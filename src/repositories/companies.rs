use super::ResourceEndpoint;
use crate::client::AsyncDolibarrClient;
use crate::domain::RecordId;
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use crate::query::{FilterExpression, QueryBuilder, QueryParams};
use serde_json::Value;
use std::sync::Arc;

/// Companies, which Dolibarr calls third parties (`/thirdparties`).
#[derive(Clone)]
pub struct CompanyRepository {
    endpoint: ResourceEndpoint,
    query: Arc<QueryBuilder>,
}

impl CompanyRepository {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, query: Arc<QueryBuilder>) -> Self {
        Self {
            endpoint: ResourceEndpoint::new(client, Resource::Company),
            query,
        }
    }

    /// List companies whose name contains `search_term`, sorted on name.
    pub async fn search(
        &self,
        search_term: Option<&str>,
        limit: Option<u32>,
        sort_order: Option<String>,
    ) -> DolibarrApiResult<Value> {
        let filter = search_term.and_then(|term| FilterExpression::any_like(&["t.name"], term));
        let params = QueryParams::new(limit, sort_order)
            .sort_field("t.name")
            .filter(filter);
        let query = self.query.build(Resource::Company, &params);
        self.endpoint.list(&query).await
    }

    pub async fn create(&self, company: Record) -> DolibarrApiResult<CreationResult> {
        self.endpoint.create(company).await
    }

    pub async fn get(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.get(id).await
    }

    pub async fn update(&self, id: &RecordId, fields: Record) -> DolibarrApiResult<Value> {
        self.endpoint.update(id, fields).await
    }

    pub async fn delete(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.delete(id).await
    }
}
