use super::ResourceEndpoint;
use crate::client::AsyncDolibarrClient;
use crate::domain::RecordId;
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use crate::query::{QueryBuilder, QueryParams};
use serde_json::Value;
use std::sync::Arc;

/// Commercial proposals (`/proposals`).
#[derive(Clone)]
pub struct ProposalRepository {
    endpoint: ResourceEndpoint,
    query: Arc<QueryBuilder>,
}

impl ProposalRepository {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, query: Arc<QueryBuilder>) -> Self {
        Self {
            endpoint: ResourceEndpoint::new(client, Resource::Proposal),
            query,
        }
    }

    /// List proposals sorted on creation date.
    pub async fn list(
        &self,
        limit: Option<u32>,
        sort_order: Option<String>,
    ) -> DolibarrApiResult<Value> {
        let params = QueryParams::new(limit, sort_order).sort_field("t.datec");
        let query = self.query.build(Resource::Proposal, &params);
        self.endpoint.list(&query).await
    }

    pub async fn create(&self, proposal: Record) -> DolibarrApiResult<CreationResult> {
        self.endpoint.create(proposal).await
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
