use super::ResourceEndpoint;
use crate::client::AsyncDolibarrClient;
use crate::domain::RecordId;
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use crate::query::{QueryBuilder, QueryParams};
use serde_json::Value;
use std::sync::Arc;

/// Support tickets (`/tickets`).
#[derive(Clone)]
pub struct TicketRepository {
    endpoint: ResourceEndpoint,
    query: Arc<QueryBuilder>,
}

impl TicketRepository {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, query: Arc<QueryBuilder>) -> Self {
        Self {
            endpoint: ResourceEndpoint::new(client, Resource::Ticket),
            query,
        }
    }

    /// List tickets sorted on creation date.
    pub async fn list(
        &self,
        limit: Option<u32>,
        sort_order: Option<String>,
    ) -> DolibarrApiResult<Value> {
        let params = QueryParams::new(limit, sort_order).sort_field("t.datec");
        let query = self.query.build(Resource::Ticket, &params);
        self.endpoint.list(&query).await
    }

    pub async fn create(&self, ticket: Record) -> DolibarrApiResult<CreationResult> {
        self.endpoint.create(ticket).await
    }

    pub async fn get(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.get(id).await
    }

    /// Look a ticket up by its reference (e.g. `TS2401-0001`).
    pub async fn get_by_ref(&self, reference: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.get_by("ref", reference).await
    }

    /// Look a ticket up by its public tracking code.
    pub async fn get_by_track_id(&self, track_id: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.get_by("track_id", track_id).await
    }

    pub async fn update(&self, id: &RecordId, fields: Record) -> DolibarrApiResult<Value> {
        self.endpoint.update(id, fields).await
    }

    /// Append a message to the ticket named by the payload's `track_id`.
    pub async fn add_message(&self, message: Record) -> DolibarrApiResult<Value> {
        self.endpoint.post_action("newmessage", message).await
    }

    pub async fn delete(&self, id: &RecordId) -> DolibarrApiResult<Value> {
        self.endpoint.delete(id).await
    }
}
