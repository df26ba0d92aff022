use super::ResourceEndpoint;
use crate::client::AsyncDolibarrClient;
use crate::domain::RecordId;
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use crate::query::{FilterExpression, QueryBuilder, QueryParams};
use serde_json::Value;
use std::sync::Arc;

/// Columns matched by a contact search term.
const SEARCH_COLUMNS: [&str; 3] = ["t.lastname", "t.firstname", "t.email"];

/// Contacts (`/contacts`).
#[derive(Clone)]
pub struct ContactRepository {
    endpoint: ResourceEndpoint,
    query: Arc<QueryBuilder>,
}

impl ContactRepository {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, query: Arc<QueryBuilder>) -> Self {
        Self {
            endpoint: ResourceEndpoint::new(client, Resource::Contact),
            query,
        }
    }

    /// List contacts whose last name, first name or email contains `search_term`,
    /// sorted on last name.
    pub async fn search(
        &self,
        search_term: Option<&str>,
        limit: Option<u32>,
        sort_order: Option<String>,
    ) -> DolibarrApiResult<Value> {
        let filter = search_term.and_then(|term| FilterExpression::any_like(&SEARCH_COLUMNS, term));
        let params = QueryParams::new(limit, sort_order)
            .sort_field("t.lastname")
            .filter(filter);
        let query = self.query.build(Resource::Contact, &params);
        self.endpoint.list(&query).await
    }

    pub async fn create(&self, contact: Record) -> DolibarrApiResult<CreationResult> {
        self.endpoint.create(contact).await
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
