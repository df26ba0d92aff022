use super::ResourceEndpoint;
use crate::client::AsyncDolibarrClient;
use crate::domain::RecordId;
use crate::error::{DolibarrApiError, DolibarrApiResult};
use crate::models::{apply_event_defaults, CreationResult, Record, Resource};
use crate::query::{upcoming_filter, QueryBuilder, QueryParams, TimeWindow};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::sync::Arc;

/// Source of "now" for time-window filters.
pub type Clock = fn() -> NaiveDateTime;

/// Current local wall-clock time, the timezone Dolibarr stores event dates in.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Agenda events (`/agendaevents`).
///
/// List calls sort on the event date unless told otherwise.
#[derive(Clone)]
pub struct AgendaEventRepository {
    endpoint: ResourceEndpoint,
    query: Arc<QueryBuilder>,
    default_limit: u32,
    fallback_owner: i64,
    clock: Clock,
}

impl AgendaEventRepository {
    pub fn new(
        client: Arc<dyn AsyncDolibarrClient>,
        query: Arc<QueryBuilder>,
        default_limit: u32,
        fallback_owner: i64,
    ) -> Self {
        Self {
            endpoint: ResourceEndpoint::new(client, Resource::AgendaEvent),
            query,
            default_limit,
            fallback_owner,
            clock: local_now,
        }
    }

    /// Replace the clock used for time windows.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// List events, optionally restricted to a time window around now.
    pub async fn list(
        &self,
        limit: Option<u32>,
        sort_order: Option<String>,
        window: Option<TimeWindow>,
    ) -> DolibarrApiResult<Value> {
        let filter = window.map(|w| w.filter((self.clock)()));
        let params = QueryParams::new(Some(limit.unwrap_or(self.default_limit)), sort_order)
            .filter(filter);
        let query = self.query.build(Resource::AgendaEvent, &params);
        self.endpoint.list(&query).await
    }

    /// Events between now and `days_ahead` days from now, oldest first.
    ///
    /// A horizon past the calendar's range is rejected without a request.
    pub async fn upcoming(&self, limit: u32, days_ahead: u32) -> DolibarrApiResult<Value> {
        let filter = upcoming_filter((self.clock)(), days_ahead).ok_or_else(|| {
            DolibarrApiError::InvalidRequest(format!(
                "days_ahead {} is out of range",
                days_ahead
            ))
        })?;
        let params = QueryParams::new(Some(limit), Some("ASC".to_string())).filter(Some(filter));
        let query = self.query.build(Resource::AgendaEvent, &params);
        self.endpoint.list(&query).await
    }

    /// Create an event, filling in owner, attendee and flag defaults first.
    pub async fn create(&self, mut event: Record) -> DolibarrApiResult<CreationResult> {
        apply_event_defaults(&mut event, self.fallback_owner);
        self.endpoint.create(event).await
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
