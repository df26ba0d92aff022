//! Agenda event tools.

use super::{created_message, deleted_message, into_record, pretty, record_id, updated_message};
use crate::error::DolibarrApiResult;
use crate::models::{Record, Resource};
use crate::query::TimeWindow;
use crate::repositories::AgendaEventRepository;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub fn default_upcoming_limit() -> u32 {
    50
}

pub fn default_days_ahead() -> u32 {
    30
}

/// Arguments of `get_agenda_events`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AgendaListParams {
    /// Maximum number of results (agenda default when absent, 0 for no limit)
    #[serde(default)]
    pub limit: Option<u32>,

    /// ASC or DESC on the event date (server default when absent)
    #[serde(default)]
    #[schemars(extend("enum" = ["ASC", "DESC"]))]
    pub sort_order: Option<String>,

    /// Restrict to a time window relative to now
    #[serde(default)]
    pub filter_type: Option<TimeWindow>,
}

/// Arguments of `get_upcoming_events`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpcomingEventsParams {
    /// Maximum number of results
    #[serde(default = "default_upcoming_limit")]
    pub limit: u32,

    /// How many days ahead to look
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

impl Default for UpcomingEventsParams {
    fn default() -> Self {
        Self {
            limit: default_upcoming_limit(),
            days_ahead: default_days_ahead(),
        }
    }
}

/// Arguments of `create_agenda_event`.
///
/// Owner and attendee fields are filled in by the repository when absent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateAgendaEventParams {
    /// Event title
    pub label: String,

    /// Start date (YYYY-MM-DD HH:MM:SS)
    pub datep: String,

    /// End date (YYYY-MM-DD HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datef: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Event type ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,

    /// Linked company ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_soc: Option<i64>,

    /// Linked contact ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_contact: Option<i64>,

    /// 0 = free, 1 = busy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Owner user ID (configured default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userownerid: Option<i64>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `update_agenda_event`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAgendaEventParams {
    /// ID of the event to update
    #[serde(skip_serializing)]
    pub event_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datep: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datef: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments naming one agenda event.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AgendaEventIdParams {
    /// Event ID
    pub event_id: String,
}

#[derive(Clone)]
pub struct AgendaEventTools {
    repo: AgendaEventRepository,
}

impl AgendaEventTools {
    pub fn new(repo: AgendaEventRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, params: AgendaListParams) -> DolibarrApiResult<String> {
        let events = self
            .repo
            .list(params.limit, params.sort_order, params.filter_type)
            .await?;
        pretty(&events)
    }

    pub async fn upcoming(&self, params: UpcomingEventsParams) -> DolibarrApiResult<String> {
        let events = self.repo.upcoming(params.limit, params.days_ahead).await?;
        pretty(&events)
    }

    pub async fn create(&self, params: CreateAgendaEventParams) -> DolibarrApiResult<String> {
        let created = self.repo.create(into_record(&params)?).await?;
        Ok(created_message(Resource::AgendaEvent, &created))
    }

    pub async fn get(&self, params: AgendaEventIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.event_id)?;
        pretty(&self.repo.get(&id).await?)
    }

    pub async fn update(&self, params: UpdateAgendaEventParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.event_id)?;
        self.repo.update(&id, into_record(&params)?).await?;
        Ok(updated_message(Resource::AgendaEvent, &id))
    }

    pub async fn delete(&self, params: AgendaEventIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.event_id)?;
        self.repo.delete(&id).await?;
        Ok(deleted_message(Resource::AgendaEvent, &id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upcoming_defaults() {
        let params: UpcomingEventsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.limit, 50);
        assert_eq!(params.days_ahead, 30);

        let params: UpcomingEventsParams =
            serde_json::from_value(json!({"days_ahead": 7})).unwrap();
        assert_eq!(params.limit, 50);
        assert_eq!(params.days_ahead, 7);
    }

    #[test]
    fn test_filter_type_values() {
        let params: AgendaListParams =
            serde_json::from_value(json!({"filter_type": "this_week"})).unwrap();
        assert_eq!(params.filter_type, Some(TimeWindow::ThisWeek));

        let unknown: Result<AgendaListParams, _> =
            serde_json::from_value(json!({"filter_type": "next_year"}));
        assert!(unknown.is_err());
    }

    #[test]
    fn test_create_payload_leaves_owner_out_when_absent() {
        let params: CreateAgendaEventParams = serde_json::from_value(json!({
            "label": "Demo",
            "datep": "2024-05-02 14:00:00",
        }))
        .unwrap();

        let record = into_record(&params).unwrap();
        assert!(!record.contains_key("userownerid"));
        assert!(!record.contains_key("transparency"));
        assert_eq!(record.len(), 2);
    }
}
