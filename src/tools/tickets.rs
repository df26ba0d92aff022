//! Support ticket tools.

use super::{
    deleted_message, into_record, pretty, record_id, updated_message, ListParams,
};
use crate::error::DolibarrApiResult;
use crate::models::{CreationResult, Record, Resource};
use crate::repositories::TicketRepository;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments of `create_ticket`. Unlisted fields are forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTicketParams {
    pub subject: String,

    /// Description of the problem
    pub message: String,

    /// Company ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_soc: Option<i64>,

    /// ID of the creating user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_user_create: Option<i64>,

    /// ID of the assigned user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_user_assign: Option<i64>,

    /// Priority (0-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_code: Option<String>,

    /// Sender email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_from: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `update_ticket`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTicketParams {
    /// ID of the ticket to update
    #[serde(skip_serializing)]
    pub ticket_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_user_assign: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Progress percentage (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,

    /// New status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_statut: Option<i64>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `add_ticket_message`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddTicketMessageParams {
    /// Tracking code of the ticket
    pub track_id: String,

    pub message: String,

    /// Sender email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// 0 = public, 1 = private
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<i64>,
}

/// Arguments naming one ticket by ID.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketIdParams {
    /// Ticket ID
    pub ticket_id: String,
}

/// Arguments naming one ticket by reference.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketRefParams {
    /// Ticket reference
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Arguments naming one ticket by tracking code.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketTrackIdParams {
    /// Ticket tracking code
    pub track_id: String,
}

#[derive(Clone)]
pub struct TicketTools {
    repo: TicketRepository,
}

impl TicketTools {
    pub fn new(repo: TicketRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, params: ListParams) -> DolibarrApiResult<String> {
        pretty(&self.repo.list(params.limit, params.sort_order).await?)
    }

    pub async fn create(&self, params: CreateTicketParams) -> DolibarrApiResult<String> {
        let created = self.repo.create(into_record(&params)?).await?;
        Ok(ticket_created_message(&created))
    }

    pub async fn get(&self, params: TicketIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.ticket_id)?;
        pretty(&self.repo.get(&id).await?)
    }

    pub async fn get_by_ref(&self, params: TicketRefParams) -> DolibarrApiResult<String> {
        let reference = record_id(&params.reference)?;
        pretty(&self.repo.get_by_ref(&reference).await?)
    }

    pub async fn get_by_track_id(&self, params: TicketTrackIdParams) -> DolibarrApiResult<String> {
        let track_id = record_id(&params.track_id)?;
        pretty(&self.repo.get_by_track_id(&track_id).await?)
    }

    pub async fn update(&self, params: UpdateTicketParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.ticket_id)?;
        self.repo.update(&id, into_record(&params)?).await?;
        Ok(updated_message(Resource::Ticket, &id))
    }

    pub async fn add_message(&self, params: AddTicketMessageParams) -> DolibarrApiResult<String> {
        self.repo.add_message(into_record(&params)?).await?;
        Ok("Message added to ticket successfully.".to_string())
    }

    pub async fn delete(&self, params: TicketIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.ticket_id)?;
        self.repo.delete(&id).await?;
        Ok(deleted_message(Resource::Ticket, &id))
    }
}

/// Tickets also report the generated reference and tracking code.
fn ticket_created_message(created: &CreationResult) -> String {
    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());
    format!(
        "Ticket created successfully. ID: {}, Ref: {}, Track ID: {}",
        or_na(created.id()),
        or_na(created.field("ref")),
        or_na(created.field("track_id")),
    )
}
