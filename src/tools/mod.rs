//! MCP tool logic for the Dolibarr resources.
//!
//! Each resource gets its own argument types (deserialized from the tool call
//! and described to clients through `schemars`) and a tools struct turning
//! those arguments into repository calls. Every tool answers with text:
//! pretty JSON for reads, a one-line confirmation for writes.

pub mod agenda;
pub mod companies;
pub mod contacts;
pub mod proposals;
pub mod tickets;

pub use agenda::{
    AgendaEventIdParams, AgendaEventTools, AgendaListParams, CreateAgendaEventParams,
    UpcomingEventsParams, UpdateAgendaEventParams,
};
pub use companies::{CompanyIdParams, CompanyTools, CreateCompanyParams, UpdateCompanyParams};
pub use contacts::{ContactIdParams, ContactTools, CreateContactParams, UpdateContactParams};
pub use proposals::{
    CreateProposalParams, ProposalIdParams, ProposalTools, UpdateProposalParams,
};
pub use tickets::{
    AddTicketMessageParams, CreateTicketParams, TicketIdParams, TicketRefParams, TicketTools,
    TicketTrackIdParams, UpdateTicketParams,
};

use crate::domain::RecordId;
use crate::error::{DolibarrApiError, DolibarrApiResult};
use crate::models::{CreationResult, Record, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments of the searchable list tools (`search_contacts`, `get_companies`).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Text to look for; empty or absent lists everything
    #[serde(default)]
    pub search_term: Option<String>,

    /// Maximum number of results (server default when absent, 0 for no limit)
    #[serde(default)]
    pub limit: Option<u32>,

    /// ASC or DESC (server default when absent)
    #[serde(default)]
    #[schemars(extend("enum" = ["ASC", "DESC"]))]
    pub sort_order: Option<String>,
}

/// Arguments of the plain list tools (`get_proposals`, `get_tickets`).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Maximum number of results (server default when absent, 0 for no limit)
    #[serde(default)]
    pub limit: Option<u32>,

    /// ASC or DESC (server default when absent)
    #[serde(default)]
    #[schemars(extend("enum" = ["ASC", "DESC"]))]
    pub sort_order: Option<String>,
}

/// Render a response body for the caller.
pub(crate) fn pretty(value: &Value) -> DolibarrApiResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Validate an identifier argument.
pub(crate) fn record_id(raw: &str) -> DolibarrApiResult<RecordId> {
    RecordId::new(raw).map_err(|e| DolibarrApiError::InvalidRequest(e.to_string()))
}

/// Serialize tool arguments into the JSON object sent to Dolibarr.
pub(crate) fn into_record<T: Serialize>(params: &T) -> DolibarrApiResult<Record> {
    match serde_json::to_value(params)? {
        Value::Object(record) => Ok(record),
        other => Err(DolibarrApiError::InvalidRequest(format!(
            "expected an object payload, got {}",
            other
        ))),
    }
}

pub(crate) fn created_message(resource: Resource, created: &CreationResult) -> String {
    format!(
        "{} created successfully. ID: {}",
        resource.label(),
        created.id().unwrap_or_else(|| "N/A".to_string())
    )
}

pub(crate) fn updated_message(resource: Resource, id: &RecordId) -> String {
    format!("{} updated successfully. ID: {}", resource.label(), id)
}

pub(crate) fn deleted_message(resource: Resource, id: &RecordId) -> String {
    format!("{} deleted successfully. ID: {}", resource.label(), id)
}
