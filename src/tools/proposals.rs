//! Commercial proposal tools.

use super::{
    created_message, deleted_message, into_record, pretty, record_id, updated_message, ListParams,
};
use crate::error::DolibarrApiResult;
use crate::models::{Record, Resource};
use crate::repositories::ProposalRepository;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments of `create_proposal`. Unlisted fields (dates, lines, ...) are forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateProposalParams {
    /// ID of the customer company
    pub socid: i64,

    /// Proposal reference; Dolibarr generates one when absent
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Note visible to the customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_public: Option<String>,

    /// Internal note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_private: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `update_proposal`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProposalParams {
    /// ID of the proposal to update
    #[serde(skip_serializing)]
    pub proposal_id: String,

    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_public: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_private: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments naming one proposal.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProposalIdParams {
    /// Proposal ID
    pub proposal_id: String,
}

#[derive(Clone)]
pub struct ProposalTools {
    repo: ProposalRepository,
}

impl ProposalTools {
    pub fn new(repo: ProposalRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, params: ListParams) -> DolibarrApiResult<String> {
        pretty(&self.repo.list(params.limit, params.sort_order).await?)
    }

    pub async fn create(&self, params: CreateProposalParams) -> DolibarrApiResult<String> {
        let created = self.repo.create(into_record(&params)?).await?;
        Ok(created_message(Resource::Proposal, &created))
    }

    pub async fn get(&self, params: ProposalIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.proposal_id)?;
        pretty(&self.repo.get(&id).await?)
    }

    pub async fn update(&self, params: UpdateProposalParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.proposal_id)?;
        self.repo.update(&id, into_record(&params)?).await?;
        Ok(updated_message(Resource::Proposal, &id))
    }

    pub async fn delete(&self, params: ProposalIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.proposal_id)?;
        self.repo.delete(&id).await?;
        Ok(deleted_message(Resource::Proposal, &id))
    }
}
