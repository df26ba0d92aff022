//! Contact tools.

use super::{
    created_message, deleted_message, into_record, pretty, record_id, updated_message,
    SearchParams,
};
use crate::error::DolibarrApiResult;
use crate::models::{Record, Resource};
use crate::repositories::ContactRepository;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments of `create_contact`. Unlisted fields are forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateContactParams {
    /// Last name
    pub lastname: String,

    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// ID of the company the contact belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socid: Option<i64>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `update_contact`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateContactParams {
    /// ID of the contact to update
    #[serde(skip_serializing)]
    pub contact_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socid: Option<i64>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments naming one contact.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContactIdParams {
    /// Contact ID
    pub contact_id: String,
}

/// Contact search and maintenance.
#[derive(Clone)]
pub struct ContactTools {
    repo: ContactRepository,
}

impl ContactTools {
    pub fn new(repo: ContactRepository) -> Self {
        Self { repo }
    }

    pub async fn search(&self, params: SearchParams) -> DolibarrApiResult<String> {
        let contacts = self
            .repo
            .search(params.search_term.as_deref(), params.limit, params.sort_order)
            .await?;
        pretty(&contacts)
    }

    pub async fn create(&self, params: CreateContactParams) -> DolibarrApiResult<String> {
        let created = self.repo.create(into_record(&params)?).await?;
        Ok(created_message(Resource::Contact, &created))
    }

    pub async fn get(&self, params: ContactIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.contact_id)?;
        pretty(&self.repo.get(&id).await?)
    }

    pub async fn update(&self, params: UpdateContactParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.contact_id)?;
        self.repo.update(&id, into_record(&params)?).await?;
        Ok(updated_message(Resource::Contact, &id))
    }

    pub async fn delete(&self, params: ContactIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.contact_id)?;
        self.repo.delete(&id).await?;
        Ok(deleted_message(Resource::Contact, &id))
    }
}
