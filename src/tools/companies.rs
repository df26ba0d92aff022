//! Company (third party) tools.

use super::{
    created_message, deleted_message, into_record, pretty, record_id, updated_message,
    SearchParams,
};
use crate::error::DolibarrApiResult;
use crate::models::{Record, Resource};
use crate::repositories::CompanyRepository;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments of `create_company`. Unlisted fields are forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCompanyParams {
    /// Company name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    /// ISO country code (FR, BE, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments of `update_company`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCompanyParams {
    /// ID of the company to update
    #[serde(skip_serializing)]
    pub company_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    #[serde(flatten)]
    pub extra: Record,
}

/// Arguments naming one company.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyIdParams {
    /// Company ID
    pub company_id: String,
}

#[derive(Clone)]
pub struct CompanyTools {
    repo: CompanyRepository,
}

impl CompanyTools {
    pub fn new(repo: CompanyRepository) -> Self {
        Self { repo }
    }

    pub async fn search(&self, params: SearchParams) -> DolibarrApiResult<String> {
        let companies = self
            .repo
            .search(params.search_term.as_deref(), params.limit, params.sort_order)
            .await?;
        pretty(&companies)
    }

    pub async fn create(&self, params: CreateCompanyParams) -> DolibarrApiResult<String> {
        let created = self.repo.create(into_record(&params)?).await?;
        Ok(created_message(Resource::Company, &created))
    }

    pub async fn get(&self, params: CompanyIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.company_id)?;
        pretty(&self.repo.get(&id).await?)
    }

    pub async fn update(&self, params: UpdateCompanyParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.company_id)?;
        self.repo.update(&id, into_record(&params)?).await?;
        Ok(updated_message(Resource::Company, &id))
    }

    pub async fn delete(&self, params: CompanyIdParams) -> DolibarrApiResult<String> {
        let id = record_id(&params.company_id)?;
        self.repo.delete(&id).await?;
        Ok(deleted_message(Resource::Company, &id))
    }
}
