//! Organization / region / store documents — the thin hierarchy the
//! settings cascade and provisioning run against.

use serde::Deserialize;
use serde_json::Value;

use abcpos_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::catalog::normalize::normalize_country_code;
use crate::model::{Organization, Region, Store};
use crate::service::StorecfgService;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrganizationInput {
    pub code: String,
    pub name: String,
    pub default_settings: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRegionInput {
    pub organization_id: String,
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub timezone: String,
    pub default_settings: Value,
}

impl StorecfgService {
    pub fn create_organization(
        &self,
        input: &CreateOrganizationInput,
    ) -> Result<Organization, ServiceError> {
        let code = input.code.trim().to_uppercase();
        let name = input.name.trim().to_string();
        if code.is_empty() || name.is_empty() {
            return Err(ServiceError::Validation(
                "organization code and name are required.".to_string(),
            ));
        }

        let now = now_rfc3339();
        let organization = Organization {
            id: new_id(),
            code,
            name,
            default_settings: if input.default_settings.is_object() {
                input.default_settings.clone()
            } else {
                Value::Object(serde_json::Map::new())
            },
            create_at: Some(now.clone()),
            update_at: Some(now),
        };
        self.put_doc("organization", &organization.id, &organization)?;
        Ok(organization)
    }

    pub fn get_organization(&self, id: &str) -> Result<Organization, ServiceError> {
        self.require_doc("organization", id.trim())
    }

    /// Create a region under an existing organization. The country
    /// code becomes the provisioning default for its stores.
    pub fn create_region(&self, input: &CreateRegionInput) -> Result<Region, ServiceError> {
        let organization: Organization = self.require_doc("organization", input.organization_id.trim())?;
        let code = input.code.trim().to_uppercase();
        let name = input.name.trim().to_string();
        if code.is_empty() || name.is_empty() {
            return Err(ServiceError::Validation(
                "region code and name are required.".to_string(),
            ));
        }

        let now = now_rfc3339();
        let region = Region {
            id: new_id(),
            organization_id: organization.id,
            code,
            name,
            country_code: normalize_country_code(&input.country_code, "US"),
            timezone: input.timezone.trim().to_string(),
            default_settings: if input.default_settings.is_object() {
                input.default_settings.clone()
            } else {
                Value::Object(serde_json::Map::new())
            },
            create_at: Some(now.clone()),
            update_at: Some(now),
        };
        self.put_doc("region", &region.id, &region)?;
        Ok(region)
    }

    pub fn get_region(&self, id: &str) -> Result<Region, ServiceError> {
        self.require_doc("region", id.trim())
    }

    pub fn get_store(&self, location_id: &str) -> Result<Store, ServiceError> {
        self.require_doc("store", location_id.trim())
    }

    pub fn list_stores(&self, params: &ListParams) -> Result<ListResult<Store>, ServiceError> {
        let mut stores: Vec<Store> = self.list_docs("store")?;
        stores.sort_by(|a, b| a.location_id.cmp(&b.location_id));
        let total = stores.len();
        let items = stores
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();
        Ok(ListResult { items, total })
    }
}
