//! Store materialization: create the store record, apply the
//! compliance policy pack, then upsert the profiles from the plan.
//! Not atomic — each completed step registers a compensation, and a
//! later failure replays them in reverse, best-effort.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use abcpos_core::{ServiceError, new_id, now_rfc3339};

use crate::model::{
    PlanSummary, ProvisioningRequest, Store, StoreHardwareProfile, StoreVerticalProfile,
};
use crate::service::StorecfgService;
use crate::service::plan::build_store_provisioning_plan;

/// Policy pack applied to a new location by the compliance
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPolicyPack {
    pub country_code: String,
    pub policy_pack_id: String,
    pub policy_pack_version: String,
    pub policy_codes: Vec<String>,
}

/// External collaborator that attaches regulatory policy packs to a
/// newly created location. `Ok(None)` means no pack matched the
/// country — that is not an error.
pub trait CompliancePolicyExecutor: Send + Sync {
    fn apply(
        &self,
        country_code: &str,
        location_id: &str,
    ) -> Result<Option<AppliedPolicyPack>, ServiceError>;
}

/// Executor that never matches a pack. Used when no compliance
/// backend is wired in, and by tests.
pub struct NoopCompliancePolicy;

impl CompliancePolicyExecutor for NoopCompliancePolicy {
    fn apply(&self, _: &str, _: &str) -> Result<Option<AppliedPolicyPack>, ServiceError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateStoreInput {
    pub organization_id: String,
    pub region_id: String,

    /// Generated when absent.
    pub location_id: String,

    pub code: String,
    pub name: String,
    pub status: String,
    pub timezone: String,
    pub channel_set: Vec<String>,
    pub override_settings: Value,
    pub metadata: Value,

    pub provisioning: Option<ProvisioningRequest>,
}

/// Profiles written during materialization, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningResult {
    pub enabled: bool,
    pub country_code: String,
    pub vertical_profile: Option<StoreVerticalProfile>,
    pub hardware_profile: Option<StoreHardwareProfile>,
    pub summary: Option<PlanSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreOutput {
    pub store: Store,
    pub compliance_policy_pack: Option<AppliedPolicyPack>,
    pub provisioning: Option<ProvisioningResult>,
}

/// Undo actions for completed saga steps, replayed in reverse order.
enum Compensation {
    DeleteStore(String),
    DeleteVerticalProfile(String),
    DeleteHardwareProfile(String),
}

impl StorecfgService {
    /// Create a store and materialize its provisioning plan.
    ///
    /// Sequence: plan (pure) → store record → compliance policy →
    /// vertical profile → hardware profile. A failure after the store
    /// record exists rolls back every completed step; compensation
    /// failures are logged and swallowed so the caller always sees the
    /// original cause.
    pub fn create_store(&self, input: &CreateStoreInput) -> Result<CreateStoreOutput, ServiceError> {
        let organization_id = input.organization_id.trim();
        let region_id = input.region_id.trim();
        let _: crate::model::Organization = self.require_doc("organization", organization_id)?;
        let region: crate::model::Region = self.require_doc("region", region_id)?;

        let location_id = match input.location_id.trim() {
            "" => format!("loc-{}", new_id()),
            id => id.to_string(),
        };

        let plan = build_store_provisioning_plan(
            &location_id,
            &region.country_code,
            input.provisioning.as_ref(),
        )?;

        if self.get_doc::<Store>("store", &location_id)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Store locationId '{}' already exists",
                location_id
            )));
        }

        let now = now_rfc3339();
        let store = Store {
            location_id: location_id.clone(),
            organization_id: organization_id.to_string(),
            region_id: region_id.to_string(),
            code: input.code.trim().to_uppercase(),
            name: input.name.trim().to_string(),
            status: if input.status.trim().is_empty() {
                "ACTIVE".to_string()
            } else {
                input.status.trim().to_uppercase()
            },
            timezone: match input.timezone.trim() {
                "" if region.timezone.is_empty() => "UTC".to_string(),
                "" => region.timezone.clone(),
                tz => tz.to_string(),
            },
            channel_set: input
                .channel_set
                .iter()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
            override_settings: input.override_settings.clone(),
            metadata: input.metadata.clone(),
            create_at: Some(now.clone()),
            update_at: Some(now.clone()),
        };
        self.put_doc("store", &location_id, &store)?;

        let mut compensations = vec![Compensation::DeleteStore(location_id.clone())];

        let compliance_policy_pack =
            match self.compliance.apply(&region.country_code, &location_id) {
                Ok(pack) => pack,
                Err(e) => {
                    self.run_compensations(compensations);
                    return Err(ServiceError::Storage(format!(
                        "Failed to apply compliance policy pack: {}",
                        e
                    )));
                }
            };
        if let Some(pack) = &compliance_policy_pack {
            tracing::info!(
                location_id = %location_id,
                policy_pack_id = %pack.policy_pack_id,
                "compliance policy pack auto-applied"
            );
        }

        let provisioning = if plan.enabled {
            match self.materialize_plan(&plan, &now, &mut compensations) {
                Ok(result) => Some(result),
                Err(e) => {
                    self.run_compensations(compensations);
                    return Err(ServiceError::Storage(format!(
                        "Failed to apply store provisioning: {}",
                        e
                    )));
                }
            }
        } else {
            None
        };

        Ok(CreateStoreOutput {
            store,
            compliance_policy_pack,
            provisioning,
        })
    }

    fn materialize_plan(
        &self,
        plan: &crate::model::ProvisioningPlan,
        now: &str,
        compensations: &mut Vec<Compensation>,
    ) -> Result<ProvisioningResult, ServiceError> {
        let mut vertical_profile = None;
        if let Some(draft) = &plan.vertical_profile_draft {
            let mut profile = draft.clone();
            profile.create_at = Some(now.to_string());
            profile.update_at = Some(now.to_string());
            self.put_doc("vertical_profile", &plan.location_id, &profile)?;
            compensations.push(Compensation::DeleteVerticalProfile(plan.location_id.clone()));
            tracing::info!(
                location_id = %plan.location_id,
                template_code = %profile.template_code,
                "vertical profile auto-provisioned"
            );
            vertical_profile = Some(profile);
        }

        let mut hardware_profile = None;
        if let Some(draft) = &plan.hardware_profile_draft {
            let mut profile = draft.clone();
            profile.create_at = Some(now.to_string());
            profile.update_at = Some(now.to_string());
            self.put_doc("hardware_profile", &plan.location_id, &profile)?;
            compensations.push(Compensation::DeleteHardwareProfile(plan.location_id.clone()));
            tracing::info!(
                location_id = %plan.location_id,
                selected_devices = profile.selections.len(),
                "hardware profile auto-provisioned"
            );
            hardware_profile = Some(profile);
        }

        Ok(ProvisioningResult {
            enabled: true,
            country_code: plan.country_code.clone(),
            vertical_profile,
            hardware_profile,
            summary: plan.summary.clone(),
        })
    }

    /// Replay compensations in reverse creation order. Failures here
    /// must never mask the original error, so they are only logged.
    fn run_compensations(&self, compensations: Vec<Compensation>) {
        for compensation in compensations.into_iter().rev() {
            let (kind, id) = match &compensation {
                Compensation::DeleteStore(id) => ("store", id),
                Compensation::DeleteVerticalProfile(id) => ("vertical_profile", id),
                Compensation::DeleteHardwareProfile(id) => ("hardware_profile", id),
            };
            if let Err(e) = self.delete_doc(kind, id) {
                tracing::warn!(kind, id = %id, error = %e, "compensation failed");
            }
        }
    }
}
