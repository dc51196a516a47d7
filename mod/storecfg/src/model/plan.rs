use serde::{Deserialize, Serialize};

use super::profile::{HardwareSelectionInput, StoreHardwareProfile, StoreVerticalProfile};

/// Provisioning directives supplied with a store creation or preview
/// request. Everything is optional; an all-empty payload produces a
/// disabled no-op plan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisioningRequest {
    pub country_code: String,

    /// Vertical template to instantiate. `templateCode` is accepted
    /// as an alias.
    #[serde(alias = "templateCode")]
    pub vertical_template_code: String,

    pub vertical_overrides: serde_json::Value,

    pub vertical_profile_status: String,

    pub vertical_metadata: serde_json::Value,

    /// Force hardware profile creation even with no targets.
    pub auto_create_hardware_profile: Option<bool>,

    /// Opt out of catalog auto-selection (defaults to on).
    pub auto_select_hardware: Option<bool>,

    pub provider_priority: Vec<String>,

    pub capability_targets: Vec<String>,

    /// Explicit selections; when present they win over auto-selection.
    pub hardware_selections: Vec<HardwareSelectionInput>,

    pub hardware_profile_status: String,

    pub hardware_metadata: serde_json::Value,

    /// Business type stamped on the hardware profile; falls back to
    /// the template code.
    pub business_type: String,
}

impl ProvisioningRequest {
    /// True when no provisioning field was supplied — the plan is a
    /// disabled no-op in that case.
    pub fn is_empty(&self) -> bool {
        self.country_code.trim().is_empty()
            && self.vertical_template_code.trim().is_empty()
            && self.vertical_overrides.is_null()
            && self.vertical_profile_status.trim().is_empty()
            && self.vertical_metadata.is_null()
            && self.auto_create_hardware_profile.is_none()
            && self.auto_select_hardware.is_none()
            && self.provider_priority.is_empty()
            && self.capability_targets.is_empty()
            && self.hardware_selections.is_empty()
            && self.hardware_profile_status.trim().is_empty()
            && self.hardware_metadata.is_null()
            && self.business_type.trim().is_empty()
    }
}

/// Hardware portion of a plan summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSummary {
    /// Capability targets not covered by the resolved selections.
    pub missing_capabilities: Vec<String>,
    pub covered_capabilities: Vec<String>,
    pub warnings: Vec<String>,
    pub auto_selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub template_code: Option<String>,
    pub hardware: Option<HardwareSummary>,
}

/// The ephemeral output of provisioning planning. Never persisted —
/// either materialized into real profiles or discarded (preview mode).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningPlan {
    pub enabled: bool,
    pub country_code: String,
    pub location_id: String,
    pub vertical_profile_draft: Option<StoreVerticalProfile>,
    pub hardware_profile_draft: Option<StoreHardwareProfile>,
    pub summary: Option<PlanSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_detection() {
        let req: ProvisioningRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());

        let req: ProvisioningRequest =
            serde_json::from_str(r#"{"verticalTemplateCode":"MILK_TEA"}"#).unwrap();
        assert!(!req.is_empty());

        let req: ProvisioningRequest =
            serde_json::from_str(r#"{"autoCreateHardwareProfile":false}"#).unwrap();
        assert!(!req.is_empty());
    }

    #[test]
    fn template_code_alias() {
        let req: ProvisioningRequest =
            serde_json::from_str(r#"{"templateCode":"HOTPOT"}"#).unwrap();
        assert_eq!(req.vertical_template_code, "HOTPOT");
    }
}
