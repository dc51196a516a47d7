//! Provisioning planning: compose template resolution, capability
//! matching and selection validation into one plan. Pure — no I/O —
//! so the same function backs both preview calls and the persistence
//! path.

use serde_json::Value;

use abcpos_core::ServiceError;

use crate::catalog::{
    VERTICAL_TEMPLATE_VERSION, get_vertical_template, is_template_allowed_in_country,
    normalize::{
        normalize_country_code, normalize_template_code, to_unique_strings, to_unique_uppercase,
    },
};
use crate::model::{
    HardwareSummary, PlanSummary, ProfileStatus, ProvisioningPlan, ProvisioningRequest,
    StoreHardwareProfile, StoreVerticalProfile,
};
use crate::service::matcher::{SelectionSuggestion, suggest_hardware_selections};
use crate::service::template::resolve_vertical_template_config;
use crate::service::validator::validate_hardware_selection;

fn safe_object(value: &Value) -> Value {
    if value.is_object() {
        value.clone()
    } else {
        Value::Object(serde_json::Map::new())
    }
}

fn string_array(value: &Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn disabled_plan(location_id: String, country_code: String) -> ProvisioningPlan {
    ProvisioningPlan {
        enabled: false,
        country_code,
        location_id,
        vertical_profile_draft: None,
        hardware_profile_draft: None,
        summary: None,
    }
}

/// Vertical draft plus the merged template view; the view feeds the
/// hardware draft's capability targets.
fn build_vertical_draft(
    location_id: &str,
    country_code: &str,
    provisioning: &ProvisioningRequest,
) -> Result<(Option<StoreVerticalProfile>, Option<Value>), ServiceError> {
    let template_code = normalize_template_code(&provisioning.vertical_template_code);
    if template_code.is_empty() {
        return Ok((None, None));
    }

    let Some(template) = get_vertical_template(&template_code) else {
        return Err(ServiceError::Validation(format!(
            "Unknown vertical template: {}.",
            template_code
        )));
    };
    if !is_template_allowed_in_country(template, country_code) {
        return Err(ServiceError::Validation(format!(
            "Template {} is not supported in {}.",
            template_code, country_code
        )));
    }

    let overrides = safe_object(&provisioning.vertical_overrides);
    let resolved_template = resolve_vertical_template_config(&template_code, &overrides);

    let draft = StoreVerticalProfile {
        location_id: location_id.to_string(),
        country_code: country_code.to_string(),
        template_code,
        template_version: VERTICAL_TEMPLATE_VERSION.to_string(),
        profile_status: ProfileStatus::parse(&provisioning.vertical_profile_status),
        overrides,
        metadata: safe_object(&provisioning.vertical_metadata),
        create_at: None,
        update_at: None,
    };
    Ok((Some(draft), resolved_template))
}

/// Hardware draft, triggered by explicit selections, explicit opt-in
/// or a non-empty derived capability target set. Validation errors
/// abort the whole plan.
fn build_hardware_draft(
    location_id: &str,
    country_code: &str,
    provisioning: &ProvisioningRequest,
    resolved_template: Option<&Value>,
) -> Result<(Option<StoreHardwareProfile>, Option<HardwareSummary>), ServiceError> {
    let requested = to_unique_uppercase(&provisioning.capability_targets);
    let template_required = resolved_template
        .map(|t| string_array(t, "requiredCapabilities"))
        .unwrap_or_default();
    let template_recommended = resolved_template
        .map(|t| string_array(t, "recommendedCapabilities"))
        .unwrap_or_default();
    let capability_targets = to_unique_uppercase(
        &[requested, template_required, template_recommended].concat(),
    );

    let has_explicit_selections = !provisioning.hardware_selections.is_empty();
    let should_create = provisioning.auto_create_hardware_profile == Some(true)
        || has_explicit_selections
        || !capability_targets.is_empty();
    if !should_create {
        return Ok((None, None));
    }

    let provider_priority = to_unique_uppercase(&provisioning.provider_priority);
    let auto_select = provisioning.auto_select_hardware != Some(false);

    let mut suggestion = SelectionSuggestion::empty();
    let selection_input = if has_explicit_selections {
        provisioning.hardware_selections.clone()
    } else if auto_select && !capability_targets.is_empty() {
        suggestion = suggest_hardware_selections(country_code, &capability_targets, &provider_priority);
        suggestion.selections.clone()
    } else {
        Vec::new()
    };

    let validation = validate_hardware_selection(country_code, &selection_input);
    if !validation.errors.is_empty() {
        return Err(ServiceError::ValidationBatch {
            message: "Invalid store provisioning hardware selections.".to_string(),
            details: validation.errors,
        });
    }

    let warnings = to_unique_strings(
        &[validation.warnings.clone(), suggestion.warnings.clone()].concat(),
    );
    let missing_capabilities: Vec<String> = capability_targets
        .iter()
        .filter(|c| !validation.covered_capabilities.contains(c))
        .cloned()
        .collect();

    let business_type = if provisioning.business_type.trim().is_empty() {
        resolved_template
            .and_then(|t| t["templateCode"].as_str())
            .unwrap_or("")
            .to_string()
    } else {
        provisioning.business_type.trim().to_uppercase()
    };

    let draft = StoreHardwareProfile {
        location_id: location_id.to_string(),
        country_code: country_code.to_string(),
        business_type,
        profile_status: ProfileStatus::parse(&provisioning.hardware_profile_status),
        provider_priority,
        capability_targets: capability_targets.clone(),
        selections: validation.resolved_selections,
        validation_warnings: warnings.clone(),
        metadata: safe_object(&provisioning.hardware_metadata),
        create_at: None,
        update_at: None,
    };
    let summary = HardwareSummary {
        missing_capabilities,
        covered_capabilities: validation.covered_capabilities,
        warnings,
        auto_selected: !has_explicit_selections && auto_select,
    };
    Ok((Some(draft), Some(summary)))
}

/// Build the full provisioning plan for one store.
///
/// Deterministic over its inputs. An absent or all-empty request
/// yields a disabled no-op plan without touching the sub-resolvers.
pub fn build_store_provisioning_plan(
    location_id: &str,
    default_country_code: &str,
    provisioning: Option<&ProvisioningRequest>,
) -> Result<ProvisioningPlan, ServiceError> {
    let location_id = location_id.trim().to_string();
    if location_id.is_empty() {
        return Err(ServiceError::Validation(
            "locationId is required for store provisioning.".to_string(),
        ));
    }

    let default_country = normalize_country_code(default_country_code, "US");
    let Some(provisioning) = provisioning else {
        return Ok(disabled_plan(location_id, default_country));
    };

    let country_code = normalize_country_code(&provisioning.country_code, &default_country);
    if provisioning.is_empty() {
        return Ok(disabled_plan(location_id, country_code));
    }

    let (vertical_profile_draft, resolved_template) =
        build_vertical_draft(&location_id, &country_code, provisioning)?;
    let (hardware_profile_draft, hardware_summary) = build_hardware_draft(
        &location_id,
        &country_code,
        provisioning,
        resolved_template.as_ref(),
    )?;

    let template_code = vertical_profile_draft
        .as_ref()
        .map(|draft| draft.template_code.clone());
    Ok(ProvisioningPlan {
        enabled: true,
        country_code,
        location_id,
        vertical_profile_draft,
        hardware_profile_draft,
        summary: Some(PlanSummary {
            template_code,
            hardware: hardware_summary,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> ProvisioningRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn empty_location_id_is_fatal() {
        let err = build_store_provisioning_plan("  ", "US", None).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn absent_or_empty_provisioning_disables_the_plan() {
        let plan = build_store_provisioning_plan("loc-001", "", None).unwrap();
        assert!(!plan.enabled);
        assert_eq!(plan.country_code, "US");
        assert!(plan.vertical_profile_draft.is_none());
        assert!(plan.hardware_profile_draft.is_none());
        assert!(plan.summary.is_none());

        let plan =
            build_store_provisioning_plan("loc-001", "ca", Some(&request(json!({})))).unwrap();
        assert!(!plan.enabled);
        assert_eq!(plan.country_code, "CA");
    }

    #[test]
    fn template_plan_auto_selects_hardware() {
        let req = request(json!({"verticalTemplateCode": "MILK_TEA"}));
        let plan = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap();

        assert!(plan.enabled);
        let vertical = plan.vertical_profile_draft.as_ref().unwrap();
        assert_eq!(vertical.template_code, "MILK_TEA");
        assert_eq!(vertical.template_version, VERTICAL_TEMPLATE_VERSION);

        let hardware = plan.hardware_profile_draft.as_ref().unwrap();
        // Required plus recommended template capabilities become targets.
        assert!(hardware.capability_targets.contains(&"EMV_NFC_PAYMENT".to_string()));
        assert!(hardware.capability_targets.contains(&"QUEUE_CALLING".to_string()));
        assert!(!hardware.selections.is_empty());
        assert_eq!(hardware.business_type, "MILK_TEA");

        let summary = plan.summary.as_ref().unwrap();
        assert_eq!(summary.template_code.as_deref(), Some("MILK_TEA"));
        let hw = summary.hardware.as_ref().unwrap();
        assert!(hw.auto_selected);
        assert!(hw.covered_capabilities.contains(&"EMV_NFC_PAYMENT".to_string()));
    }

    #[test]
    fn unknown_template_is_fatal() {
        let req = request(json!({"verticalTemplateCode": "NO_SUCH"}));
        let err = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert!(message.contains("Unknown vertical template"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unsupported_template_country_is_fatal() {
        let req = request(json!({"verticalTemplateCode": "MILK_TEA", "countryCode": "FR"}));
        let err = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert!(message.to_lowercase().contains("not supported"));
                assert!(message.contains("FR"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_explicit_selections_abort_with_details() {
        let req = request(json!({
            "hardwareSelections": [
                {"roleKey": "PAYMENT", "providerCode": "TOAST", "modelCode": "TOAST_FLEX_3_WEDGE"},
                {"roleKey": "", "providerCode": "", "modelCode": ""}
            ],
            "countryCode": "FR"
        }));
        let err = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap_err();
        match err {
            ServiceError::ValidationBatch { message, details } => {
                assert!(message.contains("Invalid store provisioning"));
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].index, 0);
                assert_eq!(details[1].index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn explicit_selections_win_over_auto_selection() {
        let req = request(json!({
            "verticalTemplateCode": "MILK_TEA",
            "hardwareSelections": [
                {"roleKey": "PAYMENT", "providerCode": "SQUARE", "modelCode": "SQUARE_TERMINAL"}
            ]
        }));
        let plan = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap();
        let hardware = plan.hardware_profile_draft.as_ref().unwrap();
        assert_eq!(hardware.selections.len(), 1);
        assert_eq!(hardware.selections[0].model_code, "SQUARE_TERMINAL");

        let hw = plan.summary.as_ref().unwrap().hardware.as_ref().unwrap();
        assert!(!hw.auto_selected);
        // Targets the single explicit selection does not cover stay missing.
        assert!(hw.missing_capabilities.contains(&"COUNTER_CHECKOUT".to_string()));
    }

    #[test]
    fn auto_create_without_targets_builds_empty_profile() {
        let req = request(json!({"autoCreateHardwareProfile": true}));
        let plan = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap();
        assert!(plan.enabled);
        let hardware = plan.hardware_profile_draft.as_ref().unwrap();
        assert!(hardware.selections.is_empty());
        assert!(hardware.validation_warnings.is_empty());
    }

    #[test]
    fn opting_out_of_auto_select_leaves_targets_unselected() {
        let req = request(json!({
            "capabilityTargets": ["EMV_NFC_PAYMENT"],
            "autoSelectHardware": false
        }));
        let plan = build_store_provisioning_plan("loc-001", "US", Some(&req)).unwrap();
        let hardware = plan.hardware_profile_draft.as_ref().unwrap();
        assert!(hardware.selections.is_empty());
        let hw = plan.summary.as_ref().unwrap().hardware.as_ref().unwrap();
        assert!(!hw.auto_selected);
        assert_eq!(hw.missing_capabilities, vec!["EMV_NFC_PAYMENT"]);
    }

    #[test]
    fn planning_is_deterministic() {
        let req = request(json!({
            "verticalTemplateCode": "HOTPOT",
            "providerPriority": ["SQUARE"]
        }));
        let a = build_store_provisioning_plan("loc-777", "US", Some(&req)).unwrap();
        let b = build_store_provisioning_plan("loc-777", "US", Some(&req)).unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
