//! Per-store profile reads and writes, outside the provisioning saga.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use abcpos_core::{ServiceError, merge_patch, now_rfc3339};

use crate::catalog::{
    get_vertical_template, is_template_allowed_in_country,
    normalize::{normalize_country_code, normalize_template_code, to_unique_uppercase},
};
use crate::model::{
    HardwareSelectionInput, ProfileStatus, StoreHardwareProfile, StoreVerticalProfile,
};
use crate::service::StorecfgService;
use crate::service::template::resolve_vertical_template_config;
use crate::service::validator::validate_hardware_selection;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpsertHardwareProfileInput {
    pub country_code: String,
    pub business_type: String,
    pub profile_status: String,
    pub provider_priority: Vec<String>,
    pub capability_targets: Vec<String>,
    pub selections: Vec<HardwareSelectionInput>,
    pub metadata: Value,
}

/// A vertical profile, optionally with the template merge recomputed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalProfileView {
    #[serde(flatten)]
    pub profile: StoreVerticalProfile,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_template: Option<Value>,
}

impl StorecfgService {
    /// Replace a store's hardware profile. Selections are validated
    /// against the catalog; any row error rejects the whole write.
    pub fn upsert_hardware_profile(
        &self,
        location_id: &str,
        input: &UpsertHardwareProfileInput,
    ) -> Result<StoreHardwareProfile, ServiceError> {
        let location_id = location_id.trim();
        if location_id.is_empty() {
            return Err(ServiceError::Validation("locationId is required.".to_string()));
        }

        let country_code = normalize_country_code(&input.country_code, "US");
        let validation = validate_hardware_selection(&country_code, &input.selections);
        if !validation.errors.is_empty() {
            return Err(ServiceError::ValidationBatch {
                message: "Invalid hardware profile selections.".to_string(),
                details: validation.errors,
            });
        }

        let existing: Option<StoreHardwareProfile> = self.get_doc("hardware_profile", location_id)?;
        let now = now_rfc3339();
        let profile = StoreHardwareProfile {
            location_id: location_id.to_string(),
            country_code,
            business_type: input.business_type.trim().to_uppercase(),
            profile_status: ProfileStatus::parse(&input.profile_status),
            provider_priority: to_unique_uppercase(&input.provider_priority),
            capability_targets: to_unique_uppercase(&input.capability_targets),
            selections: validation.resolved_selections,
            validation_warnings: validation.warnings,
            metadata: input.metadata.clone(),
            create_at: existing.and_then(|p| p.create_at).or_else(|| Some(now.clone())),
            update_at: Some(now),
        };
        self.put_doc("hardware_profile", location_id, &profile)?;
        tracing::info!(
            location_id,
            selected_devices = profile.selections.len(),
            "hardware profile upserted"
        );
        Ok(profile)
    }

    pub fn get_hardware_profile(
        &self,
        location_id: &str,
    ) -> Result<StoreHardwareProfile, ServiceError> {
        self.require_doc("hardware_profile", location_id.trim())
    }

    /// Read a vertical profile; with `resolved`, the overrides are
    /// merged onto the current template catalog entry.
    pub fn get_vertical_profile(
        &self,
        location_id: &str,
        resolved: bool,
    ) -> Result<VerticalProfileView, ServiceError> {
        let profile: StoreVerticalProfile = self.require_doc("vertical_profile", location_id.trim())?;
        let resolved_template = if resolved {
            resolve_vertical_template_config(&profile.template_code, &profile.overrides)
        } else {
            None
        };
        Ok(VerticalProfileView {
            profile,
            resolved_template,
        })
    }

    /// JSON merge-patch a vertical profile. The template/country pair
    /// is re-validated after the patch; `locationId` cannot change.
    pub fn update_vertical_profile(
        &self,
        location_id: &str,
        patch: &Value,
    ) -> Result<VerticalProfileView, ServiceError> {
        let location_id = location_id.trim();
        let existing: StoreVerticalProfile = self.require_doc("vertical_profile", location_id)?;
        let create_at = existing.create_at.clone();

        let mut doc = serde_json::to_value(&existing)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut doc, patch);
        let mut profile: StoreVerticalProfile = serde_json::from_value(doc)
            .map_err(|e| ServiceError::Validation(format!("invalid vertical profile patch: {}", e)))?;

        profile.location_id = location_id.to_string();
        profile.country_code = normalize_country_code(&profile.country_code, "US");
        profile.template_code = normalize_template_code(&profile.template_code);

        let Some(template) = get_vertical_template(&profile.template_code) else {
            return Err(ServiceError::Validation(format!(
                "Unknown vertical template: {}.",
                profile.template_code
            )));
        };
        if !is_template_allowed_in_country(template, &profile.country_code) {
            return Err(ServiceError::Validation(format!(
                "Template {} is not supported in {}.",
                profile.template_code, profile.country_code
            )));
        }

        profile.create_at = create_at;
        profile.update_at = Some(now_rfc3339());
        self.put_doc("vertical_profile", location_id, &profile)?;

        let resolved_template =
            resolve_vertical_template_config(&profile.template_code, &profile.overrides);
        Ok(VerticalProfileView {
            profile,
            resolved_template,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::VERTICAL_TEMPLATE_VERSION;
    use crate::service::testutil::test_service;

    fn upsert_input(selections: Vec<HardwareSelectionInput>) -> UpsertHardwareProfileInput {
        UpsertHardwareProfileInput {
            country_code: "us".into(),
            business_type: "tea_beverage".into(),
            provider_priority: vec!["square".into()],
            capability_targets: vec!["EMV_NFC_PAYMENT".into()],
            selections,
            ..Default::default()
        }
    }

    fn selection(role: &str, provider: &str, model: &str) -> HardwareSelectionInput {
        HardwareSelectionInput {
            role_key: role.into(),
            provider_code: provider.into(),
            model_code: model.into(),
            quantity: 1,
            zone: String::new(),
            metadata: Value::Null,
        }
    }

    fn seed_vertical_profile(svc: &StorecfgService, location_id: &str) {
        svc.put_doc(
            "vertical_profile",
            location_id,
            &StoreVerticalProfile {
                location_id: location_id.into(),
                country_code: "US".into(),
                template_code: "MILK_TEA".into(),
                template_version: VERTICAL_TEMPLATE_VERSION.into(),
                profile_status: ProfileStatus::Active,
                overrides: json!({}),
                metadata: Value::Null,
                create_at: Some("2026-02-01T00:00:00Z".into()),
                update_at: Some("2026-02-01T00:00:00Z".into()),
            },
        )
        .unwrap();
    }

    #[test]
    fn upsert_normalizes_and_persists() {
        let svc = test_service();
        let profile = svc
            .upsert_hardware_profile(
                "loc-001",
                &upsert_input(vec![selection("PAYMENT", "SQUARE", "SQUARE_TERMINAL")]),
            )
            .unwrap();
        assert_eq!(profile.country_code, "US");
        assert_eq!(profile.business_type, "TEA_BEVERAGE");
        assert_eq!(profile.provider_priority, vec!["SQUARE"]);
        assert_eq!(profile.selections[0].resolved_display_name, "Square Terminal");
        // Missing receipt capability is a warning, not an error.
        assert_eq!(profile.validation_warnings.len(), 1);

        let read = svc.get_hardware_profile("loc-001").unwrap();
        assert_eq!(read.selections.len(), 1);
    }

    #[test]
    fn upsert_preserves_create_at() {
        let svc = test_service();
        let first = svc
            .upsert_hardware_profile("loc-001", &upsert_input(vec![]))
            .unwrap();
        let second = svc
            .upsert_hardware_profile(
                "loc-001",
                &upsert_input(vec![selection("PAYMENT", "SQUARE", "SQUARE_TERMINAL")]),
            )
            .unwrap();
        assert_eq!(first.create_at, second.create_at);
        assert_eq!(second.selections.len(), 1);
    }

    #[test]
    fn upsert_rejects_invalid_selections_as_a_batch() {
        let svc = test_service();
        let err = svc
            .upsert_hardware_profile(
                "loc-001",
                &upsert_input(vec![
                    selection("PAYMENT", "SQUARE", "SQUARE_TERMINAL"),
                    selection("PAYMENT_2", "TOAST", "NOT_A_MODEL"),
                ]),
            )
            .unwrap_err();
        match err {
            ServiceError::ValidationBatch { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Batch-fatal: nothing was written.
        assert!(svc.get_hardware_profile("loc-001").is_err());
    }

    #[test]
    fn vertical_profile_resolved_view_merges_template() {
        let svc = test_service();
        seed_vertical_profile(&svc, "loc-001");
        svc.update_vertical_profile(
            "loc-001",
            &json!({"overrides": {"queueProfile": {"callingScreen": false}}}),
        )
        .unwrap();

        let view = svc.get_vertical_profile("loc-001", true).unwrap();
        let resolved = view.resolved_template.unwrap();
        assert_eq!(resolved["queueProfile"]["enabled"], true);
        assert_eq!(resolved["queueProfile"]["callingScreen"], false);

        let plain = svc.get_vertical_profile("loc-001", false).unwrap();
        assert!(plain.resolved_template.is_none());
    }

    #[test]
    fn patch_revalidates_template_country() {
        let svc = test_service();
        seed_vertical_profile(&svc, "loc-001");

        let err = svc
            .update_vertical_profile("loc-001", &json!({"countryCode": "FR"}))
            .unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert!(message.to_lowercase().contains("not supported"))
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = svc
            .update_vertical_profile("loc-001", &json!({"templateCode": "NO_SUCH"}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Failed patches leave the stored profile untouched.
        let view = svc.get_vertical_profile("loc-001", false).unwrap();
        assert_eq!(view.profile.template_code, "MILK_TEA");
        assert_eq!(view.profile.country_code, "US");
    }

    #[test]
    fn patch_cannot_move_the_profile() {
        let svc = test_service();
        seed_vertical_profile(&svc, "loc-001");
        let view = svc
            .update_vertical_profile("loc-001", &json!({"locationId": "loc-999"}))
            .unwrap();
        assert_eq!(view.profile.location_id, "loc-001");
        assert!(svc.get_vertical_profile("loc-999", false).is_err());
    }

    #[test]
    fn missing_profiles_are_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.get_hardware_profile("nope"),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.get_vertical_profile("nope", false),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.update_vertical_profile("nope", &json!({})),
            Err(ServiceError::NotFound(_))
        ));
    }
}
