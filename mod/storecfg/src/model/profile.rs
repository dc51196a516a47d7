use serde::{Deserialize, Serialize};

/// Lifecycle status of a store profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

impl Default for ProfileStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl ProfileStatus {
    /// Parse a caller-supplied status, defaulting to ACTIVE on
    /// empty/unknown input.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "INACTIVE" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

/// A hardware selection as supplied by a caller (explicit row) or by
/// the auto-selector. Carries nothing derived from the catalog — the
/// validator resolves it into a [`ResolvedHardwareSelection`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSelectionInput {
    #[serde(default)]
    pub role_key: String,

    #[serde(default)]
    pub provider_code: String,

    #[serde(default)]
    pub model_code: String,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default)]
    pub zone: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

fn default_quantity() -> i64 {
    1
}

/// A hardware selection after catalog validation. The `resolved_*`
/// fields and `capability_tags` come from the matched catalog device
/// and are never trusted from caller input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHardwareSelection {
    pub role_key: String,
    pub provider_code: String,
    pub model_code: String,
    pub quantity: i64,

    #[serde(default)]
    pub zone: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,

    pub resolved_display_name: String,
    pub resolved_device_class: String,

    #[serde(default)]
    pub capability_tags: Vec<String>,
}

/// Per-store hardware profile. PK = location_id; created/overwritten
/// via idempotent upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreHardwareProfile {
    pub location_id: String,

    pub country_code: String,

    #[serde(default)]
    pub business_type: String,

    #[serde(default)]
    pub profile_status: ProfileStatus,

    #[serde(default)]
    pub provider_priority: Vec<String>,

    #[serde(default)]
    pub capability_targets: Vec<String>,

    #[serde(default)]
    pub selections: Vec<ResolvedHardwareSelection>,

    #[serde(default)]
    pub validation_warnings: Vec<String>,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

/// Per-store vertical profile. `overrides` is deep-merged onto the
/// template at read time; the merged view is never persisted, keeping
/// the template catalog the single source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreVerticalProfile {
    pub location_id: String,

    pub country_code: String,

    pub template_code: String,

    pub template_version: String,

    #[serde(default)]
    pub profile_status: ProfileStatus,

    #[serde(default)]
    pub overrides: serde_json::Value,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_status_parse() {
        assert_eq!(ProfileStatus::parse("inactive"), ProfileStatus::Inactive);
        assert_eq!(ProfileStatus::parse(" ACTIVE "), ProfileStatus::Active);
        assert_eq!(ProfileStatus::parse(""), ProfileStatus::Active);
        assert_eq!(ProfileStatus::parse("bogus"), ProfileStatus::Active);
    }

    #[test]
    fn selection_input_defaults() {
        let input: HardwareSelectionInput =
            serde_json::from_str(r#"{"roleKey":"PAYMENT","providerCode":"SQUARE","modelCode":"SQUARE_TERMINAL"}"#)
                .unwrap();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.zone, "");
        assert!(input.metadata.is_null());
    }

    #[test]
    fn hardware_profile_json_roundtrip() {
        let profile = StoreHardwareProfile {
            location_id: "loc-001".into(),
            country_code: "US".into(),
            business_type: "TEA_BEVERAGE".into(),
            profile_status: ProfileStatus::Active,
            provider_priority: vec!["SQUARE".into(), "TOAST".into(), "CUSTOM".into()],
            capability_targets: vec!["EMV_NFC_PAYMENT".into()],
            selections: vec![ResolvedHardwareSelection {
                role_key: "PAYMENT_TERMINAL".into(),
                provider_code: "SQUARE".into(),
                model_code: "SQUARE_TERMINAL".into(),
                quantity: 2,
                zone: "FRONT".into(),
                metadata: serde_json::Value::Null,
                resolved_display_name: "Square Terminal".into(),
                resolved_device_class: "PAYMENT_TERMINAL".into(),
                capability_tags: vec!["EMV_NFC_PAYMENT".into()],
            }],
            validation_warnings: vec![],
            metadata: serde_json::Value::Null,
            create_at: Some("2026-02-01T00:00:00Z".into()),
            update_at: Some("2026-02-01T00:00:00Z".into()),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: StoreHardwareProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }
}
