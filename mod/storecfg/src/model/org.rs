use serde::{Deserialize, Serialize};

/// Organization — the top of the settings hierarchy. Owns regions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Primary key.
    pub id: String,

    pub code: String,

    pub name: String,

    /// Base settings layer, inherited by every region and store.
    #[serde(default)]
    pub default_settings: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

/// Region — middle settings layer. Owns stores; carries the country
/// default used during provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Primary key.
    pub id: String,

    pub organization_id: String,

    pub code: String,

    pub name: String,

    /// ISO country code, used as the provisioning default.
    pub country_code: String,

    #[serde(default)]
    pub timezone: String,

    /// Settings layer merged over the organization defaults.
    #[serde(default)]
    pub default_settings: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

/// Store — a physical location. PK = location_id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique location identifier, shared with the profile documents.
    pub location_id: String,

    pub organization_id: String,

    pub region_id: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,

    /// ACTIVE or INACTIVE.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub timezone: String,

    /// Enabled sales channels (e.g. DINE_IN, TAKEAWAY, DELIVERY).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_set: Vec<String>,

    /// Deepest settings layer; wins over region and organization.
    #[serde(default)]
    pub override_settings: serde_json::Value,

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
    fn store_json_roundtrip() {
        let store = Store {
            location_id: "loc-001".into(),
            organization_id: "org1".into(),
            region_id: "reg1".into(),
            code: "SF-01".into(),
            name: "Mission St".into(),
            status: "ACTIVE".into(),
            timezone: "America/Los_Angeles".into(),
            channel_set: vec!["DINE_IN".into(), "TAKEAWAY".into()],
            override_settings: serde_json::json!({"kitchen": {"slaMinutes": 12}}),
            metadata: serde_json::Value::Null,
            create_at: None,
            update_at: None,
        };
        let json = serde_json::to_string(&store).unwrap();
        let back: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(store, back);
    }
}
