//! Settings cascade: organization defaults < region defaults < store
//! overrides. The merge is recomputed on every read; the layers stay
//! the source of truth.

use serde::Serialize;
use serde_json::{Map, Value};

use abcpos_core::ServiceError;

use crate::model::{Organization, Region, Store};
use crate::service::StorecfgService;

fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Deep-merge `override_value` onto `base`.
///
/// Recurses only when both sides are JSON objects; anything else —
/// arrays included — is replaced outright by the override. Non-object
/// top-level inputs are treated as `{}`.
pub fn deep_merge(base: &Value, override_value: &Value) -> Value {
    let mut output: Map<String, Value> = match base.as_object() {
        Some(map) => map.clone(),
        None => Map::new(),
    };
    let Some(override_map) = override_value.as_object() else {
        return Value::Object(output);
    };

    for (key, value) in override_map {
        match output.get(key) {
            Some(existing) if is_plain_object(existing) && is_plain_object(value) => {
                let merged = deep_merge(existing, value);
                output.insert(key.clone(), merged);
            }
            _ => {
                output.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(output)
}

/// Resolve a store's effective settings from the three layers.
/// Resolution order is fixed: org < region < store.
pub fn resolve_store_settings(
    organization_defaults: &Value,
    region_defaults: &Value,
    store_overrides: &Value,
) -> Value {
    deep_merge(&deep_merge(organization_defaults, region_defaults), store_overrides)
}

/// Effective settings for a store, with layer provenance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub location_id: String,
    pub organization_id: String,
    pub region_id: String,
    pub settings: Value,
}

impl StorecfgService {
    /// Load the store and its region/organization layers, and return
    /// the merged effective settings.
    pub fn effective_settings(&self, location_id: &str) -> Result<EffectiveSettings, ServiceError> {
        let store: Store = self.require_doc("store", location_id.trim())?;
        let region: Region = self.require_doc("region", &store.region_id)?;
        let organization: Organization =
            self.require_doc("organization", &store.organization_id)?;

        Ok(EffectiveSettings {
            location_id: store.location_id.clone(),
            organization_id: organization.id.clone(),
            region_id: region.id.clone(),
            settings: resolve_store_settings(
                &organization.default_settings,
                &region.default_settings,
                &store.override_settings,
            ),
        })
    }
}
